//! Read-through content cache
//!
//! The CMS is slow (hundreds of milliseconds per query) and catalog pages
//! are hit far more often than content changes. This wrapper caches every
//! store operation for a configurable TTL. Only successful results are
//! cached; errors always retry the inner store on the next request.

use async_trait::async_trait;
use dashmap::DashMap;
use std::time::{Duration, Instant};

use crate::models::{Category, Product, Project};
use crate::services::content::ContentStore;
use crate::utils::ApiResult;

#[derive(Clone)]
enum CachedValue {
    Products(Vec<Product>),
    Product(Option<Product>),
    Projects(Vec<Project>),
    Project(Option<Project>),
}

struct CacheEntry {
    stored_at: Instant,
    value: CachedValue,
}

pub struct CachedContentStore<S> {
    inner: S,
    ttl: Duration,
    entries: DashMap<String, CacheEntry>,
}

impl<S: ContentStore> CachedContentStore<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self { inner, ttl, entries: DashMap::new() }
    }

    fn fresh(&self, key: &str) -> Option<CachedValue> {
        let entry = self.entries.get(key)?;
        (entry.stored_at.elapsed() < self.ttl).then(|| entry.value.clone())
    }

    fn store(&self, key: String, value: CachedValue) {
        self.entries.insert(key, CacheEntry { stored_at: Instant::now(), value });
    }
}

#[async_trait]
impl<S: ContentStore> ContentStore for CachedContentStore<S> {
    async fn products(&self) -> ApiResult<Vec<Product>> {
        if let Some(CachedValue::Products(products)) = self.fresh("products") {
            return Ok(products);
        }
        let products = self.inner.products().await?;
        self.store("products".to_string(), CachedValue::Products(products.clone()));
        Ok(products)
    }

    async fn product_by_slug(&self, slug: &str) -> ApiResult<Option<Product>> {
        let key = format!("product:{slug}");
        if let Some(CachedValue::Product(product)) = self.fresh(&key) {
            return Ok(product);
        }
        let product = self.inner.product_by_slug(slug).await?;
        self.store(key, CachedValue::Product(product.clone()));
        Ok(product)
    }

    async fn products_by_category(&self, category: Category) -> ApiResult<Vec<Product>> {
        let key = format!("category:{category}");
        if let Some(CachedValue::Products(products)) = self.fresh(&key) {
            return Ok(products);
        }
        let products = self.inner.products_by_category(category).await?;
        self.store(key, CachedValue::Products(products.clone()));
        Ok(products)
    }

    async fn featured_products(&self) -> ApiResult<Vec<Product>> {
        if let Some(CachedValue::Products(products)) = self.fresh("featured") {
            return Ok(products);
        }
        let products = self.inner.featured_products().await?;
        self.store("featured".to_string(), CachedValue::Products(products.clone()));
        Ok(products)
    }

    async fn similar_products(
        &self,
        slug: &str,
        category: Category,
        limit: usize,
    ) -> ApiResult<Vec<Product>> {
        let key = format!("similar:{slug}:{category}:{limit}");
        if let Some(CachedValue::Products(products)) = self.fresh(&key) {
            return Ok(products);
        }
        let products = self.inner.similar_products(slug, category, limit).await?;
        self.store(key, CachedValue::Products(products.clone()));
        Ok(products)
    }

    async fn projects(&self) -> ApiResult<Vec<Project>> {
        if let Some(CachedValue::Projects(projects)) = self.fresh("projects") {
            return Ok(projects);
        }
        let projects = self.inner.projects().await?;
        self.store("projects".to_string(), CachedValue::Projects(projects.clone()));
        Ok(projects)
    }

    async fn project_by_slug(&self, slug: &str) -> ApiResult<Option<Project>> {
        let key = format!("project:{slug}");
        if let Some(CachedValue::Project(project)) = self.fresh(&key) {
            return Ok(project);
        }
        let project = self.inner.project_by_slug(slug).await?;
        self.store(key, CachedValue::Project(project.clone()));
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LocalizedText;
    use crate::utils::ApiError;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn product(slug: &str) -> Product {
        Product {
            id: format!("page-{slug}"),
            slug: slug.to_string(),
            name: LocalizedText::new("Banc", "Bench"),
            description: LocalizedText::default(),
            category: Category::Seating,
            price_eur: None,
            dimensions: None,
            materials: vec![],
            images: vec![],
            featured: false,
            available: true,
            updated_at: Utc::now(),
        }
    }

    #[derive(Default)]
    struct CountingStore {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl ContentStore for CountingStore {
        async fn products(&self) -> ApiResult<Vec<Product>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ApiError::content_store_failed("down"));
            }
            Ok(vec![product("banc-lueur")])
        }

        async fn product_by_slug(&self, slug: &str) -> ApiResult<Option<Product>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(product(slug)))
        }

        async fn products_by_category(&self, _: Category) -> ApiResult<Vec<Product>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }

        async fn featured_products(&self) -> ApiResult<Vec<Product>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }

        async fn similar_products(
            &self,
            _: &str,
            _: Category,
            _: usize,
        ) -> ApiResult<Vec<Product>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }

        async fn projects(&self) -> ApiResult<Vec<Project>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }

        async fn project_by_slug(&self, _: &str) -> ApiResult<Option<Project>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let cache = CachedContentStore::new(CountingStore::default(), Duration::from_secs(60));
        cache.products().await.unwrap();
        cache.products().await.unwrap();
        assert_eq!(cache.inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_refetches() {
        let cache = CachedContentStore::new(CountingStore::default(), Duration::ZERO);
        cache.products().await.unwrap();
        cache.products().await.unwrap();
        assert_eq!(cache.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_keys_do_not_collide_across_operations() {
        let cache = CachedContentStore::new(CountingStore::default(), Duration::from_secs(60));
        cache.product_by_slug("banc-lueur").await.unwrap();
        cache.product_by_slug("fauteuil-ombre").await.unwrap();
        cache.project_by_slug("banc-lueur").await.unwrap();
        assert_eq!(cache.inner.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let store = CountingStore { fail: true, ..Default::default() };
        let cache = CachedContentStore::new(store, Duration::from_secs(60));
        assert!(cache.products().await.is_err());
        assert!(cache.products().await.is_err());
        assert_eq!(cache.inner.calls.load(Ordering::SeqCst), 2);
    }
}
