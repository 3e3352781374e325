// Common test utilities and helpers

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use chrono::Utc;

use crate::AppState;
use crate::config::Config;
use crate::create_app;
use crate::locale::LocaleRegistry;
use crate::models::{Category, ImageSet, LocalizedText, Product, Project};
use crate::services::content::ContentStore;
use crate::utils::ApiResult;

pub fn product(slug: &str, category: Category, featured: bool) -> Product {
    Product {
        id: format!("page-{slug}"),
        slug: slug.to_string(),
        name: LocalizedText::new(format!("{slug} (fr)"), format!("{slug} (en)")),
        description: LocalizedText::new("Chêne massif.", "Solid oak."),
        category,
        price_eur: Some(980.0),
        dimensions: Some("120 x 60 x 40 cm".to_string()),
        materials: vec!["chêne".to_string()],
        images: vec![ImageSet::from_original(
            "https://res.cloudinary.com/atelier-sauvage/image/upload/v1/objets/piece.jpg",
        )],
        featured,
        available: true,
        updated_at: Utc::now(),
    }
}

pub fn project(slug: &str, published: bool) -> Project {
    Project {
        id: format!("page-{slug}"),
        slug: slug.to_string(),
        title: LocalizedText::new(format!("{slug} (fr)"), format!("{slug} (en)")),
        summary: LocalizedText::new("Agencement complet.", "Full interior."),
        location: Some("Grenoble".to_string()),
        year: Some(2025),
        cover: None,
        gallery: vec![],
        product_slugs: vec!["banc-lueur".to_string()],
        published,
        updated_at: Utc::now(),
    }
}

/// In-memory content store mirroring the CMS query semantics.
pub struct FakeContentStore {
    pub products: Vec<Product>,
    pub projects: Vec<Project>,
}

impl Default for FakeContentStore {
    fn default() -> Self {
        Self {
            products: vec![
                product("banc-lueur", Category::Seating, true),
                product("fauteuil-ombre", Category::Seating, false),
                product("table-givre", Category::Tables, false),
                product("lampe-mousse", Category::Lighting, false),
            ],
            projects: vec![
                project("maison-vercors", true),
                project("chalet-brouillard", false),
            ],
        }
    }
}

#[async_trait]
impl ContentStore for FakeContentStore {
    async fn products(&self) -> ApiResult<Vec<Product>> {
        Ok(self.products.clone())
    }

    async fn product_by_slug(&self, slug: &str) -> ApiResult<Option<Product>> {
        Ok(self.products.iter().find(|product| product.slug == slug).cloned())
    }

    async fn products_by_category(&self, category: Category) -> ApiResult<Vec<Product>> {
        Ok(self
            .products
            .iter()
            .filter(|product| product.category == category)
            .cloned()
            .collect())
    }

    async fn featured_products(&self) -> ApiResult<Vec<Product>> {
        Ok(self.products.iter().filter(|product| product.featured).cloned().collect())
    }

    async fn similar_products(
        &self,
        slug: &str,
        category: Category,
        limit: usize,
    ) -> ApiResult<Vec<Product>> {
        let mut similar = self.products_by_category(category).await?;
        similar.retain(|product| product.slug != slug);
        similar.truncate(limit);
        Ok(similar)
    }

    async fn projects(&self) -> ApiResult<Vec<Project>> {
        Ok(self.projects.iter().filter(|project| project.published).cloned().collect())
    }

    async fn project_by_slug(&self, slug: &str) -> ApiResult<Option<Project>> {
        Ok(self
            .projects
            .iter()
            .find(|project| project.slug == slug && project.published)
            .cloned())
    }
}

pub fn test_state() -> Arc<AppState> {
    let registry = LocaleRegistry::new(["fr", "en"], "fr").expect("valid test registry");
    Arc::new(AppState {
        config: Config::default(),
        registry,
        content: Arc::new(FakeContentStore::default()),
    })
}

/// Full router wired exactly as in production, backed by the fake store.
pub fn test_app() -> Router {
    create_app(test_state())
}
