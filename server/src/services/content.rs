//! Content store seam
//!
//! The site's catalog lives in a headless CMS. Handlers depend on this
//! trait, not on the concrete client, so tests run against an in-memory
//! fake and the cache wraps any implementation.

use async_trait::async_trait;

use crate::models::{Category, Product, Project};
use crate::utils::ApiResult;

/// Read-only view of the product and project databases.
///
/// Every operation may legitimately return an empty collection; `None`
/// from the by-slug lookups means the record does not exist, which the
/// handler layer turns into a 404.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn products(&self) -> ApiResult<Vec<Product>>;

    async fn product_by_slug(&self, slug: &str) -> ApiResult<Option<Product>>;

    async fn products_by_category(&self, category: Category) -> ApiResult<Vec<Product>>;

    async fn featured_products(&self) -> ApiResult<Vec<Product>>;

    /// Other pieces from the same category, excluding `slug`, at most
    /// `limit` entries.
    async fn similar_products(
        &self,
        slug: &str,
        category: Category,
        limit: usize,
    ) -> ApiResult<Vec<Product>>;

    async fn projects(&self) -> ApiResult<Vec<Project>>;

    async fn project_by_slug(&self, slug: &str) -> ApiResult<Option<Project>>;
}
