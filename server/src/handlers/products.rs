use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::AppState;
use crate::models::Product;
use crate::utils::{ApiError, ApiResult, is_valid_slug};

const DEFAULT_SIMILAR_LIMIT: usize = 4;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListProductsQuery {
    /// Restrict the listing to one catalog section.
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, Validate, utoipa::IntoParams)]
pub struct SimilarQuery {
    /// How many related pieces to return (1..=12, default 4).
    #[validate(range(min = 1, max = 12))]
    pub limit: Option<u64>,
}

/// List catalog pieces, optionally filtered by category
#[utoipa::path(
    get,
    path = "/api/products",
    params(ListProductsQuery),
    responses(
        (status = 200, description = "Catalog listing", body = Vec<Product>),
        (status = 400, description = "Unknown category"),
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListProductsQuery>,
) -> ApiResult<Json<Vec<Product>>> {
    let products = match query.category {
        Some(raw) => {
            let category = raw.parse().map_err(|e: String| ApiError::invalid_input(e))?;
            tracing::debug!("Listing products in category {}", category);
            state.content.products_by_category(category).await?
        },
        None => {
            tracing::debug!("Listing full catalog");
            state.content.products().await?
        },
    };
    tracing::debug!("Retrieved {} products", products.len());
    Ok(Json(products))
}

/// List pieces curated for the home page
#[utoipa::path(
    get,
    path = "/api/products/featured",
    responses(
        (status = 200, description = "Featured pieces", body = Vec<Product>)
    ),
    tag = "Products"
)]
pub async fn featured_products(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Product>>> {
    let products = state.content.featured_products().await?;
    tracing::debug!("Retrieved {} featured products", products.len());
    Ok(Json(products))
}

/// Get a single catalog piece
#[utoipa::path(
    get,
    path = "/api/products/{slug}",
    responses(
        (status = 200, description = "Product detail", body = Product),
        (status = 400, description = "Malformed slug"),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Product>> {
    check_slug(&slug)?;
    tracing::debug!("Fetching product slug={}", slug);
    let product = state
        .content
        .product_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::product_not_found(&slug))?;
    Ok(Json(product))
}

/// Other pieces from the same category
#[utoipa::path(
    get,
    path = "/api/products/{slug}/similar",
    params(SimilarQuery),
    responses(
        (status = 200, description = "Related pieces", body = Vec<Product>),
        (status = 400, description = "Malformed slug or limit out of range"),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn similar_products(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(query): Query<SimilarQuery>,
) -> ApiResult<Json<Vec<Product>>> {
    check_slug(&slug)?;
    query.validate().map_err(|e| ApiError::validation_error(e.to_string()))?;
    let limit = query.limit.map(|limit| limit as usize).unwrap_or(DEFAULT_SIMILAR_LIMIT);

    let product = state
        .content
        .product_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::product_not_found(&slug))?;

    let similar = state.content.similar_products(&slug, product.category, limit).await?;
    tracing::debug!("Retrieved {} pieces similar to {}", similar.len(), slug);
    Ok(Json(similar))
}

fn check_slug(slug: &str) -> ApiResult<()> {
    if is_valid_slug(slug) {
        Ok(())
    } else {
        Err(ApiError::invalid_input(format!("malformed slug: {}", slug)))
    }
}
