// Content API assertions over the production router and the fake store.

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use super::common::test_app;

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let response = test_app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .expect("router never errors");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_list_products_returns_full_catalog() {
    let (status, body) = get_json("/api/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_list_products_filters_by_category() {
    let (status, body) = get_json("/api/products?category=seating").await;
    assert_eq!(status, StatusCode::OK);
    let slugs: Vec<&str> =
        body.as_array().unwrap().iter().map(|p| p["slug"].as_str().unwrap()).collect();
    assert_eq!(slugs, vec!["banc-lueur", "fauteuil-ombre"]);
}

#[tokio::test]
async fn test_unknown_category_is_rejected() {
    let (status, body) = get_json("/api/products?category=miroirs").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4002);
}

#[tokio::test]
async fn test_featured_products() {
    let (status, body) = get_json("/api/products/featured").await;
    assert_eq!(status, StatusCode::OK);
    let featured = body.as_array().unwrap();
    assert_eq!(featured.len(), 1);
    assert_eq!(featured[0]["slug"], "banc-lueur");
}

#[tokio::test]
async fn test_product_detail_carries_image_variants() {
    let (status, body) = get_json("/api/products/banc-lueur").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slug"], "banc-lueur");
    assert_eq!(body["name"]["fr"], "banc-lueur (fr)");
    let card = body["images"][0]["card"].as_str().unwrap();
    assert!(card.contains("w_640"));
}

#[tokio::test]
async fn test_unknown_product_is_404_with_code() {
    let (status, body) = get_json("/api/products/piece-disparue").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 2001);
}

#[tokio::test]
async fn test_malformed_slug_is_rejected_before_the_store() {
    let (status, body) = get_json("/api/products/Not%20A%20Slug").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4002);
}

#[tokio::test]
async fn test_similar_excludes_source_piece() {
    let (status, body) = get_json("/api/products/banc-lueur/similar").await;
    assert_eq!(status, StatusCode::OK);
    let slugs: Vec<&str> =
        body.as_array().unwrap().iter().map(|p| p["slug"].as_str().unwrap()).collect();
    assert_eq!(slugs, vec!["fauteuil-ombre"]);
}

#[tokio::test]
async fn test_similar_limit_is_bounded() {
    let (status, body) = get_json("/api/products/banc-lueur/similar?limit=30").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4001);

    let (status, _) = get_json("/api/products/banc-lueur/similar?limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_projects_list_only_published() {
    let (status, body) = get_json("/api/projects").await;
    assert_eq!(status, StatusCode::OK);
    let slugs: Vec<&str> =
        body.as_array().unwrap().iter().map(|p| p["slug"].as_str().unwrap()).collect();
    assert_eq!(slugs, vec!["maison-vercors"]);
}

#[tokio::test]
async fn test_draft_project_detail_is_404() {
    let (status, body) = get_json("/api/projects/chalet-brouillard").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 2002);
}

#[tokio::test]
async fn test_dictionary_bundles_per_locale() {
    let (status, body) = get_json("/api/dictionaries/fr").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nav"]["home"], "Accueil");

    let (status, body) = get_json("/api/dictionaries/en").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nav"]["home"], "Home");

    let (status, body) = get_json("/api/dictionaries/de").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 2003);
}

#[tokio::test]
async fn test_api_errors_follow_accept_language() {
    let request = Request::builder()
        .uri("/api/products/piece-disparue")
        .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
        .body(Body::empty())
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], "Piece not found: piece-disparue");
}

#[tokio::test]
async fn test_health_probe() {
    let (status, body) = get_json("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["name"], "atelier-server");
}
