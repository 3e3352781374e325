//! Atelier Sauvage content server
//!
//! Backend for the studio's bilingual marketing and catalog site. Owns the
//! locale-prefixed routing (resolver middleware + legacy redirect table),
//! the JSON content API over the headless CMS, and static/app-shell
//! serving. See `conf/config.toml` for runtime configuration.

rust_i18n::i18n!("locales", fallback = "fr");

pub mod config;
pub mod handlers;
pub mod locale;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::{Router, middleware as axum_middleware, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::locale::LocaleRegistry;
use crate::services::ContentStore;

/// Shared application state, immutable after startup.
pub struct AppState {
    pub config: Config,
    pub registry: LocaleRegistry,
    pub content: Arc<dyn ContentStore>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::products::list_products,
        handlers::products::featured_products,
        handlers::products::get_product,
        handlers::products::similar_products,
        handlers::projects::list_projects,
        handlers::projects::get_project,
        handlers::dictionary::get_dictionary_bundle,
        handlers::pages::health,
    ),
    components(schemas(
        models::Product,
        models::Project,
        models::Category,
        models::LocalizedText,
        models::ImageSet,
        handlers::HealthResponse,
        utils::error::ApiErrorResponse,
    )),
    tags(
        (name = "Products", description = "Catalog pieces"),
        (name = "Projects", description = "Interior-design projects"),
        (name = "Dictionaries", description = "UI translation bundles"),
        (name = "Health", description = "Liveness"),
    )
)]
pub struct ApiDoc;

/// Assemble the full router.
///
/// Layering, outermost first: trace, legacy redirects, locale resolver,
/// then routing. The API router carries its own locale extraction and CORS
/// since the resolver bypasses `/api`.
pub fn create_app(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/products", get(handlers::list_products))
        .route("/products/featured", get(handlers::featured_products))
        .route("/products/:slug", get(handlers::get_product))
        .route("/products/:slug/similar", get(handlers::similar_products))
        .route("/projects", get(handlers::list_projects))
        .route("/projects/:slug", get(handlers::get_project))
        .route("/dictionaries/:locale", get(handlers::get_dictionary_bundle))
        .route("/health", get(handlers::health))
        .layer(axum_middleware::from_fn(middleware::api_locale_middleware))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any));

    let mut app = Router::new()
        .nest("/api", api)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/:locale", get(handlers::serve_app_shell))
        .route("/:locale/*rest", get(handlers::serve_app_shell))
        .fallback(handlers::not_found);

    if state.config.static_config.enabled {
        let web_root = &state.config.static_config.web_root;
        app = app
            .nest_service("/assets", ServeDir::new(format!("{web_root}/assets")))
            .nest_service("/images", ServeDir::new(format!("{web_root}/images")))
            .route_service("/favicon.ico", ServeFile::new(format!("{web_root}/favicon.ico")));
    }

    app.layer(axum_middleware::from_fn_with_state(
        state.clone(),
        middleware::locale_router_middleware,
    ))
    .layer(axum_middleware::from_fn(middleware::legacy_redirect_middleware))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
