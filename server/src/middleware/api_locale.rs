//! API locale extraction middleware
//!
//! The JSON API sits under `/api` and is excluded from the locale router, so
//! error messages fall back to the Accept-Language header. Extracts the
//! locale and sets it for the current request context.

use axum::{
    extract::Request, http::header::ACCEPT_LANGUAGE, middleware::Next, response::Response,
};

use crate::utils::{extract_locale_from_header, set_locale};

/// Middleware to localize API responses from the Accept-Language header
pub async fn api_locale_middleware(req: Request, next: Next) -> Response {
    let locale = req
        .headers()
        .get(ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok());

    let locale = extract_locale_from_header(locale);

    // Set locale for current thread
    set_locale(&locale);

    next.run(req).await
}
