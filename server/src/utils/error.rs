use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_i18n::t;
use serde::Serialize;
use thiserror::Error;

use super::i18n::get_locale;

/// API Error with rich context and automatic error trait implementations
///
/// Design: Uses thiserror for ergonomic error handling with context.
/// Each variant carries meaningful context to help with debugging.
#[derive(Error, Debug)]
pub enum ApiError {
    // Content errors 2xxx
    #[error("Product '{slug}' not found")]
    ProductNotFound { slug: String },

    #[error("Project '{slug}' not found")]
    ProjectNotFound { slug: String },

    #[error("No dictionary for locale '{locale}'")]
    DictionaryNotFound { locale: String },

    // Content store errors 3xxx
    #[error("Content store request failed: {message}")]
    ContentStoreFailed { message: String },

    #[error("Content store returned an unexpected payload: {message}")]
    ContentStoreMalformed { message: String },

    // Validation errors 4xxx
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // System errors 5xxx
    #[error("Internal error: {0}")]
    InternalError(String),

    // Generic wrapper for other errors - auto-convert from anyhow::Error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// Helper to create product not found error
    pub fn product_not_found(slug: impl Into<String>) -> Self {
        Self::ProductNotFound { slug: slug.into() }
    }

    /// Helper to create project not found error
    pub fn project_not_found(slug: impl Into<String>) -> Self {
        Self::ProjectNotFound { slug: slug.into() }
    }

    /// Helper to create content store failure
    pub fn content_store_failed(message: impl Into<String>) -> Self {
        Self::ContentStoreFailed { message: message.into() }
    }

    /// Helper to create validation error
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// Helper to create invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Helper to create internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }

    /// Stable numeric code carried in every error body
    pub fn error_code(&self) -> i32 {
        match self {
            // Content errors 2xxx
            Self::ProductNotFound { .. } => 2001,
            Self::ProjectNotFound { .. } => 2002,
            Self::DictionaryNotFound { .. } => 2003,

            // Content store errors 3xxx
            Self::ContentStoreFailed { .. } => 3001,
            Self::ContentStoreMalformed { .. } => 3002,

            // Validation errors 4xxx
            Self::ValidationError(_) => 4001,
            Self::InvalidInput(_) => 4002,

            // System errors 5xxx
            Self::InternalError(_) => 5001,
            Self::Other(_) => 5001,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ApiErrorResponse {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Get localized error message based on current locale
    pub fn localized_message(&self) -> String {
        let locale = get_locale();
        match self {
            Self::ProductNotFound { slug } => {
                t!("content.product_not_found", locale = &locale, slug = slug).to_string()
            }
            Self::ProjectNotFound { slug } => {
                t!("content.project_not_found", locale = &locale, slug = slug).to_string()
            }
            Self::DictionaryNotFound { locale: requested } => {
                t!("content.dictionary_not_found", locale = &locale, requested = requested)
                    .to_string()
            }
            Self::ContentStoreFailed { message } => {
                t!("content_store.failed", locale = &locale, message = message).to_string()
            }
            Self::ContentStoreMalformed { message } => {
                t!("content_store.malformed", locale = &locale, message = message).to_string()
            }
            Self::ValidationError(details) => {
                t!("validation.failed", locale = &locale, details = details).to_string()
            }
            Self::InvalidInput(msg) => msg.clone(),
            Self::InternalError(msg) => {
                t!("internal.error", locale = &locale, message = msg).to_string()
            }
            Self::Other(err) => {
                t!("internal.error", locale = &locale, message = err.to_string()).to_string()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.error_code();
        let message = self.localized_message();

        let status = match code {
            2001..=2999 => StatusCode::NOT_FOUND,
            3001..=3999 => StatusCode::BAD_GATEWAY,
            4001..=4999 => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let response = ApiErrorResponse { code, message, details: None };

        (status, Json(response)).into_response()
    }
}

/// Implement From for serde_json::Error
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::ContentStoreMalformed { message: err.to_string() }
    }
}

/// Implement From for reqwest::Error
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::content_store_failed(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
