use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_i18n::t;
use serde::Serialize;
use thiserror::Error;

use super::i18n::current_locale;

/// API error taxonomy.
///
/// The only failure a well-behaved client can trigger on the prompt path is
/// `ValidationError` (empty tag selection). Every other irregular input is
/// normalized rather than rejected: an unknown dialect renders as
/// `standard`, a missing weight is 1.0, missing style/negative text is
/// empty. A bad render costs a cosmetic prompt string, not persisted state,
/// so best-effort output wins over strict rejection.
#[derive(Error, Debug)]
pub enum ApiError {
    // Resource errors 3xxx
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    // Validation errors 4xxx
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // System errors 5xxx
    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    // Generic wrapper for other errors - auto-convert from anyhow::Error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// Helper to create validation error
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// Helper to create invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Helper to create not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::ResourceNotFound(message.into())
    }

    /// Helper to create internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }

    /// Helper to create catalog unavailable error
    pub fn catalog_unavailable(message: impl Into<String>) -> Self {
        Self::CatalogUnavailable(message.into())
    }

    /// Stable numeric error code carried in every error response
    pub fn error_code(&self) -> i32 {
        match self {
            // Resource errors 3xxx
            Self::ResourceNotFound(_) => 3000,

            // Validation errors 4xxx
            Self::ValidationError(_) => 4001,
            Self::InvalidInput(_) => 4002,

            // System errors 5xxx
            Self::InternalError(_) => 5001,
            Self::CatalogUnavailable(_) => 5002,
            Self::Other(_) => 5001,
        }
    }

    /// Get localized error message based on current request locale
    pub fn localized_message(&self) -> String {
        let locale = current_locale().as_str();
        match self {
            Self::ResourceNotFound(name) => {
                t!("resource.not_found", locale = locale, name = name).to_string()
            }
            Self::ValidationError(details) => {
                t!("validation.failed", locale = locale, details = details).to_string()
            }
            Self::InvalidInput(msg) => msg.clone(),
            Self::InternalError(msg) => {
                t!("internal.error", locale = locale, message = msg).to_string()
            }
            Self::CatalogUnavailable(msg) => {
                t!("catalog.unavailable", locale = locale, message = msg).to_string()
            }
            Self::Other(err) => {
                t!("internal.error", locale = locale, message = err.to_string()).to_string()
            }
        }
    }
}

/// Wire shape of every error response
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.error_code();
        let message = self.localized_message();

        let status = match code {
            3000..=3999 => StatusCode::NOT_FOUND,
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
        ApiError::internal_error(format!("JSON serialization error: {}", err))
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::catalog_unavailable(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
