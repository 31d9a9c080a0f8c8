//! Application error type shared by every layer.
//!
//! Token and URL validation failures and missing links are "soft" errors that
//! map to user-facing messages. Storage failures are reported as a generic
//! internal error; the underlying detail is only written to the log.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::utils::token_codec::CodecError;
use crate::utils::url_normalizer::UrlNormalizationError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload returned to API clients.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The token contains characters outside the alphabet or overflows the key space.
    #[error("Invalid link ID format")]
    InvalidToken(#[from] CodecError),

    /// The token is well-formed but no link was ever stored under its key.
    #[error("That link doesn't exist")]
    NotFound { token: String },

    #[error("You must enter a URL")]
    EmptyUrl,

    #[error("Invalid URL: {reason}")]
    InvalidUrl { reason: String },

    #[error("An error occurred parsing the URL: {0}")]
    Parse(#[source] url::ParseError),

    /// Request body failed declarative validation.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Connectivity or query failure in the storage layer.
    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl AppError {
    pub fn not_found(token: impl Into<String>) -> Self {
        Self::NotFound {
            token: token.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidToken(_)
            | AppError::EmptyUrl
            | AppError::InvalidUrl { .. }
            | AppError::Parse(_)
            | AppError::Validation { .. } => StatusCode::BAD_REQUEST,
        }
    }

    /// Converts the error into the payload sent to clients.
    ///
    /// Storage errors never expose their internal message.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::InvalidToken(e) => (
                "invalid_token",
                self.to_string(),
                json!({ "reason": e.to_string() }),
            ),
            AppError::NotFound { token } => {
                ("not_found", self.to_string(), json!({ "token": token }))
            }
            AppError::EmptyUrl => ("empty_url", self.to_string(), json!({})),
            AppError::InvalidUrl { reason } => (
                "invalid_url",
                "Invalid URL".to_string(),
                json!({ "reason": reason }),
            ),
            AppError::Parse(e) => (
                "parse_error",
                "An error occurred parsing the URL".to_string(),
                json!({ "reason": e.to_string() }),
            ),
            AppError::Validation { message, details } => {
                ("validation_error", message.clone(), details.clone())
            }
            AppError::Storage { .. } => ("internal_error", "An error occurred".to_string(), json!({})),
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Storage { message } = &self {
            tracing::error!(error = %message, "request failed with storage error");
        }

        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::storage(e.to_string())
    }
}

impl From<UrlNormalizationError> for AppError {
    fn from(e: UrlNormalizationError) -> Self {
        match e {
            UrlNormalizationError::Empty => AppError::EmptyUrl,
            UrlNormalizationError::Parse(source) => AppError::Parse(source),
            other => AppError::InvalidUrl {
                reason: other.to_string(),
            },
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request("Request validation failed", json!(e))
    }
}
