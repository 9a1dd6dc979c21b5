pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Standard error body returned by every failing endpoint.
///
/// - `status`: HTTP status code, repeated in the body
/// - `timestamp`: when the error was produced (UTC)
/// - `code`: stable dotted identifier (e.g. `event.not.found`)
/// - `message`: human readable description
/// - `details`: nested errors of the same shape, e.g. one per invalid field
///
/// # JSON Example
///
/// ```json
/// {
///   "status": 400,
///   "timestamp": "2025-03-01T10:00:00Z",
///   "code": "request.validation.failed",
///   "message": "Request validation failed",
///   "details": [
///     { "status": 400, "timestamp": "2025-03-01T10:00:00Z",
///       "code": "name.length", "message": "Name must be between 3 and 255 characters" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub status: u16,
    pub timestamp: DateTime<Utc>,
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schema(no_recursion)]
    pub details: Vec<ErrorResponse>,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            timestamp: Utc::now(),
            code: code.into(),
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: Vec<ErrorResponse>) -> Self {
        self.details = details;
        self
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// Extractor rejections and `validator` failures convert with `?`; domain
/// crates map their own errors onto the coded variants.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Query extraction error: {0}")]
    QueryExtractorRejection(#[from] QueryRejection),

    #[error("Path extraction error: {0}")]
    PathExtractorRejection(#[from] PathRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Bad Request [{code}]: {message}")]
    BadRequest { code: String, message: String },

    #[error("Not Found [{code}]: {message}")]
    NotFound { code: String, message: String },

    #[error("Conflict [{code}]: {message}")]
    Conflict { code: String, message: String },

    #[error("Internal Server Error [{code}]: {message}")]
    InternalServerError { code: String, message: String },

    #[error("Service Unavailable [{code}]: {message}")]
    ServiceUnavailable { code: String, message: String },
}

impl AppError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn conflict(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conflict {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InternalServerError {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            code: ErrorCode::ServiceUnavailable.as_str().to_string(),
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            // Missing fields and wrong types report 400 like any other bad input
            AppError::JsonExtractorRejection(e) => match e.status() {
                StatusCode::UNPROCESSABLE_ENTITY => StatusCode::BAD_REQUEST,
                status => status,
            },
            AppError::QueryExtractorRejection(_)
            | AppError::PathExtractorRejection(_)
            | AppError::ValidationError(_)
            | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Render the error body without logging
    pub fn to_error_response(&self) -> ErrorResponse {
        let status = self.status();
        match self {
            AppError::JsonExtractorRejection(e) => {
                ErrorResponse::new(status, ErrorCode::InvalidJson.as_str(), e.body_text())
            }
            AppError::QueryExtractorRejection(e) => {
                ErrorResponse::new(status, ErrorCode::InvalidQuery.as_str(), e.body_text())
            }
            AppError::PathExtractorRejection(e) => {
                ErrorResponse::new(status, ErrorCode::InvalidPath.as_str(), e.body_text())
            }
            AppError::ValidationError(e) => ErrorResponse::new(
                status,
                ErrorCode::ValidationFailed.as_str(),
                ErrorCode::ValidationFailed.default_message(),
            )
            .with_details(field_error_details(e)),
            AppError::BadRequest { code, message }
            | AppError::NotFound { code, message }
            | AppError::Conflict { code, message }
            | AppError::InternalServerError { code, message }
            | AppError::ServiceUnavailable { code, message } => {
                ErrorResponse::new(status, code.as_str(), message.as_str())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = self.to_error_response();

        match &self {
            AppError::InternalServerError { .. } => {
                tracing::error!(error_code = %body.code, "{}", self);
            }
            AppError::ServiceUnavailable { .. } | AppError::JsonExtractorRejection(_) => {
                tracing::warn!(error_code = %body.code, "{}", self);
            }
            _ => {
                tracing::info!(error_code = %body.code, "{}", self);
            }
        }

        body.into_response()
    }
}

/// One `details` entry per failing field rule, ordered by field name
fn field_error_details(errors: &ValidationErrors) -> Vec<ErrorResponse> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                ErrorResponse::new(
                    StatusCode::BAD_REQUEST,
                    format!("{}.{}", field, error.code),
                    message,
                )
            })
        })
        .collect()
}
