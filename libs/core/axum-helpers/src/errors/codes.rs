//! Error codes for failures raised by the HTTP layer itself.
//!
//! Domain crates use their own dotted codes (e.g. `event.not.found`); these
//! cover what happens before a request reaches a handler.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationFailed;
//! assert_eq!(code.as_str(), "request.validation.failed");
//! assert_eq!(code.status().as_u16(), 400);
//! ```

use axum::http::StatusCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Body failed `validator` rules
    ValidationFailed,
    /// A single field failed validation (used inside `details`)
    InvalidField,
    /// Body is not valid JSON or does not match the expected shape
    InvalidJson,
    /// Path parameter could not be parsed
    InvalidPath,
    /// Query string could not be deserialized
    InvalidQuery,
    /// No route matched
    NotFound,
    InternalError,
    ServiceUnavailable,
}

impl ErrorCode {
    /// Dotted identifier sent to clients
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "request.validation.failed",
            Self::InvalidField => "request.field.invalid",
            Self::InvalidJson => "request.body.invalid",
            Self::InvalidPath => "request.path.invalid",
            Self::InvalidQuery => "request.query.invalid",
            Self::NotFound => "resource.not.found",
            Self::InternalError => "internal.error",
            Self::ServiceUnavailable => "service.unavailable",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::ValidationFailed
            | Self::InvalidField
            | Self::InvalidJson
            | Self::InvalidPath
            | Self::InvalidQuery => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "Request validation failed",
            Self::InvalidField => "Invalid value",
            Self::InvalidJson => "Request body is not valid JSON",
            Self::InvalidPath => "Invalid path parameter",
            Self::InvalidQuery => "Invalid query parameters",
            Self::NotFound => "The requested resource was not found",
            Self::InternalError => "An internal server error occurred",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_errors_are_bad_request() {
        for code in [
            ErrorCode::ValidationFailed,
            ErrorCode::InvalidJson,
            ErrorCode::InvalidPath,
            ErrorCode::InvalidQuery,
        ] {
            assert_eq!(code.status(), StatusCode::BAD_REQUEST, "{code}");
        }
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(ErrorCode::NotFound.to_string(), "resource.not.found");
        assert_eq!(ErrorCode::InternalError.status().as_u16(), 500);
    }
}
