//! Numeric id path parameter extractor.

use crate::errors::{AppError, ErrorCode};
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Extractor for `i64` path ids.
///
/// Only the syntax is checked here; whether the id is positive is a domain
/// rule.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::extractors::IdPath;
///
/// async fn get_event(IdPath(id): IdPath) -> String {
///     format!("Event ID: {}", id)
/// }
///
/// let app = Router::new().route("/events/{id}", get(get_event));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;

        raw.parse::<i64>().map(IdPath).map_err(|_| {
            AppError::bad_request(
                ErrorCode::InvalidPath.as_str(),
                format!("Invalid id: {}", raw),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use tower::ServiceExt;

    async fn handler(IdPath(id): IdPath) -> String {
        id.to_string()
    }

    async fn call(uri: &str) -> StatusCode {
        Router::new()
            .route("/items/{id}", get(handler))
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_numeric_ids_are_accepted() {
        assert_eq!(call("/items/42").await, StatusCode::OK);
        assert_eq!(call("/items/-1").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_bad_request() {
        assert_eq!(call("/items/abc").await, StatusCode::BAD_REQUEST);
    }
}
