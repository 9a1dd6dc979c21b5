use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use thiserror::Error;

/// Every failure the events domain can report.
///
/// Business variants describe a rejected request and pass through the use
/// cases untouched. `Repository` is an unexpected store failure; each use
/// case replaces it with its own `*Failed` variant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EventError {
    #[error("An event with identifier '{0}' already exists")]
    IdentifierAlreadyExists(String),

    #[error("Invalid event id: {}", format_id(.0))]
    InvalidId(Option<i64>),

    #[error("Event start ({start_at}) must not be after its end ({end_at})")]
    InvalidDateRange {
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    },

    #[error("Event capacity must be greater than zero, got {0}")]
    InvalidCapacity(i32),

    #[error("A cancellation reason is required")]
    CancelReasonRequired,

    #[error("Event {0} not found")]
    NotFound(i64),

    #[error("Event {0} not found for update")]
    NotFoundForUpdate(i64),

    #[error("Event {0} not found for cancellation")]
    NotFoundForCancellation(i64),

    #[error("Failed to create event")]
    CreationFailed,

    #[error("Failed to update event {0}")]
    UpdateFailed(i64),

    #[error("Failed to cancel event {0}")]
    CancellationFailed(i64),

    #[error("Failed to retrieve events")]
    RetrievalFailed,

    #[error("Failed to retrieve events by filter")]
    FilterRetrievalFailed,

    #[error("Repository error: {0}")]
    Repository(String),
}

fn format_id(id: &Option<i64>) -> String {
    id.map_or_else(|| "none".to_string(), |id| id.to_string())
}

pub type EventResult<T> = Result<T, EventError>;

impl EventError {
    /// Stable dotted code sent to clients
    pub fn code(&self) -> &'static str {
        match self {
            Self::IdentifierAlreadyExists(_) => "event.already.exists",
            Self::InvalidId(_) => "event.id.invalid",
            Self::InvalidDateRange { .. } => "event.invalid.date.range",
            Self::InvalidCapacity(_) => "event.invalid.capacity",
            Self::CancelReasonRequired => "event.cancel.reason.required",
            Self::NotFound(_) => "event.not.found",
            Self::NotFoundForUpdate(_) => "event.update.not.found",
            Self::NotFoundForCancellation(_) => "event.delete.not.found",
            Self::CreationFailed => "event.creation.failed",
            Self::UpdateFailed(_) => "event.update.failed",
            Self::CancellationFailed(_) => "event.cancellation.failed",
            Self::RetrievalFailed => "event.retrieval.failed",
            Self::FilterRetrievalFailed => "event.filter.retrieval.failed",
            Self::Repository(_) => "event.repository.error",
        }
    }

    /// Positional message arguments, in the order they appear in the message
    pub fn args(&self) -> Vec<String> {
        match self {
            Self::IdentifierAlreadyExists(identifier) => vec![identifier.clone()],
            Self::InvalidId(id) => vec![format_id(id)],
            Self::InvalidDateRange { start_at, end_at } => {
                vec![start_at.to_rfc3339(), end_at.to_rfc3339()]
            }
            Self::InvalidCapacity(capacity) => vec![capacity.to_string()],
            Self::NotFound(id)
            | Self::NotFoundForUpdate(id)
            | Self::NotFoundForCancellation(id)
            | Self::UpdateFailed(id)
            | Self::CancellationFailed(id) => vec![id.to_string()],
            Self::Repository(details) => vec![details.clone()],
            Self::CancelReasonRequired
            | Self::CreationFailed
            | Self::RetrievalFailed
            | Self::FilterRetrievalFailed => Vec::new(),
        }
    }

    /// Rejections caused by the request itself, as opposed to failures
    pub fn is_business(&self) -> bool {
        matches!(
            self,
            Self::IdentifierAlreadyExists(_)
                | Self::InvalidId(_)
                | Self::InvalidDateRange { .. }
                | Self::InvalidCapacity(_)
                | Self::CancelReasonRequired
                | Self::NotFound(_)
                | Self::NotFoundForUpdate(_)
                | Self::NotFoundForCancellation(_)
        )
    }

    /// Keep business errors; log anything else and report `failure` instead
    pub(crate) fn or_failure(self, failure: EventError) -> EventError {
        if self.is_business() {
            return self;
        }
        tracing::error!(error = %self, code = failure.code(), "Unexpected error");
        failure
    }
}

impl From<DbErr> for EventError {
    fn from(err: DbErr) -> Self {
        EventError::Repository(err.to_string())
    }
}

/// Convert EventError to AppError for standardized error responses
impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        let code = err.code();
        let message = err.to_string();
        match err {
            EventError::InvalidId(_)
            | EventError::InvalidDateRange { .. }
            | EventError::InvalidCapacity(_)
            | EventError::CancelReasonRequired => AppError::bad_request(code, message),
            EventError::NotFound(_)
            | EventError::NotFoundForUpdate(_)
            | EventError::NotFoundForCancellation(_) => AppError::not_found(code, message),
            EventError::IdentifierAlreadyExists(_) => AppError::conflict(code, message),
            EventError::CreationFailed
            | EventError::UpdateFailed(_)
            | EventError::CancellationFailed(_)
            | EventError::RetrievalFailed
            | EventError::FilterRetrievalFailed
            | EventError::Repository(_) => AppError::internal(code, message),
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (EventError::InvalidId(None), StatusCode::BAD_REQUEST),
            (EventError::CancelReasonRequired, StatusCode::BAD_REQUEST),
            (EventError::NotFound(1), StatusCode::NOT_FOUND),
            (EventError::NotFoundForCancellation(1), StatusCode::NOT_FOUND),
            (
                EventError::IdentifierAlreadyExists("x".into()),
                StatusCode::CONFLICT,
            ),
            (EventError::UpdateFailed(1), StatusCode::INTERNAL_SERVER_ERROR),
            (
                EventError::FilterRetrievalFailed,
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(AppError::from(error.clone()).status(), status, "{error:?}");
        }
    }

    #[test]
    fn test_codes_and_args() {
        assert_eq!(
            EventError::NotFoundForCancellation(7).code(),
            "event.delete.not.found"
        );
        assert_eq!(EventError::NotFound(999).args(), vec!["999".to_string()]);
        assert_eq!(EventError::InvalidId(None).args(), vec!["none".to_string()]);
        assert!(EventError::CancelReasonRequired.args().is_empty());
    }

    #[test]
    fn test_or_failure_keeps_business_errors() {
        let business = EventError::NotFound(3).or_failure(EventError::RetrievalFailed);
        assert_eq!(business, EventError::NotFound(3));

        let unexpected =
            EventError::Repository("timeout".into()).or_failure(EventError::RetrievalFailed);
        assert_eq!(unexpected, EventError::RetrievalFailed);
    }

    #[test]
    fn test_db_errors_become_repository_errors() {
        let err: EventError = DbErr::Custom("boom".into()).into();
        assert!(matches!(err, EventError::Repository(_)));
        assert!(!err.is_business());
    }
}
