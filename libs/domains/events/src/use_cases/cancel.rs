use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::error::{EventError, EventResult};
use crate::mapper::apply_cancellation;
use crate::repository::EventRepository;
use crate::validation::EventValidator;

pub struct CancelEvent<R: EventRepository> {
    repository: Arc<R>,
    validator: EventValidator<R>,
}

impl<R: EventRepository> CancelEvent<R> {
    pub fn new(repository: Arc<R>, validator: EventValidator<R>) -> Self {
        Self {
            repository,
            validator,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, event_id: i64, reason: Option<String>) -> EventResult<()> {
        self.cancel(event_id, reason)
            .await
            .map_err(|e| e.or_failure(EventError::CancellationFailed(event_id)))
    }

    async fn cancel(&self, event_id: i64, reason: Option<String>) -> EventResult<()> {
        self.validator
            .validate_event_cancellation(Some(event_id), reason.as_deref())?;
        let reason = reason.unwrap_or_default();

        let Some(existing) = self.repository.find_by_id(event_id).await? else {
            warn!("Event not found for cancellation");
            return Err(EventError::NotFoundForCancellation(event_id));
        };

        self.repository
            .save(apply_cancellation(existing, reason))
            .await?;
        info!("Event cancelled");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventStatus;
    use crate::repository::MockEventRepository;
    use crate::use_cases::test_support::stored;
    use sea_orm::TryIntoModel;

    fn use_case(repo: MockEventRepository) -> CancelEvent<MockEventRepository> {
        let repo = Arc::new(repo);
        CancelEvent::new(Arc::clone(&repo), EventValidator::new(repo))
    }

    #[tokio::test]
    async fn test_cancel_sets_status_and_reason() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|id| Ok(Some(stored(id, "test-event"))));
        mock_repo
            .expect_save()
            .withf(|active| {
                let model = active.clone().try_into_model().unwrap();
                model.status == EventStatus::Cancelled
                    && model.cancel_reason.as_deref() == Some("Speaker ill")
            })
            .times(1)
            .returning(|active| Ok(active.try_into_model()?));

        use_case(mock_repo)
            .execute(1, Some("Speaker ill".to_string()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_empty_reason_is_rejected() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_find_by_id().never();

        let err = use_case(mock_repo)
            .execute(1, Some(String::new()))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "event.cancel.reason.required");
    }

    #[tokio::test]
    async fn test_missing_event() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));

        let err = use_case(mock_repo)
            .execute(8, Some("reason".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "event.delete.not.found");
    }

    #[tokio::test]
    async fn test_store_failure_becomes_cancellation_failed() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|id| Ok(Some(stored(id, "test-event"))));
        mock_repo
            .expect_save()
            .returning(|_| Err(EventError::Repository("deadlock".into())));

        let err = use_case(mock_repo)
            .execute(2, Some("reason".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err, EventError::CancellationFailed(2));
    }
}
