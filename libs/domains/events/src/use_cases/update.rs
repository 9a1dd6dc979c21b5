use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::error::{EventError, EventResult};
use crate::mapper::apply_update;
use crate::models::Event;
use crate::repository::EventRepository;
use crate::validation::EventValidator;

pub struct UpdateEvent<R: EventRepository> {
    repository: Arc<R>,
    validator: EventValidator<R>,
}

impl<R: EventRepository> UpdateEvent<R> {
    pub fn new(repository: Arc<R>, validator: EventValidator<R>) -> Self {
        Self {
            repository,
            validator,
        }
    }

    /// Overwrite the stored event's fields; `id`, `status` and
    /// `cancel_reason` are kept
    #[instrument(skip(self, event), fields(identifier = %event.identifier))]
    pub async fn execute(&self, event_id: i64, event: Event) -> EventResult<Event> {
        self.update(event_id, event)
            .await
            .map_err(|e| e.or_failure(EventError::UpdateFailed(event_id)))
    }

    async fn update(&self, event_id: i64, event: Event) -> EventResult<Event> {
        self.validator
            .validate_event_update(Some(event_id), &event)
            .await?;

        let Some(existing) = self.repository.find_by_id(event_id).await? else {
            warn!("Event not found for update");
            return Err(EventError::NotFoundForUpdate(event_id));
        };

        let saved = self.repository.save(apply_update(existing, event)).await?;
        info!("Event updated");

        Ok(saved.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventStatus;
    use crate::repository::MockEventRepository;
    use crate::use_cases::test_support::{event, stored};
    use chrono::Duration;
    use sea_orm::TryIntoModel;

    fn use_case(repo: MockEventRepository) -> UpdateEvent<MockEventRepository> {
        let repo = Arc::new(repo);
        UpdateEvent::new(Arc::clone(&repo), EventValidator::new(repo))
    }

    #[tokio::test]
    async fn test_update_preserves_status_and_reason() {
        let mut existing = stored(1, "test-event");
        existing.status = EventStatus::Cancelled;
        existing.cancel_reason = Some("Rain".to_string());

        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_find_by_id()
            .withf(|id| *id == 1)
            .returning(move |_| Ok(Some(existing.clone())));
        mock_repo
            .expect_save()
            .returning(|active| Ok(active.try_into_model()?));

        let mut incoming = event("test-event");
        incoming.name = "Renamed".to_string();
        incoming.status = EventStatus::Open;

        let updated = use_case(mock_repo).execute(1, incoming).await.unwrap();

        assert_eq!(updated.id, Some(1));
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.status, EventStatus::Cancelled);
        assert_eq!(updated.cancel_reason.as_deref(), Some("Rain"));
    }

    #[tokio::test]
    async fn test_invalid_date_range_leaves_store_untouched() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_find_by_id().never();
        mock_repo.expect_save().never();

        let mut incoming = event("test-event");
        incoming.start_at = incoming.end_at + Duration::days(1);

        let err = use_case(mock_repo).execute(1, incoming).await.unwrap_err();
        assert_eq!(err.code(), "event.invalid.date.range");
    }

    #[tokio::test]
    async fn test_missing_event() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));
        mock_repo.expect_save().never();

        let err = use_case(mock_repo)
            .execute(5, event("test-event"))
            .await
            .unwrap_err();
        assert_eq!(err, EventError::NotFoundForUpdate(5));
    }

    #[tokio::test]
    async fn test_store_failure_becomes_update_failed() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|_| Err(EventError::Repository("timeout".into())));

        let err = use_case(mock_repo)
            .execute(3, event("test-event"))
            .await
            .unwrap_err();
        assert_eq!(err, EventError::UpdateFailed(3));
    }

    #[tokio::test]
    async fn test_identifier_clash_passes_through() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|_| Ok(Some(stored(2, "second-event"))));
        mock_repo
            .expect_save()
            .times(1)
            .returning(|_| Err(EventError::IdentifierAlreadyExists("first-event".into())));

        let err = use_case(mock_repo)
            .execute(2, event("first-event"))
            .await
            .unwrap_err();

        assert_eq!(err, EventError::IdentifierAlreadyExists("first-event".into()));
        assert_eq!(err.code(), "event.already.exists");
    }

    #[tokio::test]
    async fn test_invalid_id() {
        let err = use_case(MockEventRepository::new())
            .execute(0, event("test-event"))
            .await
            .unwrap_err();
        assert_eq!(err, EventError::InvalidId(Some(0)));
    }
}
