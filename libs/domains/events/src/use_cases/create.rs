use std::sync::Arc;
use tracing::{info, instrument};

use crate::error::{EventError, EventResult};
use crate::models::Event;
use crate::repository::EventRepository;
use crate::validation::EventValidator;

pub struct CreateEvent<R: EventRepository> {
    repository: Arc<R>,
    validator: EventValidator<R>,
}

impl<R: EventRepository> CreateEvent<R> {
    pub fn new(repository: Arc<R>, validator: EventValidator<R>) -> Self {
        Self {
            repository,
            validator,
        }
    }

    #[instrument(skip_all, fields(identifier = %event.identifier))]
    pub async fn execute(&self, event: Event) -> EventResult<Event> {
        self.create(event)
            .await
            .map_err(|e| e.or_failure(EventError::CreationFailed))
    }

    async fn create(&self, event: Event) -> EventResult<Event> {
        self.validator.validate_event_creation(&event).await?;

        let saved = self.repository.save(event.into()).await?;
        info!(event_id = saved.id, "Event created");

        Ok(saved.into())
    }
}
