use std::sync::Arc;
use tracing::{debug, instrument};

use crate::error::{EventError, EventResult};
use crate::models::Event;
use crate::repository::EventRepository;
use crate::validation::EventValidator;

pub struct GetEventById<R: EventRepository> {
    repository: Arc<R>,
    validator: EventValidator<R>,
}

impl<R: EventRepository> GetEventById<R> {
    pub fn new(repository: Arc<R>, validator: EventValidator<R>) -> Self {
        Self {
            repository,
            validator,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, event_id: i64) -> EventResult<Event> {
        self.get(event_id)
            .await
            .map_err(|e| e.or_failure(EventError::RetrievalFailed))
    }

    async fn get(&self, event_id: i64) -> EventResult<Event> {
        let event_id = self.validator.validate_id(Some(event_id))?;

        let model = self
            .repository
            .find_by_id(event_id)
            .await?
            .ok_or(EventError::NotFound(event_id))?;
        debug!("Event found");

        Ok(model.into())
    }
}
