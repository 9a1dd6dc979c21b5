use std::sync::Arc;
use tracing::{debug, instrument};

use crate::error::{EventError, EventResult};
use crate::models::Event;
use crate::pagination::{Page, PageRequest};
use crate::repository::EventRepository;

pub struct GetAllEvents<R: EventRepository> {
    repository: Arc<R>,
}

impl<R: EventRepository> GetAllEvents<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self), fields(page = page.page, size = page.size))]
    pub async fn execute(&self, page: PageRequest) -> EventResult<Page<Event>> {
        let result = self
            .repository
            .find_all(page)
            .await
            .map_err(|e| e.or_failure(EventError::RetrievalFailed))?;
        debug!(total = result.total_elements, "Events retrieved");

        Ok(result.map(Event::from))
    }
}
