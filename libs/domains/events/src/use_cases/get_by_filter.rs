use std::sync::Arc;
use tracing::{debug, instrument};

use crate::error::{EventError, EventResult};
use crate::filter::EventFilter;
use crate::models::Event;
use crate::pagination::{Page, PageRequest};
use crate::repository::EventRepository;

pub struct GetEventsByFilter<R: EventRepository> {
    repository: Arc<R>,
}

impl<R: EventRepository> GetEventsByFilter<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// A missing filter returns the unfiltered page
    #[instrument(skip(self, filter), fields(page = page.page, size = page.size))]
    pub async fn execute(
        &self,
        filter: Option<EventFilter>,
        page: PageRequest,
    ) -> EventResult<Page<Event>> {
        let filter = filter.unwrap_or_default();
        debug!(criteria = filter.criteria().len(), "Searching events");

        let result = self
            .repository
            .find_by_filters(&filter, page)
            .await
            .map_err(|e| e.or_failure(EventError::FilterRetrievalFailed))?;

        Ok(result.map(Event::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryEventRepository, MockEventRepository};
    use crate::use_cases::test_support::event;

    async fn seeded() -> Arc<InMemoryEventRepository> {
        let repo = InMemoryEventRepository::new();
        for (identifier, capacity) in [("small", 10), ("medium", 50), ("large", 200)] {
            let mut e = event(identifier);
            e.capacity = capacity;
            repo.save(e.into()).await.unwrap();
        }
        Arc::new(repo)
    }

    #[tokio::test]
    async fn test_capacity_min_filter() {
        let filter = EventFilter {
            capacity_min: Some(50),
            ..Default::default()
        };

        let page = GetEventsByFilter::new(seeded().await)
            .execute(Some(filter), PageRequest::default())
            .await
            .unwrap();

        let identifiers: Vec<_> = page.content.iter().map(|e| e.identifier.as_str()).collect();
        assert_eq!(identifiers, vec!["medium", "large"]);
    }

    #[tokio::test]
    async fn test_empty_filter_returns_everything() {
        let search = GetEventsByFilter::new(seeded().await);

        let without = search.execute(None, PageRequest::default()).await.unwrap();
        let empty = search
            .execute(Some(EventFilter::default()), PageRequest::default())
            .await
            .unwrap();

        assert_eq!(without.total_elements, 3);
        assert_eq!(empty, without);
    }

    #[tokio::test]
    async fn test_store_failure_becomes_filter_retrieval_failed() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_find_by_filters()
            .returning(|_, _| Err(EventError::Repository("bad sql".into())));

        let err = GetEventsByFilter::new(Arc::new(mock_repo))
            .execute(None, PageRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err, EventError::FilterRetrievalFailed);
    }
}
