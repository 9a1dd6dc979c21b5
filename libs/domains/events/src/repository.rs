use async_trait::async_trait;
use sea_orm::ActiveValue;
use sea_orm::TryIntoModel;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::entity::{ActiveModel, Model};
use crate::error::{EventError, EventResult};
use crate::filter::EventFilter;
use crate::pagination::{Page, PageRequest, SortField};

/// Repository trait for Event persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Insert when `id` is not set, update otherwise
    async fn save(&self, event: ActiveModel) -> EventResult<Model>;

    async fn find_by_id(&self, id: i64) -> EventResult<Option<Model>>;

    async fn find_all(&self, page: PageRequest) -> EventResult<Page<Model>>;

    async fn exists_by_identifier(&self, identifier: &str) -> EventResult<bool>;

    async fn find_by_filters(
        &self,
        filter: &EventFilter,
        page: PageRequest,
    ) -> EventResult<Page<Model>>;
}

/// The identifier carried by an active model, if any
pub(crate) fn active_identifier(event: &ActiveModel) -> Option<String> {
    match &event.identifier {
        ActiveValue::Set(identifier) | ActiveValue::Unchanged(identifier) => {
            Some(identifier.clone())
        }
        ActiveValue::NotSet => None,
    }
}

/// In-memory implementation of EventRepository (for development/testing)
#[derive(Debug, Clone)]
pub struct InMemoryEventRepository {
    events: Arc<RwLock<BTreeMap<i64, Model>>>,
    next_id: Arc<AtomicI64>,
}

impl Default for InMemoryEventRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    fn page_of(mut models: Vec<Model>, page: &PageRequest) -> Page<Model> {
        let (field, direction) = page.order();
        models.sort_by(|a, b| {
            direction
                .apply(field.compare(a, b))
                .then_with(|| SortField::Id.compare(a, b))
        });

        let total = models.len() as u64;
        let content = models
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        Page::new(content, total, page)
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn save(&self, mut event: ActiveModel) -> EventResult<Model> {
        let mut events = self.events.write().await;

        let id = match &event.id {
            ActiveValue::Set(id) | ActiveValue::Unchanged(id) => *id,
            ActiveValue::NotSet => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                event.id = ActiveValue::Set(id);
                id
            }
        };

        if let Some(identifier) = active_identifier(&event) {
            let taken = events
                .values()
                .any(|e| e.id != id && e.identifier == identifier);
            if taken {
                return Err(EventError::IdentifierAlreadyExists(identifier));
            }
        }

        let model = event.try_into_model()?;
        events.insert(id, model.clone());

        tracing::debug!(event_id = id, "Saved event");
        Ok(model)
    }

    async fn find_by_id(&self, id: i64) -> EventResult<Option<Model>> {
        let events = self.events.read().await;
        Ok(events.get(&id).cloned())
    }

    async fn find_all(&self, page: PageRequest) -> EventResult<Page<Model>> {
        let events = self.events.read().await;
        let models = events.values().cloned().collect();
        Ok(Self::page_of(models, &page))
    }

    async fn exists_by_identifier(&self, identifier: &str) -> EventResult<bool> {
        let events = self.events.read().await;
        Ok(events.values().any(|e| e.identifier == identifier))
    }

    async fn find_by_filters(
        &self,
        filter: &EventFilter,
        page: PageRequest,
    ) -> EventResult<Page<Model>> {
        let events = self.events.read().await;
        let models = events
            .values()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        Ok(Self::page_of(models, &page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::apply_update;
    use crate::models::{Event, EventStatus, EventType};
    use chrono::{Duration, Utc};

    fn event(identifier: &str, capacity: i32) -> Event {
        let start = Utc::now() + Duration::days(1);
        Event {
            id: None,
            name: format!("Event {}", identifier),
            description: None,
            identifier: identifier.to_string(),
            start_at: start,
            end_at: start + Duration::hours(2),
            location: "Berlin".to_string(),
            capacity,
            event_type: EventType::Meetup,
            status: EventStatus::Open,
            cancel_reason: None,
            audit: None,
        }
    }

    #[tokio::test]
    async fn test_save_assigns_sequential_ids() {
        let repo = InMemoryEventRepository::new();

        let first = repo.save(event("first", 10).into()).await.unwrap();
        let second = repo.save(event("second", 10).into()).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.find_by_id(2).await.unwrap(), Some(second));
        assert!(repo.find_by_id(3).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_identifier_error() {
        let repo = InMemoryEventRepository::new();
        repo.save(event("dup", 10).into()).await.unwrap();

        let result = repo.save(event("dup", 20).into()).await;
        assert!(matches!(result, Err(EventError::IdentifierAlreadyExists(_))));
        assert!(repo.exists_by_identifier("dup").await.unwrap());
        assert!(!repo.exists_by_identifier("other").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_in_place() {
        let repo = InMemoryEventRepository::new();
        let stored = repo.save(event("keep", 10).into()).await.unwrap();

        let updated = repo
            .save(apply_update(stored.clone(), event("keep", 99)))
            .await
            .unwrap();

        assert_eq!(updated.id, stored.id);
        assert_eq!(updated.capacity, 99);
        assert_eq!(repo.find_all(PageRequest::default()).await.unwrap().total_elements, 1);
    }

    #[tokio::test]
    async fn test_paging_and_sorting() {
        let repo = InMemoryEventRepository::new();
        for (i, capacity) in [30, 10, 20].into_iter().enumerate() {
            repo.save(event(&format!("evt-{}", i), capacity).into())
                .await
                .unwrap();
        }

        let page = repo
            .find_all(PageRequest::new(0, 2).with_sort("capacity,desc"))
            .await
            .unwrap();
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 2);
        let capacities: Vec<_> = page.content.iter().map(|m| m.capacity).collect();
        assert_eq!(capacities, vec![30, 20]);

        let last = repo.find_all(PageRequest::new(1, 2)).await.unwrap();
        assert_eq!(last.content.len(), 1);
        assert_eq!(last.content[0].id, 3);
    }

    #[tokio::test]
    async fn test_find_by_filters() {
        let repo = InMemoryEventRepository::new();
        repo.save(event("small", 10).into()).await.unwrap();
        repo.save(event("large", 100).into()).await.unwrap();

        let filter = EventFilter {
            capacity_min: Some(50),
            ..Default::default()
        };
        let page = repo
            .find_by_filters(&filter, PageRequest::default())
            .await
            .unwrap();

        assert_eq!(page.total_elements, 1);
        assert_eq!(page.content[0].identifier, "large");
    }
}
