//! Business rules checked before any mutation

use std::sync::Arc;

use crate::error::{EventError, EventResult};
use crate::models::Event;
use crate::repository::EventRepository;

pub struct EventValidator<R: EventRepository> {
    repository: Arc<R>,
}

impl<R: EventRepository> Clone for EventValidator<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: EventRepository> EventValidator<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Identifier must be unused, then the shared business rules apply
    pub async fn validate_event_creation(&self, event: &Event) -> EventResult<()> {
        if self
            .repository
            .exists_by_identifier(&event.identifier)
            .await?
        {
            return Err(EventError::IdentifierAlreadyExists(
                event.identifier.clone(),
            ));
        }
        validate_business_rules(event)
    }

    /// Identifier uniqueness is left to the store on update
    pub async fn validate_event_update(&self, id: Option<i64>, event: &Event) -> EventResult<()> {
        validate_id(id)?;
        validate_business_rules(event)
    }

    pub fn validate_event_cancellation(
        &self,
        id: Option<i64>,
        reason: Option<&str>,
    ) -> EventResult<i64> {
        let id = validate_id(id)?;
        match reason {
            Some(reason) if !reason.trim().is_empty() => Ok(id),
            _ => Err(EventError::CancelReasonRequired),
        }
    }

    pub fn validate_id(&self, id: Option<i64>) -> EventResult<i64> {
        validate_id(id)
    }
}

/// Positive id, or `InvalidId`
pub fn validate_id(id: Option<i64>) -> EventResult<i64> {
    match id {
        Some(id) if id > 0 => Ok(id),
        other => Err(EventError::InvalidId(other)),
    }
}

/// Date range first, then capacity
pub fn validate_business_rules(event: &Event) -> EventResult<()> {
    if !event.has_valid_date_range() {
        return Err(EventError::InvalidDateRange {
            start_at: event.start_at,
            end_at: event.end_at,
        });
    }
    if !event.has_valid_capacity() {
        return Err(EventError::InvalidCapacity(event.capacity));
    }
    Ok(())
}
