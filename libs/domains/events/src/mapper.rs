//! Conversions between the wire DTO, the domain `Event` and the SeaORM record

use crate::entity::{ActiveModel, Model};
use crate::models::{Audit, Event, EventDto, EventStatus};
use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::IntoActiveModel;

/// Client supplied `id` and timestamps are ignored; `cancelReason` only
/// survives on a cancelled event.
impl From<EventDto> for Event {
    fn from(dto: EventDto) -> Self {
        let cancel_reason = match dto.status {
            EventStatus::Cancelled => dto.cancel_reason,
            _ => None,
        };

        Self {
            id: None,
            name: dto.name,
            description: dto.description,
            identifier: dto.identifier,
            start_at: dto.start_at,
            end_at: dto.end_at,
            location: dto.location,
            capacity: dto.capacity,
            event_type: dto.event_type,
            status: dto.status,
            cancel_reason,
            audit: None,
        }
    }
}

impl From<Event> for EventDto {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            name: event.name,
            description: event.description,
            identifier: event.identifier,
            start_at: event.start_at,
            end_at: event.end_at,
            location: event.location,
            capacity: event.capacity,
            event_type: event.event_type,
            status: event.status,
            cancel_reason: event.cancel_reason,
            created_at: event.audit.map(|a| a.created_at),
            updated_at: event.audit.map(|a| a.updated_at),
        }
    }
}

impl From<Model> for Event {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            description: model.description,
            identifier: model.identifier,
            start_at: model.start_at.into(),
            end_at: model.end_at.into(),
            location: model.location,
            capacity: model.capacity,
            event_type: model.event_type,
            status: model.status,
            cancel_reason: model.cancel_reason,
            audit: Some(Audit {
                created_at: model.created_at.into(),
                updated_at: model.updated_at.into(),
            }),
        }
    }
}

impl From<Model> for EventDto {
    fn from(model: Model) -> Self {
        Event::from(model).into()
    }
}

/// Insert form; the store assigns the id
impl From<Event> for ActiveModel {
    fn from(event: Event) -> Self {
        let now = Utc::now();
        ActiveModel {
            id: NotSet,
            name: Set(event.name),
            description: Set(event.description),
            identifier: Set(event.identifier),
            start_at: Set(event.start_at.into()),
            end_at: Set(event.end_at.into()),
            location: Set(event.location),
            capacity: Set(event.capacity),
            event_type: Set(event.event_type),
            status: Set(event.status),
            cancel_reason: Set(event.cancel_reason),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
    }
}

/// Write `event` onto a stored record.
///
/// `id`, `status` and `cancel_reason` keep their stored values; a missing
/// description keeps the stored one.
pub fn apply_update(model: Model, event: Event) -> ActiveModel {
    let mut active = model.into_active_model();

    active.name = Set(event.name);
    if let Some(description) = event.description {
        active.description = Set(Some(description));
    }
    active.identifier = Set(event.identifier);
    active.start_at = Set(event.start_at.into());
    active.end_at = Set(event.end_at.into());
    active.location = Set(event.location);
    active.capacity = Set(event.capacity);
    active.event_type = Set(event.event_type);
    active.updated_at = Set(Utc::now().into());

    active
}

pub fn apply_cancellation(model: Model, reason: String) -> ActiveModel {
    let mut active = model.into_active_model();
    active.status = Set(EventStatus::Cancelled);
    active.cancel_reason = Set(Some(reason));
    active.updated_at = Set(Utc::now().into());
    active
}
