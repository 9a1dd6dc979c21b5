//! Event domain models and the wire DTO

use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Kind of scheduled event
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "event_type")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EventType {
    #[sea_orm(string_value = "conference")]
    Conference,
    #[sea_orm(string_value = "workshop")]
    Workshop,
    #[sea_orm(string_value = "seminar")]
    Seminar,
    #[sea_orm(string_value = "webinar")]
    Webinar,
    #[sea_orm(string_value = "meetup")]
    Meetup,
    #[sea_orm(string_value = "concert")]
    Concert,
    #[sea_orm(string_value = "festival")]
    Festival,
    #[sea_orm(string_value = "competition")]
    Competition,
    #[sea_orm(string_value = "networking_event")]
    NetworkingEvent,
    #[sea_orm(string_value = "lecture")]
    Lecture,
    #[sea_orm(string_value = "panel_discussion")]
    PanelDiscussion,
    #[sea_orm(string_value = "training")]
    Training,
    #[sea_orm(string_value = "exhibition")]
    Exhibition,
    #[sea_orm(string_value = "launch_event")]
    LaunchEvent,
    #[sea_orm(string_value = "fundraiser")]
    Fundraiser,
}

/// Lifecycle status; `Cancelled` is terminal
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "event_status")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EventStatus {
    #[default]
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Store-managed timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Audit {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A scheduled event as the domain sees it.
///
/// `id` and `audit` are `None` until the event has been persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    /// Externally assigned slug, unique across all events
    pub identifier: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub location: String,
    pub capacity: i32,
    pub event_type: EventType,
    pub status: EventStatus,
    /// Only present once the event is cancelled
    pub cancel_reason: Option<String>,
    pub audit: Option<Audit>,
}

impl Event {
    pub fn has_valid_date_range(&self) -> bool {
        self.start_at <= self.end_at
    }

    pub fn has_valid_capacity(&self) -> bool {
        self.capacity > 0
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == EventStatus::Cancelled
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("Must not be blank")));
    }
    Ok(())
}

fn not_in_past(value: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *value < Utc::now() {
        return Err(ValidationError::new("past")
            .with_message(Cow::Borrowed("Date must be in the present or future")));
    }
    Ok(())
}

/// Request and response body for events.
///
/// `id`, `createdAt` and `updatedAt` are output only and ignored on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(read_only)]
    pub id: Option<i64>,

    #[validate(
        custom(function = "not_blank"),
        length(min = 3, max = 255, message = "Name must be between 3 and 255 characters")
    )]
    #[schema(example = "RustConf 2025")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1000, message = "Description cannot exceed 1000 characters"))]
    pub description: Option<String>,

    #[validate(
        custom(function = "not_blank"),
        length(min = 3, max = 100, message = "Identifier must be between 3 and 100 characters")
    )]
    #[schema(example = "rustconf-2025")]
    pub identifier: String,

    #[validate(custom(function = "not_in_past"))]
    pub start_at: DateTime<Utc>,

    #[validate(custom(function = "not_in_past"))]
    pub end_at: DateTime<Utc>,

    #[validate(
        custom(function = "not_blank"),
        length(min = 3, max = 255, message = "Location must be between 3 and 255 characters")
    )]
    pub location: String,

    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: i32,

    #[serde(rename = "type")]
    pub event_type: EventType,

    #[serde(default)]
    pub status: EventStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(read_only)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(read_only)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `PATCH /{id}/cancel`; the reason itself is checked by the use case
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CancelEventRequest {
    #[serde(default)]
    pub cancel_reason: Option<String>,
}
