//! Search filter composed from optional query parameters
//!
//! Each present field becomes one [`Criterion`]; the filter matches when all
//! criteria match. The same criteria drive the SQL condition and the
//! in-memory check so both stores agree.

use crate::entity::{Column, Model};
use crate::models::{EventStatus, EventType};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, ExprTrait, Func, LikeExpr};
use sea_orm::{ColumnTrait, Condition};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Query parameters of `GET /search`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EventFilter {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Case-insensitive substring of the location
    pub location: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "blank_as_none")]
    pub event_type: Option<EventType>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<EventStatus>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub start_at_from: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub start_at_to: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub end_at_from: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub end_at_to: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub capacity_min: Option<i32>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub capacity_max: Option<i32>,
    /// Exact identifier
    pub identifier: Option<String>,
}

/// Query values arrive as strings; `?capacityMin=` is treated as absent
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// A single present filter constraint. Bounds are inclusive.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    NameContains(String),
    LocationContains(String),
    TypeIs(EventType),
    StatusIs(EventStatus),
    StartAtFrom(DateTime<Utc>),
    StartAtTo(DateTime<Utc>),
    EndAtFrom(DateTime<Utc>),
    EndAtTo(DateTime<Utc>),
    CapacityMin(i32),
    CapacityMax(i32),
    IdentifierIs(String),
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// `%VALUE%` with `\`, `%` and `_` escaped so they match literally
fn contains_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.to_uppercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// `UPPER(col) LIKE '%VALUE%' ESCAPE '\'`
fn upper_like(column: Column, value: &str) -> Expr {
    Expr::expr(Func::upper(Expr::col(column)))
        .like(LikeExpr::new(contains_pattern(value)).escape('\\'))
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_uppercase().contains(&needle.to_uppercase())
}

impl Criterion {
    pub fn to_condition(&self) -> Condition {
        let condition = Condition::all();
        match self {
            Self::NameContains(v) => condition.add(upper_like(Column::Name, v)),
            Self::LocationContains(v) => condition.add(upper_like(Column::Location, v)),
            Self::TypeIs(v) => condition.add(Column::EventType.eq(*v)),
            Self::StatusIs(v) => condition.add(Column::Status.eq(*v)),
            Self::StartAtFrom(v) => condition.add(Column::StartAt.gte(v.fixed_offset())),
            Self::StartAtTo(v) => condition.add(Column::StartAt.lte(v.fixed_offset())),
            Self::EndAtFrom(v) => condition.add(Column::EndAt.gte(v.fixed_offset())),
            Self::EndAtTo(v) => condition.add(Column::EndAt.lte(v.fixed_offset())),
            Self::CapacityMin(v) => condition.add(Column::Capacity.gte(*v)),
            Self::CapacityMax(v) => condition.add(Column::Capacity.lte(*v)),
            Self::IdentifierIs(v) => condition.add(Column::Identifier.eq(v.as_str())),
        }
    }

    pub fn matches(&self, model: &Model) -> bool {
        match self {
            Self::NameContains(v) => contains_ignore_case(&model.name, v),
            Self::LocationContains(v) => contains_ignore_case(&model.location, v),
            Self::TypeIs(v) => model.event_type == *v,
            Self::StatusIs(v) => model.status == *v,
            Self::StartAtFrom(v) => model.start_at >= *v,
            Self::StartAtTo(v) => model.start_at <= *v,
            Self::EndAtFrom(v) => model.end_at >= *v,
            Self::EndAtTo(v) => model.end_at <= *v,
            Self::CapacityMin(v) => model.capacity >= *v,
            Self::CapacityMax(v) => model.capacity <= *v,
            Self::IdentifierIs(v) => model.identifier == *v,
        }
    }
}

impl EventFilter {
    /// Present, non-blank fields in declaration order
    pub fn criteria(&self) -> Vec<Criterion> {
        let mut criteria = Vec::new();

        if let Some(name) = non_blank(&self.name) {
            criteria.push(Criterion::NameContains(name));
        }
        if let Some(location) = non_blank(&self.location) {
            criteria.push(Criterion::LocationContains(location));
        }
        if let Some(event_type) = self.event_type {
            criteria.push(Criterion::TypeIs(event_type));
        }
        if let Some(status) = self.status {
            criteria.push(Criterion::StatusIs(status));
        }
        if let Some(from) = self.start_at_from {
            criteria.push(Criterion::StartAtFrom(from));
        }
        if let Some(to) = self.start_at_to {
            criteria.push(Criterion::StartAtTo(to));
        }
        if let Some(from) = self.end_at_from {
            criteria.push(Criterion::EndAtFrom(from));
        }
        if let Some(to) = self.end_at_to {
            criteria.push(Criterion::EndAtTo(to));
        }
        if let Some(min) = self.capacity_min {
            criteria.push(Criterion::CapacityMin(min));
        }
        if let Some(max) = self.capacity_max {
            criteria.push(Criterion::CapacityMax(max));
        }
        if let Some(identifier) = non_blank(&self.identifier) {
            criteria.push(Criterion::IdentifierIs(identifier));
        }

        criteria
    }

    pub fn is_empty(&self) -> bool {
        self.criteria().is_empty()
    }

    /// AND of all criteria; `Condition::all()` with no criteria matches every row
    pub fn to_condition(&self) -> Condition {
        self.criteria()
            .iter()
            .fold(Condition::all(), |condition, criterion| {
                condition.add(criterion.to_condition())
            })
    }

    pub fn matches(&self, model: &Model) -> bool {
        self.criteria().iter().all(|criterion| criterion.matches(model))
    }
}
