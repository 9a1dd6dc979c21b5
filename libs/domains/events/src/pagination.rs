//! Page requests and page results shared by the listing use cases

use crate::entity;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::EnumString;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Zero-based page request, read from `?page=&size=&sort=`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct PageRequest {
    /// Zero-based page index
    pub page: u64,
    /// Page size (1-100)
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    pub size: u64,
    /// `field[,asc|desc]`, e.g. `startAt,desc`
    pub sort: Option<String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: None,
        }
    }
}

impl PageRequest {
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page,
            size,
            sort: None,
        }
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Clamped to `1..=MAX_PAGE_SIZE`
    pub fn limit(&self) -> u64 {
        self.size.clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.limit())
    }

    /// Parsed sort; unknown fields fall back to `id`, direction defaults to ascending
    pub fn order(&self) -> (SortField, SortDirection) {
        let Some(sort) = self.sort.as_deref() else {
            return (SortField::Id, SortDirection::Asc);
        };

        let (field, direction) = match sort.split_once(',') {
            Some((field, direction)) => (field.trim(), direction.trim()),
            None => (sort.trim(), ""),
        };

        let field = field.parse().unwrap_or_else(|_| {
            tracing::debug!(sort = %field, "Unknown sort field, falling back to id");
            SortField::Id
        });
        let direction = direction.parse().unwrap_or(SortDirection::Asc);

        (field, direction)
    }
}

/// Columns a page may be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum SortField {
    Id,
    Name,
    Identifier,
    StartAt,
    EndAt,
    Location,
    Capacity,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub fn column(&self) -> entity::Column {
        match self {
            Self::Id => entity::Column::Id,
            Self::Name => entity::Column::Name,
            Self::Identifier => entity::Column::Identifier,
            Self::StartAt => entity::Column::StartAt,
            Self::EndAt => entity::Column::EndAt,
            Self::Location => entity::Column::Location,
            Self::Capacity => entity::Column::Capacity,
            Self::CreatedAt => entity::Column::CreatedAt,
            Self::UpdatedAt => entity::Column::UpdatedAt,
        }
    }

    /// In-memory equivalent of ordering by [`column`](Self::column)
    pub fn compare(&self, a: &entity::Model, b: &entity::Model) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Name => a.name.cmp(&b.name),
            Self::Identifier => a.identifier.cmp(&b.identifier),
            Self::StartAt => a.start_at.cmp(&b.start_at),
            Self::EndAt => a.end_at.cmp(&b.end_at),
            Self::Location => a.location.cmp(&b.location),
            Self::Capacity => a.capacity.cmp(&b.capacity),
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
            Self::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn order(&self) -> sea_orm::Order {
        match self {
            Self::Asc => sea_orm::Order::Asc,
            Self::Desc => sea_orm::Order::Desc,
        }
    }

    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// One page of results plus totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub page: u64,
    pub size: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total_elements: u64, request: &PageRequest) -> Self {
        let size = request.limit();
        Self {
            content,
            total_elements,
            total_pages: total_elements.div_ceil(size),
            page: request.page,
            size,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            page: self.page,
            size: self.size,
        }
    }
}
