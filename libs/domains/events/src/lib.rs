//! Events Domain
//!
//! CRUD, search and cancellation for scheduled events.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, DTO validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Use cases  │  ← One struct per operation, business validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait + Postgres (SeaORM) and in-memory stores
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Domain event, DTO, entity, filter
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_events::{EventUseCases, InMemoryEventRepository, handlers};
//!
//! let use_cases = EventUseCases::new(InMemoryEventRepository::new());
//! let router: axum::Router = handlers::router(use_cases);
//! ```

pub mod entity;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod mapper;
pub mod models;
pub mod pagination;
pub mod postgres;
pub mod repository;
pub mod use_cases;
pub mod validation;

pub use error::{EventError, EventResult};
pub use filter::{Criterion, EventFilter};
pub use handlers::ApiDoc;
pub use models::{Audit, CancelEventRequest, Event, EventDto, EventStatus, EventType};
pub use pagination::{Page, PageRequest, SortDirection, SortField};
pub use postgres::PgEventRepository;
pub use repository::{EventRepository, InMemoryEventRepository};
pub use use_cases::EventUseCases;
pub use validation::EventValidator;
