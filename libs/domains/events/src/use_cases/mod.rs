//! One struct per operation, each generic over the store.
//!
//! Business errors pass through unchanged; anything else is logged and
//! replaced by the use case's own failure kind.

mod cancel;
mod create;
mod get_all;
mod get_by_filter;
mod get_by_id;
mod update;

pub use cancel::CancelEvent;
pub use create::CreateEvent;
pub use get_all::GetAllEvents;
pub use get_by_filter::GetEventsByFilter;
pub use get_by_id::GetEventById;
pub use update::UpdateEvent;

use std::sync::Arc;

use crate::repository::EventRepository;
use crate::validation::EventValidator;

/// All event use cases over one shared repository
pub struct EventUseCases<R: EventRepository> {
    pub create: CreateEvent<R>,
    pub update: UpdateEvent<R>,
    pub cancel: CancelEvent<R>,
    pub get_by_id: GetEventById<R>,
    pub get_all: GetAllEvents<R>,
    pub get_by_filter: GetEventsByFilter<R>,
}

impl<R: EventRepository> EventUseCases<R> {
    pub fn new(repository: R) -> Self {
        let repository = Arc::new(repository);
        let validator = EventValidator::new(Arc::clone(&repository));

        Self {
            create: CreateEvent::new(Arc::clone(&repository), validator.clone()),
            update: UpdateEvent::new(Arc::clone(&repository), validator.clone()),
            cancel: CancelEvent::new(Arc::clone(&repository), validator.clone()),
            get_by_id: GetEventById::new(Arc::clone(&repository), validator),
            get_all: GetAllEvents::new(Arc::clone(&repository)),
            get_by_filter: GetEventsByFilter::new(repository),
        }
    }
}
