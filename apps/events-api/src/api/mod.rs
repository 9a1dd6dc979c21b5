use axum::{Router, routing::get};

use crate::state::AppState;

pub mod events;
pub mod health;

/// API routes without the `/api` prefix, which `create_router` adds.
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/events", events::router(state))
}

/// `GET /ready`, checking the database
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
