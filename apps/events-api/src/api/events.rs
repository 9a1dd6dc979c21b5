use axum::Router;
use domain_events::{EventUseCases, PgEventRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgEventRepository::new(state.db.clone());
    handlers::router(EventUseCases::new(repository))
}
