//! Shared application state.

use database::postgres::DatabaseConnection;

/// Cloned into each stateful router; both fields are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: DatabaseConnection,
}
