//! Application state for the HTTP server.

use crate::db::repository::BeerRepository;
use std::sync::Arc;

/// Shared application state passed to all handlers.
///
/// Built once in `main` and cloned into the router; the repository handle
/// is the only cross-request state this service carries.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for database operations
    pub repository: Arc<dyn BeerRepository>,
}

impl AppState {
    /// Create a new application state with the given repository.
    pub fn new(repository: Arc<dyn BeerRepository>) -> Self {
        Self { repository }
    }
}
