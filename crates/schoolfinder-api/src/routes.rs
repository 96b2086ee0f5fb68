use axum::routing::{get, post};
use axum::Router;
use schoolfinder_core::SchoolStore;
use std::sync::Arc;

use crate::handlers;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SchoolStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn SchoolStore>) -> Self {
        Self { store }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/addSchool", post(handlers::add_school))
        .route("/listSchools", get(handlers::list_schools))
        .route("/health", get(handlers::health))
        .with_state(state)
}
