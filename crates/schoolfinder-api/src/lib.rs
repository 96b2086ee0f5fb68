//! schoolfinder API - HTTP surface for the school directory
//!
//! - `POST /addSchool` stores a validated school
//! - `GET /listSchools` lists every school nearest-first from a query point
//! - `GET /health` liveness probe

pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod settings;

pub use crate::error::ApiError;
pub use crate::routes::{router, AppState};
pub use crate::settings::{Overrides, Settings};
