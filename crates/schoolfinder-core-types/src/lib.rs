//! Core types shared across the schoolfinder crates
//!
//! - **Correlation types**: RequestId, RequestContext
//! - **Schema constants**: Canonical field keys and event names for structured logs

pub mod correlation;
pub mod schema;

pub use correlation::{RequestContext, RequestId, REQUEST_ID_HEADER};
