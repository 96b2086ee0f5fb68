//! Migration framework
//!
//! - Embedded SQL migrations, applied in order
//! - Idempotent application tracked in `schema_version`
//! - Checksums recorded per migration and re-verified on every start

mod checksums;
mod embedded;
mod runner;

pub use embedded::{get_migrations, Migration};
pub use runner::apply_migrations;
