//! Database connection management

use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// Path understood by SQLite as a private in-memory database
pub const IN_MEMORY: &str = ":memory:";

/// How long a statement waits on a locked database before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(|e| from_rusqlite("open", e))
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(|e| from_rusqlite("open", e))
}

/// Configure a connection
///
/// WAL journaling is only requested for file-backed databases; in-memory
/// databases always report `memory`.
pub fn configure(conn: &Connection, file_backed: bool) -> Result<()> {
    conn.busy_timeout(BUSY_TIMEOUT)
        .map_err(|e| from_rusqlite("configure", e))?;

    if file_backed {
        let mode: String = conn
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
            .map_err(|e| from_rusqlite("configure", e))?;
        tracing::debug!(op = "configure", journal_mode = %mode);
    }

    Ok(())
}
