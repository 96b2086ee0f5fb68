//! Correlation types for request tracking
//!
//! Every HTTP request is tagged with a [`RequestId`] so that its start, end
//! and error log events can be tied together.

use serde::{Deserialize, Serialize};
use std::time::Instant;
use uuid::Uuid;

/// Header used to accept and echo request ids
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest inbound request id that is accepted verbatim
const MAX_INBOUND_ID_LEN: usize = 128;

/// Unique identifier for a single request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new random RequestId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Accept a caller-supplied id, falling back to a fresh one when the
    /// value is empty, too long, or contains non-printable characters.
    pub fn from_inbound(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v)
                if !v.is_empty()
                    && v.len() <= MAX_INBOUND_ID_LEN
                    && v.chars().all(|c| c.is_ascii_graphic()) =>
            {
                Self(v.to_string())
            }
            _ => Self::new(),
        }
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Context carried through a single request/response cycle
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: RequestId,
    started_at: Instant,
}

impl RequestContext {
    /// Create a new context with a fresh RequestId
    pub fn new() -> Self {
        Self::with_request_id(RequestId::new())
    }

    /// Create a context with an existing RequestId
    pub fn with_request_id(request_id: RequestId) -> Self {
        Self {
            request_id,
            started_at: Instant::now(),
        }
    }

    /// Milliseconds since the context was created
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.started_at.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
