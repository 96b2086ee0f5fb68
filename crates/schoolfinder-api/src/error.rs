//! HTTP error mapping
//!
//! Storage failures are reported with a fixed message only; their detail is
//! logged by the handler, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use schoolfinder_core::errors::{ExError, ExErrorKind, SchoolError};
use schoolfinder_core::rules::ValidationErrors;
use serde_json::json;
use thiserror::Error;

pub const MSG_NO_SCHOOLS: &str = "No schools found";
pub const MSG_ADD_FAILED: &str = "Failed to add school";
pub const MSG_LIST_FAILED: &str = "Failed to fetch schools";
pub const MSG_MALFORMED_BODY: &str = "Malformed request body";
pub const MSG_MALFORMED_QUERY: &str = "Malformed query string";
pub const MSG_UNSUPPORTED_CONTENT_TYPE: &str = "Unsupported content type";

#[derive(Error, Debug, Clone)]
pub enum ApiError {
    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("no schools stored")]
    NoSchools,

    /// `public` is the only text the client sees
    #[error("{public}: {source}")]
    Storage {
        public: &'static str,
        source: ExError,
    },

    #[error("request body could not be decoded")]
    MalformedBody,

    #[error("query string could not be decoded")]
    MalformedQuery,

    #[error("unsupported content type '{0}'")]
    UnsupportedContentType(String),
}

impl ApiError {
    /// Map a domain error, using `storage_message` for storage failures
    pub fn from_school(err: SchoolError, storage_message: &'static str) -> Self {
        match err {
            SchoolError::Validation(errors) => ApiError::Validation(errors),
            SchoolError::NoSchools => ApiError::NoSchools,
            SchoolError::Storage(source) => ApiError::Storage {
                public: storage_message,
                source,
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::MalformedBody
            | ApiError::MalformedQuery
            | ApiError::UnsupportedContentType(_) => StatusCode::BAD_REQUEST,
            ApiError::NoSchools => StatusCode::NOT_FOUND,
            ApiError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ApiError> for ExError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Storage { source, .. } => source,
            ApiError::Validation(errors) => SchoolError::Validation(errors).into(),
            ApiError::NoSchools => SchoolError::NoSchools.into(),
            other => ExError::new(ExErrorKind::InvalidInput)
                .with_op("decode_request")
                .with_message(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(errors) => json!({ "errors": errors }),
            ApiError::NoSchools => json!({ "message": MSG_NO_SCHOOLS }),
            ApiError::Storage { public, .. } => json!({ "error": public }),
            ApiError::MalformedBody => json!({ "error": MSG_MALFORMED_BODY }),
            ApiError::MalformedQuery => json!({ "error": MSG_MALFORMED_QUERY }),
            ApiError::UnsupportedContentType(_) => json!({ "error": MSG_UNSUPPORTED_CONTENT_TYPE }),
        };
        (status, Json(body)).into_response()
    }
}
