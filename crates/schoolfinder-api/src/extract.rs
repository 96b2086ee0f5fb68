//! Request extractors
//!
//! [`Payload`] gives handlers the body and query fields of a request no
//! matter whether the client sent JSON, a form, or only a query string.

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::Json;
use schoolfinder_core::rules::{FieldMap, Location};
use schoolfinder_core_types::{RequestContext, RequestId, REQUEST_ID_HEADER};
use serde_json::Value;
use std::convert::Infallible;

use crate::error::ApiError;

/// Request fields from the body and the query string, kept apart until a
/// handler picks which side wins
#[derive(Debug, Clone, Default)]
pub struct Payload {
    body: FieldMap,
    query: FieldMap,
}

impl Payload {
    pub fn new(body: FieldMap, query: FieldMap) -> Self {
        Self { body, query }
    }

    /// Body fields, with query fields filling names the body lacks
    pub fn body_first(self) -> FieldMap {
        let Payload { mut body, query } = self;
        body.merge_missing(query);
        body
    }

    /// Query fields, with body fields filling names the query lacks
    pub fn query_first(self) -> FieldMap {
        let Payload { body, mut query } = self;
        query.merge_missing(body);
        query
    }
}

#[derive(Debug, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Absent,
    Other(String),
}

fn body_kind(headers: &HeaderMap) -> BodyKind {
    let Some(value) = headers.get(CONTENT_TYPE) else {
        return BodyKind::Absent;
    };
    let Ok(value) = value.to_str() else {
        return BodyKind::Other(String::from("<non-ascii>"));
    };

    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.as_str() {
        "" => BodyKind::Absent,
        "application/json" => BodyKind::Json,
        "application/x-www-form-urlencoded" => BodyKind::Form,
        s if s.starts_with("application/") && s.ends_with("+json") => BodyKind::Json,
        _ => BodyKind::Other(essence),
    }
}

#[async_trait]
impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(req.uri())
            .map_err(|_| ApiError::MalformedQuery)?;
        let query = FieldMap::from_string_pairs(pairs, Location::Query);

        let body = match body_kind(req.headers()) {
            BodyKind::Json => {
                let Json(value) = Json::<Value>::from_request(req, state)
                    .await
                    .map_err(|_| ApiError::MalformedBody)?;
                match value {
                    Value::Object(map) => FieldMap::from_json_object(map, Location::Body),
                    _ => return Err(ApiError::MalformedBody),
                }
            }
            BodyKind::Form => {
                // axum's `Form` reads the query instead of the body on GET
                let bytes = Bytes::from_request(req, state)
                    .await
                    .map_err(|_| ApiError::MalformedBody)?;
                let pairs: Vec<(String, String)> =
                    serde_urlencoded::from_bytes(&bytes).map_err(|_| ApiError::MalformedBody)?;
                FieldMap::from_string_pairs(pairs, Location::Body)
            }
            BodyKind::Absent => {
                let bytes = Bytes::from_request(req, state)
                    .await
                    .map_err(|_| ApiError::MalformedBody)?;
                if !bytes.iter().all(u8::is_ascii_whitespace) {
                    return Err(ApiError::UnsupportedContentType(String::new()));
                }
                FieldMap::new()
            }
            BodyKind::Other(content_type) => {
                return Err(ApiError::UnsupportedContentType(content_type));
            }
        };

        Ok(Payload::new(body, query))
    }
}

/// Per-request correlation context
///
/// Honours an inbound `x-request-id` header, otherwise generates one.
#[derive(Debug, Clone)]
pub struct RequestCtx(pub RequestContext);

#[async_trait]
impl<S> FromRequestParts<S> for RequestCtx
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let inbound = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok());
        Ok(RequestCtx(RequestContext::with_request_id(
            RequestId::from_inbound(inbound),
        )))
    }
}
