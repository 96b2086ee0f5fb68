//! Route handlers
//!
//! Each handler logs one start and one end (or end_error) event tagged with
//! the request id, and echoes the id back in the `x-request-id` header.

use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use schoolfinder_core::errors::SchoolError;
use schoolfinder_core::model::RankedSchool;
use schoolfinder_core::ops::school_ops;
use schoolfinder_core::{log_op_end, log_op_error, log_op_start};
use schoolfinder_core_types::{RequestContext, REQUEST_ID_HEADER};
use serde::Serialize;

use crate::error::{ApiError, MSG_ADD_FAILED, MSG_LIST_FAILED};
use crate::extract::{Payload, RequestCtx};
use crate::routes::AppState;

pub const OP_ADD_SCHOOL: &str = "add_school";
pub const OP_LIST_SCHOOLS: &str = "list_schools";

pub const MSG_SCHOOL_ADDED: &str = "School added successfully";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSchoolResponse {
    pub message: &'static str,
    pub school_id: i64,
}

#[derive(Debug, Serialize)]
pub struct ListSchoolsResponse {
    pub count: usize,
    pub schools: Vec<RankedSchool>,
}

pub async fn add_school(
    State(state): State<AppState>,
    RequestCtx(ctx): RequestCtx,
    payload: Result<Payload, ApiError>,
) -> Response {
    let request_id = ctx.request_id.as_str();
    log_op_start!(OP_ADD_SCHOOL, request_id = request_id);

    let result = match payload {
        Ok(payload) => school_ops::add_school(state.store.as_ref(), &payload.body_first())
            .await
            .map_err(|err| ApiError::from_school(err, MSG_ADD_FAILED)),
        Err(rejection) => Err(rejection),
    };

    let response = match result {
        Ok(school_id) => {
            log_op_end!(
                OP_ADD_SCHOOL,
                duration_ms = ctx.elapsed_ms(),
                request_id = request_id,
                school_id = school_id,
            );
            (
                StatusCode::CREATED,
                Json(AddSchoolResponse {
                    message: MSG_SCHOOL_ADDED,
                    school_id,
                }),
            )
                .into_response()
        }
        Err(err) => failure(OP_ADD_SCHOOL, &ctx, err),
    };

    with_request_id(response, &ctx)
}

pub async fn list_schools(
    State(state): State<AppState>,
    RequestCtx(ctx): RequestCtx,
    payload: Result<Payload, ApiError>,
) -> Response {
    let request_id = ctx.request_id.as_str();
    log_op_start!(OP_LIST_SCHOOLS, request_id = request_id);

    let result = match payload {
        Ok(payload) => school_ops::list_schools(state.store.as_ref(), &payload.query_first())
            .await
            .map_err(|err| ApiError::from_school(err, MSG_LIST_FAILED)),
        Err(rejection) => Err(rejection),
    };

    let response = match result {
        Ok(schools) => {
            log_op_end!(
                OP_LIST_SCHOOLS,
                duration_ms = ctx.elapsed_ms(),
                request_id = request_id,
                result_count = schools.len(),
            );
            Json(ListSchoolsResponse {
                count: schools.len(),
                schools,
            })
            .into_response()
        }
        Err(err) => failure(OP_LIST_SCHOOLS, &ctx, err),
    };

    with_request_id(response, &ctx)
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Log a failed request and render it
///
/// Client-caused outcomes (validation, empty store, undecodable body) close
/// with an ordinary end event; only storage failures are logged as errors.
fn failure(op: &'static str, ctx: &RequestContext, err: ApiError) -> Response {
    let request_id = ctx.request_id.as_str();
    let status = err.status();

    if let ApiError::Storage { source, .. } = &err {
        log_op_error!(
            op,
            SchoolError::Storage(source.clone()),
            duration_ms = ctx.elapsed_ms(),
            request_id = request_id,
            error = %source,
        );
    } else {
        log_op_end!(
            op,
            duration_ms = ctx.elapsed_ms(),
            request_id = request_id,
            status = status.as_u16(),
            outcome = %err,
        );
    }

    err.into_response()
}

fn with_request_id(mut response: Response, ctx: &RequestContext) -> Response {
    if let Ok(value) = HeaderValue::from_str(ctx.request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
