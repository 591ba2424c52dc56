//! HTTP mapping for query failures.
//!
//! - unresolved group_by -> 400 with every failing input and its candidates
//! - engine connectivity -> 503 with a hint and the underlying error
//! - any other engine failure -> 500, body is the error string

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use semgate_core::protocol::http::{MessageBody, UnavailableBody, UnresolvedBody};

use crate::engine::EngineError;
use crate::service::QueryError;

pub const CONNECTIVITY_HINT: &str = "The metric engine could not connect to the configured warehouse. \
Verify the warehouse in your engine profile is reachable, then retry.";

#[derive(Debug)]
pub enum ApiError {
    /// Body did not parse.
    BadRequest(String),
    Query(QueryError),
}

impl From<QueryError> for ApiError {
    fn from(e: QueryError) -> Self {
        ApiError::Query(e)
    }
}

impl ApiError {
    pub fn outcome(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Query(e) => e.outcome(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(MessageBody { message })).into_response()
            }
            ApiError::Query(QueryError::Unresolved(unresolved)) => {
                (StatusCode::BAD_REQUEST, Json(UnresolvedBody::new(unresolved))).into_response()
            }
            ApiError::Query(QueryError::Engine(e @ EngineError::Connectivity(_))) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(UnavailableBody {
                    message: CONNECTIVITY_HINT.to_string(),
                    error: e.to_string(),
                }),
            )
                .into_response(),
            ApiError::Query(QueryError::Engine(e @ EngineError::Failed(_))) => {
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
            }
        }
    }
}
