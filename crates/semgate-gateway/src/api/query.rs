use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use semgate_core::protocol::http::{DataBody, QueryBody};

use crate::app_state::AppState;
use crate::service;

use super::ApiError;

/// `POST /query`
pub async fn query(
    State(state): State<AppState>,
    body: Result<Json<QueryBody>, JsonRejection>,
) -> Result<Json<DataBody>, ApiError> {
    let res = handle(&state, body).await;
    let outcome = match &res {
        Ok(_) => "ok",
        Err(e) => e.outcome(),
    };
    state.metrics().queries.inc(&[("outcome", outcome)]);
    res
}

async fn handle(
    state: &AppState,
    body: Result<Json<QueryBody>, JsonRejection>,
) -> Result<Json<DataBody>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    tracing::info!(metrics = ?body.metrics, group_by = ?body.group_by, "query received");

    let engine = state.engine();
    let result = service::run_query(engine.as_ref(), body.metrics, &body.group_by, state.metrics()).await?;
    Ok(Json(DataBody {
        data: result.into_records(),
    }))
}
