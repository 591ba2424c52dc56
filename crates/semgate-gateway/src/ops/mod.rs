//! Operational HTTP endpoints.
//!
//! - `/`        : liveness (`{"status": "ok", "message": ...}`)
//! - `/metrics` : Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use semgate_core::protocol::http::HealthBody;

use crate::app_state::AppState;

pub async fn root(State(state): State<AppState>) -> Json<HealthBody> {
    Json(HealthBody::ok(state.cfg().server.health_message.clone()))
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        state.metrics().render(),
    )
        .into_response()
}
