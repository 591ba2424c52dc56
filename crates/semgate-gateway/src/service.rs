//! Query pipeline shared by the HTTP handler and the one-shot CLI.
//!
//! labels from engine -> resolve group-bys -> execute. Nothing is retried.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use semgate_core::protocol::engine::{GroupByItem, QueryResult};
use semgate_core::{resolve, Resolution};

use crate::engine::{EngineError, MetricEngine, QueryRequest};
use crate::obs::ApiMetrics;

#[derive(Debug)]
pub enum QueryError {
    /// Raw group_by -> sorted candidate labels.
    Unresolved(BTreeMap<String, Vec<String>>),
    Engine(EngineError),
}

impl From<EngineError> for QueryError {
    fn from(e: EngineError) -> Self {
        QueryError::Engine(e)
    }
}

impl QueryError {
    /// Value of the `outcome` metric label.
    pub fn outcome(&self) -> &'static str {
        match self {
            QueryError::Unresolved(_) => "unresolved",
            QueryError::Engine(EngineError::Connectivity(_)) => "engine_unavailable",
            QueryError::Engine(EngineError::Failed(_)) => "engine_failed",
        }
    }
}

/// Canonical labels out of the engine's group-by items (unlabeled items skipped).
pub fn available_labels(items: &[GroupByItem]) -> BTreeSet<String> {
    items
        .iter()
        .filter_map(GroupByItem::label)
        .map(str::to_string)
        .collect()
}

pub async fn run_query(
    engine: &dyn MetricEngine,
    metrics: Vec<String>,
    group_by: &[String],
    obs: &ApiMetrics,
) -> Result<QueryResult, QueryError> {
    let started = Instant::now();
    let listed = engine.list_group_bys(&metrics).await;
    obs.engine_duration
        .observe(&[("op", "list_group_bys")], started.elapsed());
    let labels = available_labels(&listed?);

    let resolved = match resolve(group_by, &labels) {
        Resolution::Resolved(v) => v,
        Resolution::Unresolved(m) => {
            tracing::info!(unresolved = m.len(), available = labels.len(), "group_by resolution failed");
            obs.unresolved_group_bys.add(&[], m.len() as u64);
            return Err(QueryError::Unresolved(m));
        }
    };

    let req = QueryRequest::new(metrics, resolved);
    tracing::debug!(request_id = %req.request_id, group_by = ?req.group_by, "executing query");

    let started = Instant::now();
    let result = engine.query(&req).await;
    obs.engine_duration.observe(&[("op", "query")], started.elapsed());

    match &result {
        Ok(r) => tracing::info!(request_id = %req.request_id, rows = r.rows.len(), "query done"),
        Err(e) => tracing::warn!(request_id = %req.request_id, error = %e, "query failed"),
    }
    result.map_err(QueryError::Engine)
}
