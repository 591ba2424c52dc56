//! Metric engine seam.
//!
//! The gateway never computes metrics itself. It asks an engine which
//! group-bys a metric list supports and hands it fully resolved queries.
//! Engines are built once at startup and shared read-only.

pub mod manifest_engine;
pub mod static_engine;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use semgate_core::error::Result;
use semgate_core::protocol::engine::{GroupByItem, QueryResult};

use crate::config::{EngineKind, EngineSection};

pub use manifest_engine::ManifestEngine;
pub use static_engine::StaticEngine;

/// Engine failures. Connectivity is kept apart so callers can answer 503.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("warehouse connection failed: {0}")]
    Connectivity(String),
    #[error("{0}")]
    Failed(String),
}

/// A metric query with canonical group-bys only.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    pub request_id: String,
    pub metrics: Vec<String>,
    pub group_by: Vec<String>,
}

impl QueryRequest {
    pub fn new(metrics: Vec<String>, group_by: Vec<String>) -> Self {
        Self {
            request_id: format!("mf_rid__{}", uuid::Uuid::new_v4().simple()),
            metrics,
            group_by,
        }
    }
}

#[async_trait]
pub trait MetricEngine: Send + Sync {
    fn kind(&self) -> &'static str;

    /// Group-by options valid for every metric in `metrics`.
    async fn list_group_bys(&self, metrics: &[String]) -> std::result::Result<Vec<GroupByItem>, EngineError>;

    async fn query(&self, req: &QueryRequest) -> std::result::Result<QueryResult, EngineError>;
}

/// Build the configured engine.
pub fn build(cfg: &EngineSection) -> Result<Arc<dyn MetricEngine>> {
    let engine: Arc<dyn MetricEngine> = match cfg.kind {
        EngineKind::Manifest => {
            let path = cfg.manifest_path();
            Arc::new(ManifestEngine::load(&path)?)
        }
        EngineKind::Static => Arc::new(StaticEngine::new(
            cfg.group_bys.clone(),
            cfg.result.clone().unwrap_or_default(),
        )),
    };
    tracing::info!(kind = engine.kind(), "metric engine ready");
    Ok(engine)
}
