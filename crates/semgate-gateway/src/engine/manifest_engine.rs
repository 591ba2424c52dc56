//! Manifest-backed engine.
//!
//! Lists group-bys from a dbt semantic manifest. There is no warehouse
//! adapter, so query execution reports a connectivity failure.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use semgate_core::error::{Result, SemgateError};
use semgate_core::manifest::{self, LabelCatalog, SemanticManifest};
use semgate_core::protocol::engine::{GroupByItem, QueryResult};

use super::{EngineError, MetricEngine, QueryRequest};

pub struct ManifestEngine {
    source: PathBuf,
    catalog: LabelCatalog,
}

impl ManifestEngine {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SemgateError::Internal(format!(
                "semantic_manifest.json not found at {}. Run `dbt parse` first.",
                path.display()
            )));
        }
        let m = manifest::load_manifest(path)?;
        let engine = Self::from_manifest(&m, path.to_path_buf())?;
        tracing::info!(
            manifest = %path.display(),
            metrics = engine.catalog.metrics().count(),
            "semantic manifest loaded"
        );
        Ok(engine)
    }

    pub fn from_manifest(m: &SemanticManifest, source: PathBuf) -> Result<Self> {
        Ok(Self {
            source,
            catalog: LabelCatalog::from_manifest(m)?,
        })
    }
}

#[async_trait]
impl MetricEngine for ManifestEngine {
    fn kind(&self) -> &'static str {
        "manifest"
    }

    async fn list_group_bys(&self, metrics: &[String]) -> std::result::Result<Vec<GroupByItem>, EngineError> {
        let labels = self
            .catalog
            .labels_for(metrics)
            .map_err(|e| EngineError::Failed(e.to_string()))?;
        Ok(labels.into_iter().map(GroupByItem::labeled).collect())
    }

    async fn query(&self, req: &QueryRequest) -> std::result::Result<QueryResult, EngineError> {
        tracing::warn!(request_id = %req.request_id, manifest = %self.source.display(), "manifest engine cannot execute queries");
        Err(EngineError::Connectivity(format!(
            "no warehouse adapter configured for manifest {}",
            self.source.display()
        )))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;

    fn engine() -> ManifestEngine {
        let m = SemanticManifest::from_value(json!({
            "semantic_models": [{
                "name": "merchants",
                "entities": [{"name": "merchant", "type": "primary"}],
                "dimensions": [{"name": "merchant_id", "type": "categorical"}],
                "measures": [{"name": "merchant_count", "agg": "count"}]
            }],
            "metrics": [{"name": "merchants", "type": "simple", "type_params": {"measure": {"name": "merchant_count"}}}]
        }))
        .unwrap();
        ManifestEngine::from_manifest(&m, PathBuf::from("mem://manifest")).unwrap()
    }

    #[tokio::test]
    async fn lists_manifest_labels() {
        let items = engine().list_group_bys(&["merchants".to_string()]).await.unwrap();
        let labels: Vec<&str> = items.iter().filter_map(GroupByItem::label).collect();
        assert_eq!(labels, vec!["merchant", "merchant__merchant_id"]);
    }

    #[tokio::test]
    async fn query_is_a_connectivity_failure() {
        let req = QueryRequest::new(vec!["merchants".into()], vec![]);
        let err = engine().query(&req).await.unwrap_err();
        assert!(matches!(err, EngineError::Connectivity(_)));
    }

    #[test]
    fn missing_file_mentions_dbt_parse() {
        let err = ManifestEngine::load(Path::new("/nonexistent/semantic_manifest.json")).err().unwrap();
        assert!(err.to_string().contains("dbt parse"));
    }
}
