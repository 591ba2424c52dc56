//! Config-backed engine: fixed group-bys per metric and one canned result.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;

use semgate_core::protocol::engine::{GroupByItem, QueryResult};

use super::{EngineError, MetricEngine, QueryRequest};

pub struct StaticEngine {
    group_bys: BTreeMap<String, BTreeSet<String>>,
    result: QueryResult,
}

impl StaticEngine {
    pub fn new(group_bys: BTreeMap<String, Vec<String>>, result: QueryResult) -> Self {
        Self {
            group_bys: group_bys
                .into_iter()
                .map(|(metric, labels)| (metric, labels.into_iter().collect()))
                .collect(),
            result,
        }
    }

    fn labels_for(&self, metrics: &[String]) -> Result<BTreeSet<String>, EngineError> {
        let mut out: Option<BTreeSet<String>> = None;
        for m in metrics {
            let labels = self
                .group_bys
                .get(m)
                .ok_or_else(|| EngineError::Failed(format!("unknown metric: {m}")))?;
            out = Some(match out {
                None => labels.clone(),
                Some(acc) => acc.intersection(labels).cloned().collect(),
            });
        }
        Ok(out.unwrap_or_default())
    }
}

#[async_trait]
impl MetricEngine for StaticEngine {
    fn kind(&self) -> &'static str {
        "static"
    }

    async fn list_group_bys(&self, metrics: &[String]) -> Result<Vec<GroupByItem>, EngineError> {
        Ok(self
            .labels_for(metrics)?
            .into_iter()
            .map(GroupByItem::labeled)
            .collect())
    }

    /// Canned result projected onto the requested group-bys and metrics.
    /// Requested names missing from the canned columns are ignored.
    async fn query(&self, req: &QueryRequest) -> Result<QueryResult, EngineError> {
        let valid = self.labels_for(&req.metrics)?;
        if let Some(bad) = req.group_by.iter().find(|g| !valid.contains(*g)) {
            return Err(EngineError::Failed(format!("group_by not valid for metrics: {bad}")));
        }

        let keep: Vec<usize> = self
            .result
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| req.group_by.contains(c) || req.metrics.contains(c))
            .map(|(i, _)| i)
            .collect();

        let columns = keep.iter().map(|&i| self.result.columns[i].clone()).collect();
        let rows = self
            .result
            .rows
            .iter()
            .map(|row| keep.iter().filter_map(|&i| row.get(i).cloned()).collect())
            .collect();

        tracing::debug!(request_id = %req.request_id, columns = keep.len(), "static engine answered");
        Ok(QueryResult { columns, rows })
    }
}
