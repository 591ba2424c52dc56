//! Manifest patch: `metric_aggregation_params` for simple metrics.
//!
//! Newer semantic-layer readers require every simple metric to name the
//! semantic model and aggregation of its measure. Older dbt releases do not
//! emit it, so it is derived from the measures and written back in place.
//! The rewrite works on untyped JSON so unknown fields survive.

use std::collections::HashMap;

use serde_json::{json, Value};

use crate::error::{Result, SemgateError};

/// Aggregation used when a measure's `agg` is unknown.
pub const DEFAULT_AGG: &str = "sum";

/// What a patch run changed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PatchReport {
    /// Simple metrics that received `metric_aggregation_params`.
    pub patched: Vec<String>,
    /// Simple metrics whose measure belongs to no semantic model.
    pub skipped: Vec<String>,
}

pub fn patch_manifest(manifest: &mut Value) -> Result<PatchReport> {
    // measure name -> (owning model, agg); later models win on duplicate measure names
    let mut measures: HashMap<String, (String, Value)> = HashMap::new();
    for sm in array(manifest, "semantic_models")? {
        let model = str_field(sm, "name", "semantic_models[].name")?;
        for measure in array(sm, "measures")? {
            let name = str_field(measure, "name", "semantic_models[].measures[].name")?;
            let agg = measure
                .get("agg")
                .filter(|v| !v.is_null())
                .cloned()
                .unwrap_or_else(|| json!(DEFAULT_AGG));
            measures.insert(name.to_string(), (model.to_string(), agg));
        }
    }

    let mut report = PatchReport::default();
    let metrics = manifest
        .get_mut("metrics")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| missing("metrics"))?;

    for metric in metrics.iter_mut() {
        if metric.get("type").and_then(Value::as_str) != Some("simple") {
            continue;
        }
        let metric_name = str_field(metric, "name", "metrics[].name")?.to_string();
        let measure_name = metric
            .pointer("/type_params/measure/name")
            .and_then(Value::as_str)
            .ok_or_else(|| missing(&format!("metrics[{metric_name}].type_params.measure.name")))?
            .to_string();

        let Some((model, agg)) = measures.get(&measure_name) else {
            tracing::warn!(metric = %metric_name, measure = %measure_name, "measure has no semantic model, metric left unpatched");
            report.skipped.push(metric_name);
            continue;
        };

        let type_params = metric
            .get_mut("type_params")
            .and_then(Value::as_object_mut)
            .ok_or_else(|| missing(&format!("metrics[{metric_name}].type_params")))?;
        type_params.insert(
            "metric_aggregation_params".to_string(),
            json!({
                "semantic_model": model,
                "use_latest_partition": null,
                "agg": agg,
            }),
        );
        report.patched.push(metric_name);
    }

    Ok(report)
}

fn array<'a>(v: &'a Value, key: &str) -> Result<&'a Vec<Value>> {
    v.get(key).and_then(Value::as_array).ok_or_else(|| missing(key))
}

fn str_field<'a>(v: &'a Value, key: &str, path: &str) -> Result<&'a str> {
    v.get(key).and_then(Value::as_str).ok_or_else(|| missing(path))
}

fn missing(path: &str) -> SemgateError {
    SemgateError::InvalidManifest(format!("missing or mistyped {path}"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn manifest() -> Value {
        json!({
            "semantic_models": [{
                "name": "transactions",
                "measures": [
                    {"name": "gmv_total", "agg": "sum"},
                    {"name": "txn_count", "agg": "count"}
                ]
            }],
            "metrics": [
                {"name": "gmv", "type": "simple", "type_params": {"measure": {"name": "gmv_total"}}},
                {"name": "txns", "type": "simple", "type_params": {"measure": {"name": "txn_count"}, "extra": 1}},
                {"name": "gmv_per_txn", "type": "ratio", "type_params": {"numerator": {"name": "gmv"}}},
                {"name": "orphan", "type": "simple", "type_params": {"measure": {"name": "nowhere"}}}
            ]
        })
    }

    #[test]
    fn patches_simple_metrics_only() {
        let mut m = manifest();
        let report = patch_manifest(&mut m).unwrap();
        assert_eq!(report.patched, vec!["gmv", "txns"]);
        assert_eq!(report.skipped, vec!["orphan"]);

        assert_eq!(
            m.pointer("/metrics/1/type_params/metric_aggregation_params").unwrap(),
            &json!({"semantic_model": "transactions", "use_latest_partition": null, "agg": "count"})
        );
        // untouched fields survive
        assert_eq!(m.pointer("/metrics/1/type_params/extra").unwrap(), &json!(1));
        assert!(m.pointer("/metrics/2/type_params/metric_aggregation_params").is_none());
        assert!(m.pointer("/metrics/3/type_params/metric_aggregation_params").is_none());
    }

    #[test]
    fn patch_is_idempotent() {
        let mut once = manifest();
        patch_manifest(&mut once).unwrap();
        let mut twice = once.clone();
        patch_manifest(&mut twice).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn missing_agg_defaults_to_sum() {
        let mut m = json!({
            "semantic_models": [{"name": "sm", "measures": [{"name": "m"}]}],
            "metrics": [{"name": "x", "type": "simple", "type_params": {"measure": {"name": "m"}}}]
        });
        patch_manifest(&mut m).unwrap();
        assert_eq!(
            m.pointer("/metrics/0/type_params/metric_aggregation_params/agg").unwrap(),
            &json!("sum")
        );
    }

    #[test]
    fn simple_metric_without_measure_is_an_error() {
        let mut m = json!({
            "semantic_models": [],
            "metrics": [{"name": "x", "type": "simple", "type_params": {}}]
        });
        let err = patch_manifest(&mut m).unwrap_err();
        assert_eq!(err.client_code().as_str(), "INVALID_MANIFEST");
        assert!(err.to_string().contains("metrics[x].type_params.measure.name"));
    }
}
