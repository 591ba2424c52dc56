//! Group-by label catalog derived from a semantic manifest.
//!
//! Labels per metric follow the engine's dunder naming:
//! - `<entity>` for every entity of the measure's semantic model
//! - `<primary>__<dim>` for categorical dimensions
//! - `<primary>__<dim>__<grain>` for time dimensions, one per supported grain
//! - `metric_time__<grain>` when the model declares an aggregation time dimension
//!
//! Derived and ratio metrics support the labels shared by all their inputs.
//! Joins across semantic models are not followed.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Result, SemgateError};
use crate::resolver::LABEL_SEPARATOR;

use super::model::{Metric, SemanticManifest, SemanticModel};

/// Time grains from finest to coarsest.
pub const GRAINS: [&str; 5] = ["day", "week", "month", "quarter", "year"];

/// Grain assumed when a time dimension does not declare one.
pub const DEFAULT_GRAIN: &str = "day";

/// Virtual time dimension every metric with an aggregation time dimension exposes.
pub const METRIC_TIME: &str = "metric_time";

/// Metric name -> group-by labels it supports.
#[derive(Debug, Clone, Default)]
pub struct LabelCatalog {
    by_metric: BTreeMap<String, BTreeSet<String>>,
}

impl LabelCatalog {
    pub fn from_manifest(manifest: &SemanticManifest) -> Result<Self> {
        let mut by_metric = BTreeMap::new();
        for metric in &manifest.metrics {
            let labels = metric_labels(manifest, metric, &mut Vec::new())?;
            by_metric.insert(metric.name.clone(), labels);
        }
        Ok(Self { by_metric })
    }

    pub fn metrics(&self) -> impl Iterator<Item = &str> {
        self.by_metric.keys().map(String::as_str)
    }

    /// Labels valid for every metric in `metrics`. Unknown metrics are an error.
    pub fn labels_for(&self, metrics: &[String]) -> Result<BTreeSet<String>> {
        let mut out: Option<BTreeSet<String>> = None;
        for name in metrics {
            let labels = self
                .by_metric
                .get(name)
                .ok_or_else(|| SemgateError::BadRequest(format!("unknown metric: {name}")))?;
            out = Some(match out {
                None => labels.clone(),
                Some(acc) => acc.intersection(labels).cloned().collect(),
            });
        }
        Ok(out.unwrap_or_default())
    }
}

fn metric_labels<'a>(
    manifest: &'a SemanticManifest,
    metric: &'a Metric,
    stack: &mut Vec<&'a str>,
) -> Result<BTreeSet<String>> {
    if stack.contains(&metric.name.as_str()) {
        return Err(SemgateError::InvalidManifest(format!(
            "metric reference cycle through {}",
            metric.name
        )));
    }

    let params = &metric.type_params;
    if let Some(measure) = &params.measure {
        let model = manifest.model_for_measure(&measure.name).ok_or_else(|| {
            SemgateError::InvalidManifest(format!(
                "metric {} references unknown measure {}",
                metric.name, measure.name
            ))
        })?;
        return Ok(model_labels(model));
    }

    let inputs: Vec<&str> = params
        .metrics
        .iter()
        .flatten()
        .chain(params.numerator.iter())
        .chain(params.denominator.iter())
        .map(|r| r.name.as_str())
        .collect();
    if inputs.is_empty() {
        return Err(SemgateError::InvalidManifest(format!(
            "metric {} has neither a measure nor input metrics",
            metric.name
        )));
    }

    stack.push(metric.name.as_str());
    let mut out: Option<BTreeSet<String>> = None;
    for name in inputs {
        let input = manifest.metric(name).ok_or_else(|| {
            SemgateError::InvalidManifest(format!(
                "metric {} references unknown metric {name}",
                metric.name
            ))
        })?;
        let labels = metric_labels(manifest, input, stack)?;
        out = Some(match out {
            None => labels,
            Some(acc) => acc.intersection(&labels).cloned().collect(),
        });
    }
    stack.pop();

    Ok(out.unwrap_or_default())
}

fn model_labels(model: &SemanticModel) -> BTreeSet<String> {
    let mut labels: BTreeSet<String> = model.entities.iter().map(|e| e.name.clone()).collect();

    let Some(primary) = model.primary_entity() else {
        tracing::warn!(model = %model.name, "semantic model has no entity, dimensions skipped");
        return labels;
    };

    for dim in &model.dimensions {
        let base = join(&[&primary.name, &dim.name]);
        if dim.is_time() {
            for grain in grains_from(dim.time_granularity().unwrap_or(DEFAULT_GRAIN)) {
                labels.insert(join(&[&base, grain]));
            }
        } else {
            labels.insert(base);
        }
    }

    let agg_time = model
        .defaults
        .as_ref()
        .and_then(|d| d.agg_time_dimension.as_deref());
    if let Some(dim_name) = agg_time {
        let grain = model
            .dimensions
            .iter()
            .find(|d| d.name == dim_name)
            .and_then(|d| d.time_granularity())
            .unwrap_or(DEFAULT_GRAIN);
        for grain in grains_from(grain) {
            labels.insert(join(&[METRIC_TIME, grain]));
        }
    }

    labels
}

/// `grain` and every coarser grain. Unknown grains fall back to the default.
fn grains_from(grain: &str) -> &'static [&'static str] {
    let start = GRAINS
        .iter()
        .position(|g| g.eq_ignore_ascii_case(grain))
        .or_else(|| GRAINS.iter().position(|g| *g == DEFAULT_GRAIN))
        .unwrap_or(0);
    &GRAINS[start..]
}

fn join(parts: &[&str]) -> String {
    parts.join(LABEL_SEPARATOR)
}
