//! Typed subset of `semantic_manifest.json`.
//!
//! Only the fields label discovery needs are modelled; everything else in
//! the manifest is ignored (no `deny_unknown_fields` here, dbt adds fields
//! across releases).

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, SemgateError};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SemanticManifest {
    #[serde(default)]
    pub semantic_models: Vec<SemanticModel>,
    #[serde(default)]
    pub metrics: Vec<Metric>,
}

impl SemanticManifest {
    pub fn from_value(v: Value) -> Result<Self> {
        serde_json::from_value(v)
            .map_err(|e| SemgateError::InvalidManifest(format!("unexpected manifest shape: {e}")))
    }

    pub fn model(&self, name: &str) -> Option<&SemanticModel> {
        self.semantic_models.iter().find(|m| m.name == name)
    }

    pub fn metric(&self, name: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.name == name)
    }

    /// Semantic model that declares `measure`.
    pub fn model_for_measure(&self, measure: &str) -> Option<&SemanticModel> {
        self.semantic_models
            .iter()
            .find(|m| m.measures.iter().any(|x| x.name == measure))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SemanticModel {
    pub name: String,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
    #[serde(default)]
    pub measures: Vec<Measure>,
    #[serde(default)]
    pub defaults: Option<ModelDefaults>,
}

impl SemanticModel {
    /// First `primary` entity, else the first entity declared.
    pub fn primary_entity(&self) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|e| e.entity_type.eq_ignore_ascii_case("primary"))
            .or_else(|| self.entities.first())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Entity {
    pub name: String,
    #[serde(rename = "type", default)]
    pub entity_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Dimension {
    pub name: String,
    #[serde(rename = "type", default)]
    pub dimension_type: String,
    #[serde(default)]
    pub type_params: Option<DimensionTypeParams>,
}

impl Dimension {
    pub fn is_time(&self) -> bool {
        self.dimension_type.eq_ignore_ascii_case("time")
    }

    pub fn time_granularity(&self) -> Option<&str> {
        self.type_params.as_ref()?.time_granularity.as_deref()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DimensionTypeParams {
    #[serde(default)]
    pub time_granularity: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Measure {
    pub name: String,
    #[serde(default)]
    pub agg: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelDefaults {
    #[serde(default)]
    pub agg_time_dimension: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Metric {
    pub name: String,
    #[serde(rename = "type", default)]
    pub metric_type: String,
    #[serde(default)]
    pub type_params: MetricTypeParams,
}

/// Metric inputs. Simple and cumulative metrics name a measure; derived
/// metrics list other metrics; ratio metrics name a numerator/denominator.
/// dbt writes `null` for unused lists, hence the `Option`s.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricTypeParams {
    #[serde(default)]
    pub measure: Option<NamedRef>,
    #[serde(default)]
    pub metrics: Option<Vec<NamedRef>>,
    #[serde(default)]
    pub numerator: Option<NamedRef>,
    #[serde(default)]
    pub denominator: Option<NamedRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedRef {
    pub name: String,
}
