//! dbt semantic manifest tooling.
//!
//! - `patch`: adds `metric_aggregation_params` to simple metrics (untyped JSON rewrite).
//! - `catalog`: derives the canonical group-by labels each metric supports.
//! - `model`: the typed subset of the manifest the catalog reads.

pub mod catalog;
pub mod model;
pub mod patch;

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{Result, SemgateError};

pub use catalog::LabelCatalog;
pub use model::SemanticManifest;
pub use patch::{patch_manifest, PatchReport};

/// Read a manifest file as untyped JSON.
pub fn read_json(path: &Path) -> Result<Value> {
    let s = fs::read_to_string(path).map_err(|e| {
        SemgateError::Internal(format!("read manifest failed ({}): {e}", path.display()))
    })?;
    serde_json::from_str(&s).map_err(|e| {
        SemgateError::InvalidManifest(format!("invalid json in {}: {e}", path.display()))
    })
}

/// Write a manifest back as 2-space indented JSON.
pub fn write_json(path: &Path, manifest: &Value) -> Result<()> {
    let s = serde_json::to_string_pretty(manifest)
        .map_err(|e| SemgateError::Internal(format!("serialize manifest failed: {e}")))?;
    fs::write(path, s).map_err(|e| {
        SemgateError::Internal(format!("write manifest failed ({}): {e}", path.display()))
    })
}

/// Load the typed manifest view used for label discovery.
pub fn load_manifest(path: &Path) -> Result<SemanticManifest> {
    let v = read_json(path)?;
    SemanticManifest::from_value(v)
}
