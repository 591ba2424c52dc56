//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;

use semgate_core::error::{Result, SemgateError};

pub use schema::{EngineKind, EngineSection, GatewayConfig, ServerSection};

/// Config path used when `SEMGATE_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "semgate.yaml";

/// `SEMGATE_CONFIG`, else `semgate.yaml`.
pub fn config_path() -> String {
    std::env::var("SEMGATE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

pub fn load_from_file(path: &str) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| SemgateError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| SemgateError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
