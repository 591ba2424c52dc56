use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Deserialize;
use semgate_core::error::{Result, SemgateError};
use semgate_core::protocol::engine::QueryResult;

/// Manifest location when neither `manifest_path` nor `DBT_PROJECT_DIR` is set.
pub const DEFAULT_MANIFEST_PATH: &str = "poc_semantic/target/semantic_manifest.json";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    pub engine: EngineSection,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(SemgateError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.engine.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Returned by `GET /`.
    #[serde(default = "default_health_message")]
    pub health_message: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            health_message: default_health_message(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            SemgateError::BadRequest(format!(
                "server.listen must be a valid socket address, got {}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8000".into()
}
fn default_health_message() -> String {
    "Semantic API running".into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// Group-bys from a dbt semantic manifest; no warehouse behind it.
    Manifest,
    /// Group-bys and a canned result straight from config.
    Static,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineSection {
    pub kind: EngineKind,

    // manifest
    #[serde(default)]
    pub manifest_path: Option<String>,

    // static
    #[serde(default)]
    pub group_bys: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub result: Option<QueryResult>,
}

impl EngineSection {
    pub fn validate(&self) -> Result<()> {
        match self.kind {
            EngineKind::Manifest => {
                if !self.group_bys.is_empty() || self.result.is_some() {
                    return Err(SemgateError::BadRequest(
                        "engine.group_bys/result are only valid with kind: static".into(),
                    ));
                }
            }
            EngineKind::Static => {
                if self.manifest_path.is_some() {
                    return Err(SemgateError::BadRequest(
                        "engine.manifest_path is only valid with kind: manifest".into(),
                    ));
                }
                if self.group_bys.is_empty() {
                    return Err(SemgateError::BadRequest(
                        "engine.group_bys must list at least one metric".into(),
                    ));
                }
                if let Some(r) = &self.result {
                    if let Some(row) = r.rows.iter().find(|row| row.len() != r.columns.len()) {
                        return Err(SemgateError::BadRequest(format!(
                            "engine.result rows must have {} values, found a row with {}",
                            r.columns.len(),
                            row.len()
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// `manifest_path`, else `$DBT_PROJECT_DIR/target/semantic_manifest.json`,
    /// else the default project location.
    pub fn manifest_path(&self) -> PathBuf {
        if let Some(p) = &self.manifest_path {
            return PathBuf::from(p);
        }
        match std::env::var("DBT_PROJECT_DIR") {
            Ok(dir) => PathBuf::from(dir).join("target").join("semantic_manifest.json"),
            Err(_) => PathBuf::from(DEFAULT_MANIFEST_PATH),
        }
    }
}
