//! HTTP bodies for the query API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message returned with HTTP 400 when group-bys do not resolve.
pub const UNRESOLVED_MESSAGE: &str = "Could not resolve one or more group_by items.";

/// `POST /query` request body.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryBody {
    pub metrics: Vec<String>,
    #[serde(default)]
    pub group_by: Vec<String>,
}

/// `POST /query` success body: one object per result row.
#[derive(Debug, Serialize)]
pub struct DataBody {
    pub data: Vec<Map<String, Value>>,
}

/// HTTP 400 body listing every unresolved group-by and its candidates.
#[derive(Debug, Serialize)]
pub struct UnresolvedBody {
    pub message: String,
    pub unresolved: BTreeMap<String, Vec<String>>,
}

impl UnresolvedBody {
    pub fn new(unresolved: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            message: UNRESOLVED_MESSAGE.to_string(),
            unresolved,
        }
    }
}

/// HTTP 503 body: human-readable hint plus the underlying error.
#[derive(Debug, Serialize)]
pub struct UnavailableBody {
    pub message: String,
    pub error: String,
}

/// Plain `{"message": ...}` body for malformed requests.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

/// `GET /` health body.
#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub message: String,
}

impl HealthBody {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok",
            message: message.into(),
        }
    }
}
