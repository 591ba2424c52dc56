//! Metric engine data shapes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Group-by option reported by the engine for a metric list.
///
/// Engines expose the canonical label as `dunder_name`; some only fill
/// `name`. Items with neither carry no usable label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupByItem {
    #[serde(default)]
    pub dunder_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl GroupByItem {
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            dunder_name: Some(label.into()),
            name: None,
        }
    }

    /// Canonical label: `dunder_name`, falling back to `name`. Empty strings count as missing.
    pub fn label(&self) -> Option<&str> {
        self.dunder_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.name.as_deref().filter(|s| !s.is_empty()))
    }
}

/// Tabular engine output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    /// Pair column names with row values positionally. Values past the last
    /// column are dropped, missing trailing values are omitted.
    pub fn into_records(self) -> Vec<Map<String, Value>> {
        let columns = self.columns;
        self.rows
            .into_iter()
            .map(|row| columns.iter().cloned().zip(row).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn label_prefers_dunder_name() {
        let item = GroupByItem {
            dunder_name: Some("merchant__merchant_id".into()),
            name: Some("merchant_id".into()),
        };
        assert_eq!(item.label(), Some("merchant__merchant_id"));

        let item = GroupByItem { dunder_name: Some(String::new()), name: Some("metric_time".into()) };
        assert_eq!(item.label(), Some("metric_time"));

        assert_eq!(GroupByItem::default().label(), None);
    }

    #[test]
    fn records_zip_columns_and_rows() {
        let result = QueryResult {
            columns: vec!["merchant__merchant_id".into(), "gmv".into()],
            rows: vec![vec![json!("m1"), json!(10.5)], vec![json!("m2"), json!(3), json!("extra")]],
        };
        let records = result.into_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["merchant__merchant_id"], json!("m1"));
        assert_eq!(records[1]["gmv"], json!(3));
        assert_eq!(records[1].len(), 2);
    }
}
