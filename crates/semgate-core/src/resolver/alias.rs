//! Alias map: accepted spellings -> canonical group-by labels.
//!
//! Every label registers three keys (exact, dotted, terminal segment). Keys
//! shared by several labels keep all of them; such a key is ambiguous and
//! never resolves on its own.

use std::collections::{BTreeMap, BTreeSet};

use super::LABEL_SEPARATOR;

/// Separator accepted in place of `__` in user input (`merchant.merchant_id`).
pub const DOTTED_SEPARATOR: &str = ".";

#[derive(Debug, Default, Clone)]
pub struct AliasMap {
    keys: BTreeMap<String, BTreeSet<String>>,
}

impl AliasMap {
    /// Build the alias map for one label universe.
    pub fn build<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut map = Self::default();
        for label in labels {
            map.register(label.to_string(), label);
            map.register(label.replace(LABEL_SEPARATOR, DOTTED_SEPARATOR), label);
            map.register(terminal_segment(label).to_string(), label);
        }
        map
    }

    fn register(&mut self, key: String, label: &str) {
        self.keys.entry(key).or_default().insert(label.to_string());
    }

    /// All labels registered under `key` (sorted), if any.
    pub fn candidates(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.keys.get(key)
    }

    /// The single label owning `key`, or `None` if absent or ambiguous.
    pub fn unique(&self, key: &str) -> Option<&str> {
        let set = self.keys.get(key)?;
        if set.len() != 1 {
            return None;
        }
        set.iter().next().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Last path component of a label (`txn__txn_ts__day` -> `day`).
pub fn terminal_segment(label: &str) -> &str {
    label.rsplit(LABEL_SEPARATOR).next().unwrap_or(label)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn registers_three_spellings() {
        let map = AliasMap::build(["txn__txn_ts__day"]);
        assert_eq!(map.unique("txn__txn_ts__day"), Some("txn__txn_ts__day"));
        assert_eq!(map.unique("txn.txn_ts.day"), Some("txn__txn_ts__day"));
        assert_eq!(map.unique("day"), Some("txn__txn_ts__day"));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn colliding_terminal_segments_are_ambiguous() {
        let map = AliasMap::build(["merchant__id", "customer__id"]);
        assert_eq!(map.unique("id"), None);
        let cands: Vec<&str> = map.candidates("id").unwrap().iter().map(String::as_str).collect();
        assert_eq!(cands, vec!["customer__id", "merchant__id"]);
    }

    #[test]
    fn bare_label_registers_once() {
        let map = AliasMap::build(["metric_time"]);
        assert_eq!(map.len(), 1);
        assert_eq!(map.unique("metric_time"), Some("metric_time"));
    }

    #[test]
    fn terminal_segment_of_plain_label_is_itself() {
        assert_eq!(terminal_segment("merchant"), "merchant");
        assert_eq!(terminal_segment("a__b__c"), "c");
    }
}
