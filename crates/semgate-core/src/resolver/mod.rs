//! Group-by resolution.
//!
//! Maps caller-supplied, possibly abbreviated group-by names onto the
//! canonical labels the metric engine reports for the requested metrics.
//! The result is all-or-nothing: either every input resolved (in input
//! order) or every failing input is reported with its candidates.
//!
//! The alias map is rebuilt on every call. The valid label universe depends
//! on which metrics are queried, so nothing here is cached.

pub mod alias;

use std::collections::{BTreeMap, BTreeSet};

pub use alias::{terminal_segment, AliasMap, DOTTED_SEPARATOR};

/// Segment separator inside canonical labels (`entity__dimension`).
pub const LABEL_SEPARATOR: &str = "__";

/// Outcome of resolving one request's group-by list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// One canonical label per raw input, same order.
    Resolved(Vec<String>),
    /// Every unresolved raw input -> sorted candidate labels.
    Unresolved(BTreeMap<String, Vec<String>>),
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

/// Resolve `raw_inputs` against `available_labels`.
///
/// Per input:
/// 1. an alias key owned by exactly one label resolves to that label;
/// 2. otherwise every label whose terminal segment is the input, or that
///    ends in `__<input>`, is a candidate, and a single candidate resolves;
/// 3. otherwise the input is unresolved, hinting the candidates or, when
///    there are none, the whole label set.
pub fn resolve(raw_inputs: &[String], available_labels: &BTreeSet<String>) -> Resolution {
    let aliases = AliasMap::build(available_labels.iter().map(String::as_str));

    let mut resolved = Vec::with_capacity(raw_inputs.len());
    let mut unresolved: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for raw in raw_inputs {
        if let Some(label) = aliases.unique(raw) {
            resolved.push(label.to_string());
            continue;
        }

        let suffix = format!("{LABEL_SEPARATOR}{raw}");
        // BTreeSet iteration keeps candidates sorted.
        let candidates: Vec<String> = available_labels
            .iter()
            .filter(|label| terminal_segment(label) == raw.as_str() || label.ends_with(&suffix))
            .cloned()
            .collect();

        match candidates.len() {
            1 => resolved.extend(candidates),
            0 => {
                tracing::debug!(group_by = %raw, "group_by matches no label");
                unresolved.insert(raw.clone(), available_labels.iter().cloned().collect());
            }
            n => {
                tracing::debug!(group_by = %raw, candidates = n, "group_by is ambiguous");
                unresolved.insert(raw.clone(), candidates);
            }
        }
    }

    if unresolved.is_empty() {
        Resolution::Resolved(resolved)
    } else {
        Resolution::Unresolved(unresolved)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use super::*;

    fn labels(xs: &[&str]) -> BTreeSet<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    fn inputs(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    fn unresolved(res: Resolution) -> BTreeMap<String, Vec<String>> {
        match res {
            Resolution::Unresolved(m) => m,
            Resolution::Resolved(v) => panic!("expected unresolved, got {v:?}"),
        }
    }

    #[test]
    fn exact_label_resolves_to_itself() {
        let avail = labels(&["merchant__merchant_id", "txn__txn_ts__day"]);
        let res = resolve(&inputs(&["txn__txn_ts__day"]), &avail);
        assert_eq!(res, Resolution::Resolved(inputs(&["txn__txn_ts__day"])));
    }

    #[test]
    fn dotted_spelling_resolves() {
        let avail = labels(&["merchant__merchant_id"]);
        let res = resolve(&inputs(&["merchant.merchant_id"]), &avail);
        assert_eq!(res, Resolution::Resolved(inputs(&["merchant__merchant_id"])));
    }

    #[test]
    fn order_is_preserved() {
        let avail = labels(&["x__b", "y__a"]);
        let res = resolve(&inputs(&["x__b", "a"]), &avail);
        assert_eq!(res, Resolution::Resolved(inputs(&["x__b", "y__a"])));
    }

    #[test]
    fn shared_terminal_segment_is_reported_not_picked() {
        let avail = labels(&["a__id", "c__id"]);
        let res = unresolved(resolve(&inputs(&["id"]), &avail));
        assert_eq!(res["id"], inputs(&["a__id", "c__id"]));
    }

    #[test]
    fn multi_segment_suffix_disambiguates() {
        // "day" alone is ambiguous, "txn_ts__day" is not.
        let avail = labels(&["txn__txn_ts__day", "txn__settled_ts__day"]);
        let res = resolve(&inputs(&["txn_ts__day"]), &avail);
        assert_eq!(res, Resolution::Resolved(inputs(&["txn__txn_ts__day"])));

        let res = unresolved(resolve(&inputs(&["day"]), &avail));
        assert_eq!(res["day"], inputs(&["txn__settled_ts__day", "txn__txn_ts__day"]));
    }

    #[test]
    fn suffix_match_respects_segment_boundary() {
        let avail = labels(&["merchant__merchant_id", "txn__txn_ts__day"]);
        let res = unresolved(resolve(&inputs(&["id"]), &avail));
        assert_eq!(res["id"], inputs(&["merchant__merchant_id", "txn__txn_ts__day"]));
    }

    #[test]
    fn collects_every_failure_in_one_pass() {
        let avail = labels(&["a__id", "c__id", "a__name"]);
        let res = unresolved(resolve(&inputs(&["name", "id", "nope"]), &avail));
        assert_eq!(res.len(), 2);
        assert_eq!(res["id"], inputs(&["a__id", "c__id"]));
        assert_eq!(res["nope"], inputs(&["a__id", "a__name", "c__id"]));
    }

    #[test]
    fn bare_label_colliding_with_terminal_segment_is_ambiguous() {
        let avail = labels(&["merchant", "txn__merchant"]);
        let res = unresolved(resolve(&inputs(&["merchant"]), &avail));
        assert_eq!(res["merchant"], inputs(&["merchant", "txn__merchant"]));

        // the dunder spelling stays unique
        let res = resolve(&inputs(&["txn__merchant"]), &avail);
        assert_eq!(res, Resolution::Resolved(inputs(&["txn__merchant"])));
    }

    #[test]
    fn empty_request_resolves_to_empty_list() {
        let res = resolve(&[], &BTreeSet::new());
        assert!(res.is_resolved());
        assert_eq!(res, Resolution::Resolved(vec![]));
    }

    #[test]
    fn empty_label_universe_rejects_everything() {
        let res = unresolved(resolve(&inputs(&["anything"]), &BTreeSet::new()));
        assert!(res["anything"].is_empty());
    }

    #[test]
    fn input_is_case_sensitive() {
        let avail = labels(&["merchant__merchant_id"]);
        let res = unresolved(resolve(&inputs(&["MERCHANT_ID"]), &avail));
        assert_eq!(res["MERCHANT_ID"], inputs(&["merchant__merchant_id"]));
    }
}
