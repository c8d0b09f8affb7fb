//! Typed, stable sorting of query results.
//!
//! A [`SortSpec`] names a field, a direction, and a type hint describing how
//! values compare: as text, numbers, dates, or ranks from a caller-supplied
//! table (e.g. `urgent > high > medium > normal`). Sorting is
//! decorate-sort-undecorate over `slice::sort_by`, which is stable, so rows
//! with equal keys keep their pre-sort order.
//!
//! Values that cannot produce a key under the requested hint (a missing
//! field, an `"N/A"` amount, an unparseable date) are pinned after every
//! valid key in both directions: direction applies to valid keys only.
//! Values merely absent from a rank table are different: they take the
//! lowest rank, which is an ordinary key and flips with direction.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::path::FieldPath;
use crate::record::Queryable;
use crate::value::FieldValue;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How field values are interpreted for comparison.
///
/// Unknown hints on the wire deserialize to `Text` rather than erroring,
/// so a stale or misspelled hint degrades to lexicographic order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortHint {
    /// Lexicographic comparison of the string form (case-sensitive).
    #[default]
    #[serde(rename = "string")]
    Text,
    /// Numeric comparison; strings that parse as numbers participate.
    Number,
    /// Compare by instant; accepts RFC 3339 / `YYYY-MM-DD` strings or
    /// epoch-millisecond numbers.
    Date,
    /// Compare by rank from the spec's [`rank table`](SortSpec::ranked).
    Enum,
}

impl<'de> Deserialize<'de> for SortHint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "number" => SortHint::Number,
            "date" => SortHint::Date,
            "enum" => SortHint::Enum,
            _ => SortHint::Text,
        })
    }
}

/// A sort order: field, direction, and type hint.
///
/// # Example
///
/// ```
/// use gridline::SortSpec;
///
/// let by_amount = SortSpec::desc("amount").numeric();
/// let by_priority = SortSpec::desc("priority")
///     .ranked([("urgent", 3), ("high", 2), ("medium", 1), ("normal", 0)]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    /// The field to sort by.
    pub field: FieldPath,
    /// The sort direction.
    #[serde(default)]
    pub direction: Dir,
    /// How values of the field compare.
    #[serde(default, rename = "type")]
    pub hint: SortHint,
    /// Value-to-rank table for [`SortHint::Enum`]. Values absent from the
    /// table take the lowest rank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_order: Option<HashMap<String, i64>>,
}

impl SortSpec {
    /// Creates a sort spec with the given direction, hinted as text.
    pub fn new(field: impl Into<FieldPath>, direction: Dir) -> Self {
        SortSpec {
            field: field.into(),
            direction,
            hint: SortHint::Text,
            enum_order: None,
        }
    }

    /// Creates an ascending text sort.
    pub fn asc(field: impl Into<FieldPath>) -> Self {
        SortSpec::new(field, Dir::Asc)
    }

    /// Creates a descending text sort.
    pub fn desc(field: impl Into<FieldPath>) -> Self {
        SortSpec::new(field, Dir::Desc)
    }

    /// Switches to numeric comparison.
    pub fn numeric(mut self) -> Self {
        self.hint = SortHint::Number;
        self
    }

    /// Switches to date comparison.
    pub fn date(mut self) -> Self {
        self.hint = SortHint::Date;
        self
    }

    /// Switches to rank-table comparison using the given value-to-rank map.
    pub fn ranked<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        self.hint = SortHint::Enum;
        self.enum_order = Some(order.into_iter().map(|(v, r)| (v.into(), r)).collect());
        self
    }

    /// Extracts the sort key for one record under this spec.
    fn key<R: Queryable>(&self, record: &R) -> SortKey {
        let value = record.field_value(&self.field);
        match self.hint {
            SortHint::Text => match value.as_text() {
                Some(text) => SortKey::Text(text.into_owned()),
                None => SortKey::Invalid,
            },
            SortHint::Number => match value {
                FieldValue::Num(n) if n.is_finite() => SortKey::Num(n),
                FieldValue::Text(s) => match s.trim().parse::<f64>() {
                    Ok(n) if n.is_finite() => SortKey::Num(n),
                    _ => SortKey::Invalid,
                },
                _ => SortKey::Invalid,
            },
            SortHint::Date => match value {
                // raw numbers are taken as epoch milliseconds
                FieldValue::Num(n) if n.is_finite() => SortKey::Num(n),
                FieldValue::Text(s) => match parse_date_millis(s) {
                    Some(millis) => SortKey::Num(millis as f64),
                    None => SortKey::Invalid,
                },
                _ => SortKey::Invalid,
            },
            SortHint::Enum => {
                let rank = value
                    .as_text()
                    .and_then(|text| {
                        self.enum_order
                            .as_ref()
                            .and_then(|order| order.get(text.as_ref()).copied())
                    })
                    .unwrap_or(i64::MIN);
                SortKey::Rank(rank)
            }
        }
    }

    /// Compares two extracted keys under this spec's direction.
    ///
    /// Invalid keys are pinned after all valid keys regardless of direction;
    /// ties return `Equal` and are left to the stable sort.
    fn compare_keys(&self, a: &SortKey, b: &SortKey) -> Ordering {
        match (a, b) {
            (SortKey::Invalid, SortKey::Invalid) => Ordering::Equal,
            (SortKey::Invalid, _) => Ordering::Greater,
            (_, SortKey::Invalid) => Ordering::Less,
            (SortKey::Text(a), SortKey::Text(b)) => self.direction.apply(a.cmp(b)),
            (SortKey::Num(a), SortKey::Num(b)) => {
                self.direction.apply(a.partial_cmp(b).unwrap_or(Ordering::Equal))
            }
            (SortKey::Rank(a), SortKey::Rank(b)) => self.direction.apply(a.cmp(b)),
            // one spec produces one key variant; mixed pairs cannot arise
            _ => Ordering::Equal,
        }
    }
}

/// A comparable key extracted from one record.
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Text(String),
    /// Finite numbers only; also carries date instants as epoch millis.
    Num(f64),
    Rank(i64),
    /// No key under the requested hint; pinned last in both directions.
    Invalid,
}

/// Sorts a filtered set of records in place according to `spec`.
///
/// Keys are extracted once per record, then sorted with `slice::sort_by`
/// (stable), so equal keys preserve the input order.
pub(crate) fn sort_records<R: Queryable>(items: &mut Vec<&R>, spec: &SortSpec) {
    let mut decorated: Vec<(SortKey, &R)> =
        items.drain(..).map(|record| (spec.key(record), record)).collect();
    decorated.sort_by(|(a, _), (b, _)| spec.compare_keys(a, b));
    items.extend(decorated.into_iter().map(|(_, record)| record));
}

fn parse_date_millis(s: &str) -> Option<i64> {
    let s = s.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc().timestamp_millis());
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sorted(records: &[serde_json::Value], spec: &SortSpec) -> Vec<serde_json::Value> {
        let mut refs: Vec<&serde_json::Value> = records.iter().collect();
        sort_records(&mut refs, spec);
        refs.into_iter().cloned().collect()
    }

    #[test]
    fn dir_apply() {
        assert_eq!(Dir::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Dir::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Dir::Desc.apply(Ordering::Equal), Ordering::Equal);
        assert!(Dir::Asc.is_asc());
        assert!(Dir::Desc.is_desc());
        assert_eq!(Dir::Asc.to_string(), "asc");
        assert_eq!(Dir::Desc.to_string(), "desc");
    }

    #[test]
    fn text_sort_is_case_sensitive_lexicographic() {
        let records = vec![
            json!({"name": "banana"}),
            json!({"name": "Apple"}),
            json!({"name": "apple"}),
        ];
        let out = sorted(&records, &SortSpec::asc("name"));
        // uppercase sorts before lowercase in code point order
        assert_eq!(out[0]["name"], "Apple");
        assert_eq!(out[1]["name"], "apple");
        assert_eq!(out[2]["name"], "banana");
    }

    #[test]
    fn numeric_sort_parses_string_amounts() {
        let records = vec![
            json!({"amount": "250.5"}),
            json!({"amount": 30}),
            json!({"amount": "7"}),
        ];
        let out = sorted(&records, &SortSpec::asc("amount").numeric());
        assert_eq!(out[0]["amount"], "7");
        assert_eq!(out[1]["amount"], 30);
        assert_eq!(out[2]["amount"], "250.5");
    }

    #[test]
    fn invalid_numbers_pinned_last_both_directions() {
        let records = vec![
            json!({"id": "a", "amount": "N/A"}),
            json!({"id": "b", "amount": 10}),
            json!({"id": "c", "amount": 5}),
        ];

        let asc = sorted(&records, &SortSpec::asc("amount").numeric());
        assert_eq!(asc[0]["id"], "c");
        assert_eq!(asc[1]["id"], "b");
        assert_eq!(asc[2]["id"], "a");

        let desc = sorted(&records, &SortSpec::desc("amount").numeric());
        assert_eq!(desc[0]["id"], "b");
        assert_eq!(desc[1]["id"], "c");
        assert_eq!(desc[2]["id"], "a");
    }

    #[test]
    fn date_sort_accepts_common_forms() {
        let records = vec![
            json!({"id": "rfc", "at": "2024-03-01T12:00:00Z"}),
            json!({"id": "day", "at": "2024-01-15"}),
            json!({"id": "ms",  "at": 1709300000000i64}), // 2024-03-01 13:33:20 UTC
        ];
        let out = sorted(&records, &SortSpec::asc("at").date());
        assert_eq!(out[0]["id"], "day");
        assert_eq!(out[1]["id"], "rfc");
        assert_eq!(out[2]["id"], "ms");
    }

    #[test]
    fn invalid_dates_pinned_last() {
        let records = vec![
            json!({"id": "bad", "at": "not a date"}),
            json!({"id": "null", "at": null}),
            json!({"id": "ok", "at": "2024-06-01"}),
        ];
        let out = sorted(&records, &SortSpec::desc("at").date());
        assert_eq!(out[0]["id"], "ok");
        // the two invalid rows keep their relative order
        assert_eq!(out[1]["id"], "bad");
        assert_eq!(out[2]["id"], "null");
    }

    #[test]
    fn ranked_sort_follows_table() {
        let records = vec![
            json!({"priority": "high"}),
            json!({"priority": "medium"}),
            json!({"priority": "urgent"}),
            json!({"priority": "normal"}),
        ];
        let spec = SortSpec::desc("priority")
            .ranked([("urgent", 3), ("high", 2), ("medium", 1), ("normal", 0)]);
        let out = sorted(&records, &spec);
        let order: Vec<&str> = out.iter().map(|r| r["priority"].as_str().unwrap()).collect();
        assert_eq!(order, ["urgent", "high", "medium", "normal"]);
    }

    #[test]
    fn unranked_values_take_lowest_rank() {
        let records = vec![
            json!({"id": "x", "priority": "whatever"}),
            json!({"id": "y", "priority": "high"}),
            json!({"id": "z"}),
        ];
        let spec = SortSpec::asc("priority").ranked([("high", 2), ("normal", 0)]);
        let out = sorted(&records, &spec);
        // lowest rank first under ascending; unranked and missing tie stably
        assert_eq!(out[0]["id"], "x");
        assert_eq!(out[1]["id"], "z");
        assert_eq!(out[2]["id"], "y");

        // and the lowest rank flips to the top under descending
        let spec = SortSpec::desc("priority").ranked([("high", 2), ("normal", 0)]);
        let out = sorted(&records, &spec);
        assert_eq!(out[0]["id"], "y");
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let records = vec![
            json!({"id": 1, "status": "open"}),
            json!({"id": 2, "status": "open"}),
            json!({"id": 3, "status": "closed"}),
            json!({"id": 4, "status": "open"}),
        ];
        let out = sorted(&records, &SortSpec::asc("status"));
        let ids: Vec<i64> = out.iter().map(|r| r["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, [3, 1, 2, 4]);
    }

    #[test]
    fn missing_field_pinned_last_for_text() {
        let records = vec![
            json!({"id": "none"}),
            json!({"id": "b", "name": "beta"}),
            json!({"id": "a", "name": "alpha"}),
        ];
        let out = sorted(&records, &SortSpec::asc("name"));
        assert_eq!(out[0]["id"], "a");
        assert_eq!(out[1]["id"], "b");
        assert_eq!(out[2]["id"], "none");
    }

    #[test]
    fn unknown_hint_falls_back_to_text() {
        let spec: SortSpec = serde_json::from_value(json!({
            "field": "name", "direction": "asc", "type": "fancy"
        }))
        .unwrap();
        assert_eq!(spec.hint, SortHint::Text);
    }

    #[test]
    fn wire_shape_deserializes() {
        let spec: SortSpec = serde_json::from_value(json!({
            "field": "priority",
            "direction": "desc",
            "type": "enum",
            "enumOrder": {"urgent": 3, "high": 2, "medium": 1, "normal": 0}
        }))
        .unwrap();
        assert_eq!(spec.field, FieldPath::new("priority"));
        assert_eq!(spec.direction, Dir::Desc);
        assert_eq!(spec.hint, SortHint::Enum);
        assert_eq!(spec.enum_order.as_ref().unwrap()["urgent"], 3);
    }

    #[test]
    fn defaults_on_the_wire() {
        let spec: SortSpec = serde_json::from_value(json!({"field": "name"})).unwrap();
        assert_eq!(spec.direction, Dir::Asc);
        assert_eq!(spec.hint, SortHint::Text);
        assert!(spec.enum_order.is_none());
    }

    #[test]
    fn parse_date_millis_forms() {
        assert_eq!(parse_date_millis("1970-01-01T00:00:00Z"), Some(0));
        assert_eq!(parse_date_millis("1970-01-01"), Some(0));
        assert_eq!(parse_date_millis("1970-01-01T00:00:01"), Some(1000));
        assert_eq!(parse_date_millis("not a date"), None);
        assert_eq!(parse_date_millis(""), None);
    }
}
