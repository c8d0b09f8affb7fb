//! Facet filters: exact-match dropdown constraints.
//!
//! A [`Facet`] reproduces a status/priority/type dropdown: the record's
//! field must equal the selected value exactly (case-sensitive). The value
//! `"all"` is a no-op sentinel meaning "unconstrained", matching the
//! conventional first entry of such dropdowns. Multiple facets combine with
//! logical AND.

use serde::{Deserialize, Serialize};

use crate::path::FieldPath;
use crate::record::Queryable;
use crate::value::FieldValue;

/// The no-op sentinel: a facet whose value is this string constrains nothing.
pub const ALL_SENTINEL: &str = "all";

/// A single exact-match filter on one field.
///
/// # Example
///
/// ```
/// use gridline::Facet;
/// use serde_json::json;
///
/// let open_only = Facet::new("status", "open");
/// assert!(open_only.matches(&json!({"status": "open"})));
/// assert!(!open_only.matches(&json!({"status": "resolved"})));
///
/// // The "all" sentinel matches everything, including records
/// // that lack the field entirely.
/// let any_status = Facet::any("status");
/// assert!(any_status.matches(&json!({})));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facet {
    /// The field the dropdown constrains.
    pub field: FieldPath,
    /// The selected value.
    pub value: FacetValue,
}

impl Facet {
    /// Creates a new facet filter.
    pub fn new(field: impl Into<FieldPath>, value: impl Into<FacetValue>) -> Self {
        Facet {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates an unconstrained facet (the `"all"` sentinel).
    pub fn any(field: impl Into<FieldPath>) -> Self {
        Facet::new(field, ALL_SENTINEL)
    }

    /// Returns `true` if this facet is the no-op sentinel.
    pub fn is_wildcard(&self) -> bool {
        matches!(&self.value, FacetValue::Text(t) if t == ALL_SENTINEL)
    }

    /// Tests whether a record satisfies this facet.
    ///
    /// Missing fields and type mismatches never satisfy an active facet.
    pub fn matches<R: Queryable>(&self, record: &R) -> bool {
        if self.is_wildcard() {
            return true;
        }
        match (&self.value, record.field_value(&self.field)) {
            (FacetValue::Text(want), FieldValue::Text(have)) => want == have,
            (FacetValue::Num(want), FieldValue::Num(have)) => *want == have,
            (FacetValue::Bool(want), FieldValue::Bool(have)) => *want == have,
            _ => false,
        }
    }
}

/// The selected value of a facet filter.
///
/// Deserializes untagged, so the wire shape `{"field": "status",
/// "value": "open"}` works for strings, numbers, and booleans alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FacetValue {
    /// Boolean selection.
    Bool(bool),
    /// Numeric selection.
    Num(f64),
    /// String selection. `"all"` is the no-op sentinel.
    Text(String),
}

impl From<&str> for FacetValue {
    fn from(s: &str) -> Self {
        FacetValue::Text(s.to_string())
    }
}

impl From<String> for FacetValue {
    fn from(s: String) -> Self {
        FacetValue::Text(s)
    }
}

impl From<bool> for FacetValue {
    fn from(b: bool) -> Self {
        FacetValue::Bool(b)
    }
}

impl From<f64> for FacetValue {
    fn from(n: f64) -> Self {
        FacetValue::Num(n)
    }
}

impl From<f32> for FacetValue {
    fn from(n: f32) -> Self {
        FacetValue::Num(n as f64)
    }
}

impl From<i32> for FacetValue {
    fn from(n: i32) -> Self {
        FacetValue::Num(n as f64)
    }
}

impl From<i64> for FacetValue {
    fn from(n: i64) -> Self {
        FacetValue::Num(n as f64)
    }
}

impl From<u32> for FacetValue {
    fn from(n: u32) -> Self {
        FacetValue::Num(n as f64)
    }
}

impl From<u64> for FacetValue {
    fn from(n: u64) -> Self {
        FacetValue::Num(n as f64)
    }
}
