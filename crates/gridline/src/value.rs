//! Scalar field values extracted from records.
//!
//! [`FieldValue`] is the runtime view of one field handed to predicates and
//! comparators. Anything that is not a scalar (absent fields, nulls, arrays,
//! nested objects) collapses to [`FieldValue::Missing`].

use std::borrow::Cow;

/// The value of a record field at query time, borrowed where possible.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// String value (borrowed from the record).
    Text(&'a str),
    /// Numeric value.
    Num(f64),
    /// Boolean value.
    Bool(bool),
    /// Field absent, null, or not a scalar.
    Missing,
}

impl<'a> FieldValue<'a> {
    /// Returns `true` if the field was absent or not a scalar.
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// Extracts the borrowed string, if this is a text value.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the numeric value, if present.
    pub fn as_num(&self) -> Option<f64> {
        match self {
            FieldValue::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The string form of the value, used for substring search.
    ///
    /// Numbers and booleans coerce to their display form so that IDs and
    /// flags are searchable alongside names and emails. Whole numbers render
    /// without a decimal point (`42`, not `42.0`), matching how they appear
    /// in the records they came from. `Missing` has no string form.
    pub fn as_text(&self) -> Option<Cow<'a, str>> {
        match self {
            FieldValue::Text(s) => Some(Cow::Borrowed(s)),
            FieldValue::Num(n) => Some(Cow::Owned(format_number(*n))),
            FieldValue::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            FieldValue::Missing => None,
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
