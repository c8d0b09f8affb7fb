//! The record abstraction queried by the engine.
//!
//! The engine never assumes a record shape; it only requires that named
//! fields be resolvable through the [`Queryable`] trait. A built-in impl for
//! `serde_json::Value` covers the common case of schema-less rows; plain
//! structs implement the trait by hand.

use crate::path::{resolve, FieldPath};
use crate::value::FieldValue;

/// Trait for types that can be queried with a [`ListQuery`](crate::ListQuery).
///
/// # JSON Records
///
/// `serde_json::Value` implements this out of the box, with dotted paths
/// resolving into nested objects:
///
/// ```
/// use gridline::{FieldPath, FieldValue, Queryable};
/// use serde_json::json;
///
/// let record = json!({"buyer": {"name": "Sarah Ahmed"}});
/// assert_eq!(
///     record.field_value(&FieldPath::new("buyer.name")),
///     FieldValue::Text("Sarah Ahmed")
/// );
/// assert_eq!(
///     record.field_value(&FieldPath::new("seller.name")),
///     FieldValue::Missing
/// );
/// ```
///
/// # Manual Implementation
///
/// ```
/// use gridline::{FieldPath, FieldValue, Queryable};
///
/// struct Dispute {
///     id: String,
///     amount: f64,
/// }
///
/// impl Queryable for Dispute {
///     fn field_value(&self, path: &FieldPath) -> FieldValue<'_> {
///         match path.as_str() {
///             "id" => FieldValue::Text(&self.id),
///             "amount" => FieldValue::Num(self.amount),
///             _ => FieldValue::Missing,
///         }
///     }
/// }
/// ```
pub trait Queryable {
    /// Returns the value of the field at `path`, or [`FieldValue::Missing`]
    /// if the record has no such field.
    fn field_value(&self, path: &FieldPath) -> FieldValue<'_>;
}

impl Queryable for serde_json::Value {
    fn field_value(&self, path: &FieldPath) -> FieldValue<'_> {
        use serde_json::Value as Json;
        match resolve(self, path) {
            Some(Json::String(s)) => FieldValue::Text(s),
            Some(Json::Number(n)) => match n.as_f64() {
                Some(f) => FieldValue::Num(f),
                None => FieldValue::Missing,
            },
            Some(Json::Bool(b)) => FieldValue::Bool(*b),
            // null, arrays, objects, and absent fields all degrade the same way
            _ => FieldValue::Missing,
        }
    }
}
