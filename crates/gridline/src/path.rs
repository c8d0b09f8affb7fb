//! Dotted field paths and their resolution against JSON records.
//!
//! A [`FieldPath`] names a (possibly nested) attribute on a record, e.g.
//! `"status"` or `"buyer.name"`. Resolution walks the record one segment at
//! a time and yields `None` when any step is missing or not an object; it
//! never panics, because row shapes vary across tables.

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

/// A dot-separated path locating a value within a record.
///
/// # Example
///
/// ```
/// use gridline::FieldPath;
///
/// let path = FieldPath::new("buyer.name");
/// assert_eq!(path.segments().collect::<Vec<_>>(), ["buyer", "name"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(String);

impl FieldPath {
    /// Creates a new field path.
    pub fn new(path: impl Into<String>) -> Self {
        FieldPath(path.into())
    }

    /// Returns the path as the original dotted string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the dot-separated segments of the path.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        FieldPath::new(path)
    }
}

impl From<String> for FieldPath {
    fn from(path: String) -> Self {
        FieldPath(path)
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolves a field path against a JSON record.
///
/// Returns `None` if any intermediate segment is missing or not an object.
///
/// # Example
///
/// ```
/// use gridline::FieldPath;
/// use serde_json::json;
///
/// let record = json!({"buyer": {"name": "Sarah Ahmed"}});
/// let value = gridline::resolve(&record, &FieldPath::new("buyer.name"));
/// assert_eq!(value, Some(&json!("Sarah Ahmed")));
///
/// assert_eq!(gridline::resolve(&record, &FieldPath::new("seller.name")), None);
/// ```
pub fn resolve<'a>(record: &'a Json, path: &FieldPath) -> Option<&'a Json> {
    let mut current = record;
    for segment in path.segments() {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flat_field() {
        let record = json!({"status": "open"});
        assert_eq!(
            resolve(&record, &FieldPath::new("status")),
            Some(&json!("open"))
        );
    }

    #[test]
    fn nested_field() {
        let record = json!({"buyer": {"name": "Sarah Ahmed", "id": 7}});
        assert_eq!(
            resolve(&record, &FieldPath::new("buyer.name")),
            Some(&json!("Sarah Ahmed"))
        );
        assert_eq!(resolve(&record, &FieldPath::new("buyer.id")), Some(&json!(7)));
    }

    #[test]
    fn missing_segment_is_none() {
        let record = json!({"buyer": {"name": "Sarah"}});
        assert_eq!(resolve(&record, &FieldPath::new("seller.name")), None);
        assert_eq!(resolve(&record, &FieldPath::new("buyer.email")), None);
    }

    #[test]
    fn non_object_intermediate_is_none() {
        let record = json!({"buyer": "just a string"});
        assert_eq!(resolve(&record, &FieldPath::new("buyer.name")), None);

        let record = json!({"amounts": [1, 2, 3]});
        assert_eq!(resolve(&record, &FieldPath::new("amounts.first")), None);
    }

    #[test]
    fn deep_nesting() {
        let record = json!({"a": {"b": {"c": {"d": 42}}}});
        assert_eq!(
            resolve(&record, &FieldPath::new("a.b.c.d")),
            Some(&json!(42))
        );
    }

    #[test]
    fn path_display_and_segments() {
        let path = FieldPath::new("businessHours.start");
        assert_eq!(path.to_string(), "businessHours.start");
        assert_eq!(
            path.segments().collect::<Vec<_>>(),
            ["businessHours", "start"]
        );
    }

    #[test]
    fn path_deserializes_from_plain_string() {
        let path: FieldPath = serde_json::from_str("\"buyer.name\"").unwrap();
        assert_eq!(path, FieldPath::new("buyer.name"));
    }
}
