//! Free-text search across multiple record fields.

use serde::{Deserialize, Serialize};

use crate::path::FieldPath;
use crate::record::Queryable;

/// A free-text search term matched against a set of fields.
///
/// Matching is case-insensitive substring containment: a record matches if
/// **any** listed field's string form contains the term. Numbers and
/// booleans are coerced to strings first, so an ID search behaves like an
/// email search. An empty term matches every record.
///
/// # Example
///
/// ```
/// use gridline::SearchSpec;
/// use serde_json::json;
///
/// let spec = SearchSpec::new("sarah", ["buyer.name", "seller.name"]);
/// let record = json!({"buyer": {"name": "Sarah Ahmed"},
///                     "seller": {"name": "David Chen"}});
/// assert!(spec.matches(&record));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchSpec {
    /// The text to look for.
    pub term: String,
    /// Fields to match against, in order.
    #[serde(default)]
    pub fields: Vec<FieldPath>,
}

impl SearchSpec {
    /// Creates a new search spec.
    pub fn new<I, P>(term: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<FieldPath>,
    {
        SearchSpec {
            term: term.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if the term is empty and the search matches everything.
    pub fn is_blank(&self) -> bool {
        self.term.is_empty()
    }

    /// Tests whether a record matches this search.
    pub fn matches<R: Queryable>(&self, record: &R) -> bool {
        if self.is_blank() {
            return true;
        }
        let needle = self.term.to_lowercase();
        self.fields.iter().any(|field| {
            match record.field_value(field).as_text() {
                Some(text) => text.to_lowercase().contains(&needle),
                None => false,
            }
        })
    }
}
