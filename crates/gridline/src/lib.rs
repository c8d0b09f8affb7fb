//! Gridline - List-query engine for in-memory record collections.
//!
//! Gridline answers the question every data table asks: given a pile of
//! records and the current UI state (search box, filter dropdowns, sort
//! column, pager), which rows go on screen, in what order, and what do the
//! page controls say? It supports:
//!
//! - Free-text search across multiple fields (case-insensitive substring)
//! - Facet filters: exact-match dropdowns with an `"all"` no-op sentinel
//! - Typed sorting: text, numeric, date, or rank-table ordering, always stable
//! - 1-based pagination with total-match and total-page metadata
//! - Schema-less records: dotted field paths (`buyer.name`) resolved
//!   defensively, so heterogeneous row shapes never panic
//!
//! # Quick Start
//!
//! ```rust
//! use gridline::{ListQuery, SortSpec};
//! use serde_json::json;
//!
//! let disputes = vec![
//!     json!({"id": "D-101", "status": "open", "priority": "high",
//!            "buyer": {"name": "Sarah Ahmed"}}),
//!     json!({"id": "D-102", "status": "resolved", "priority": "urgent",
//!            "buyer": {"name": "David Chen"}}),
//!     json!({"id": "D-103", "status": "open", "priority": "normal",
//!            "buyer": {"name": "Maya Ortiz"}}),
//! ];
//!
//! let query = ListQuery::new()
//!     .search("sarah", ["buyer.name", "id"])
//!     .facet("status", "open")
//!     .sort(SortSpec::desc("priority")
//!         .ranked([("urgent", 3), ("high", 2), ("medium", 1), ("normal", 0)]))
//!     .page(1, 10)?
//!     .build();
//!
//! let result = query.run(&disputes);
//! assert_eq!(result.total_matched, 1);
//! assert_eq!(result.items[0]["id"], "D-101");
//! # Ok::<(), gridline::QueryError>(())
//! ```
//!
//! # Pipeline Semantics
//!
//! Execution is strictly ordered and must not be rearranged:
//!
//! ```text
//! records --filter--> matched --sort--> ordered --paginate--> page
//! ```
//!
//! The filter clause is:
//!
//! ```text
//! match = (search term empty, OR some search field contains it)
//!       ∧ (every non-wildcard facet matches exactly)
//! ```
//!
//! `total_matched` counts the filtered set before pagination, so callers can
//! render "Showing X-Y of Z" independent of the returned page's length.
//!
//! # Missing and Malformed Values
//!
//! Records are heterogeneous: a field referenced by a query may be absent,
//! nested differently, or carry the wrong type. Gridline never fails on data
//! shape; the policy is:
//!
//! | Situation | Search | Facet | Sort |
//! |-----------|--------|-------|------|
//! | Field missing / non-scalar | no match | no match | pinned last |
//! | Non-numeric under `number` hint | - | - | pinned last |
//! | Unparseable under `date` hint | - | - | pinned last |
//! | Value absent from rank table | - | - | lowest rank |
//!
//! "Pinned last" means after every valid key in **both** directions: an
//! `"N/A"` amount stays at the bottom whether the column is sorted ascending
//! or descending. Lowest rank, by contrast, is an ordinary key and flips
//! with direction. The only hard error in the crate is a zero page size,
//! which is a caller bug rather than a data problem.

mod engine;
mod error;
mod facet;
mod page;
mod path;
mod record;
mod search;
mod sort;
mod value;

// Re-export public API
pub use engine::{ListQuery, QueryResult};
pub use error::{QueryError, Result};
pub use facet::{Facet, FacetValue, ALL_SENTINEL};
pub use page::PageSpec;
pub use path::{resolve, FieldPath};
pub use record::Queryable;
pub use search::SearchSpec;
pub use sort::{Dir, SortHint, SortSpec};
pub use value::FieldValue;
