//! The query itself: declarative options plus execution.
//!
//! [`ListQuery`] composes the leaf pieces in a fixed order:
//! filter (search + facets) -> sort -> paginate. Sorting runs on the
//! filtered set and pagination on the sorted set; reordering the stages
//! changes observable behavior, so there is exactly one pipeline.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::facet::{Facet, FacetValue};
use crate::page::PageSpec;
use crate::path::FieldPath;
use crate::record::Queryable;
use crate::search::SearchSpec;
use crate::sort::{sort_records, SortSpec};

/// A declarative list query: search, facets, sort, page.
///
/// Build one fluently or deserialize it from the JSON options shape the
/// surrounding UI keeps in component state:
///
/// ```
/// use gridline::ListQuery;
/// use serde_json::json;
///
/// let query: ListQuery = serde_json::from_value(json!({
///     "search": {"term": "sarah", "fields": ["buyer.name", "seller.name"]},
///     "filters": [{"field": "status", "value": "all"},
///                 {"field": "type", "value": "refund"}],
///     "sort": {"field": "createdAt", "direction": "desc", "type": "date"},
///     "page": {"number": 1, "size": 25}
/// })).unwrap();
/// assert_eq!(query.facets().len(), 2);
/// ```
///
/// The query is a pure value: running it has no side effects, owns no state
/// between invocations, and re-filters and re-sorts its input on every call.
/// That is an accepted tradeoff for the small in-memory collections this
/// engine targets; callers with very large data should pre-page upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<SearchSpec>,
    #[serde(rename = "filters", skip_serializing_if = "Vec::is_empty")]
    facets: Vec<Facet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<SortSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<PageSpec>,
}

impl ListQuery {
    /// Creates a new empty query.
    ///
    /// An empty query matches all records, in input order, unpaginated.
    pub fn new() -> Self {
        ListQuery::default()
    }

    // ========================================================================
    // Builders
    // ========================================================================

    /// Sets the free-text search term and the fields it scans.
    pub fn search<I, P>(mut self, term: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<FieldPath>,
    {
        self.search = Some(SearchSpec::new(term, fields));
        self
    }

    /// Adds a facet filter. Facets combine with logical AND.
    pub fn facet(mut self, field: impl Into<FieldPath>, value: impl Into<FacetValue>) -> Self {
        self.facets.push(Facet::new(field, value));
        self
    }

    /// Adds an unconstrained facet (the `"all"` dropdown position).
    pub fn facet_any(mut self, field: impl Into<FieldPath>) -> Self {
        self.facets.push(Facet::any(field));
        self
    }

    /// Sets the sort order.
    pub fn sort(mut self, spec: SortSpec) -> Self {
        self.sort = Some(spec);
        self
    }

    /// Sets an ascending text sort on `field`.
    pub fn sort_asc(self, field: impl Into<FieldPath>) -> Self {
        self.sort(SortSpec::asc(field))
    }

    /// Sets a descending text sort on `field`.
    pub fn sort_desc(self, field: impl Into<FieldPath>) -> Self {
        self.sort(SortSpec::desc(field))
    }

    /// Sets the page request. Fails if `size` is zero.
    pub fn page(mut self, number: usize, size: usize) -> Result<Self> {
        self.page = Some(PageSpec::new(number, size)?);
        Ok(self)
    }

    /// Sets the page request from an existing spec.
    pub fn paged(mut self, page: PageSpec) -> Self {
        self.page = Some(page);
        self
    }

    /// Finalizes the query.
    pub fn build(self) -> Self {
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the search spec, if set.
    pub fn search_spec(&self) -> Option<&SearchSpec> {
        self.search.as_ref()
    }

    /// Returns the facet filters.
    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    /// Returns the sort spec, if set.
    pub fn sort_spec(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    /// Returns the page spec, if set.
    pub fn page_spec(&self) -> Option<PageSpec> {
        self.page
    }

    /// Returns `true` if this query filters nothing (every record matches).
    pub fn is_unfiltered(&self) -> bool {
        self.search.as_ref().is_none_or(|s| s.is_blank())
            && self.facets.iter().all(Facet::is_wildcard)
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests if a single record matches the search and facet clauses.
    pub fn matches<R: Queryable>(&self, record: &R) -> bool {
        let search_ok = self.search.as_ref().is_none_or(|s| s.matches(record));
        search_ok && self.facets.iter().all(|facet| facet.matches(record))
    }

    /// Counts matching records, ignoring pagination.
    pub fn count<R: Queryable>(&self, records: &[R]) -> usize {
        records.iter().filter(|r| self.matches(*r)).count()
    }

    /// Runs the full pipeline, returning references into `records`.
    pub fn run<'a, R: Queryable>(&self, records: &'a [R]) -> QueryResult<&'a R> {
        let mut matched: Vec<&'a R> = records.iter().filter(|r| self.matches(*r)).collect();

        if let Some(sort) = &self.sort {
            sort_records(&mut matched, sort);
        }

        let total_matched = matched.len();
        match self.page {
            Some(page) => {
                let (slice, total_pages) = page.apply(&matched);
                QueryResult {
                    items: slice.to_vec(),
                    total_matched,
                    total_pages,
                }
            }
            None => QueryResult {
                total_pages: if total_matched == 0 { 0 } else { 1 },
                total_matched,
                items: matched,
            },
        }
    }

    /// Runs the pipeline and clones the matching records.
    pub fn run_cloned<R: Queryable + Clone>(&self, records: &[R]) -> QueryResult<R> {
        let result = self.run(records);
        QueryResult {
            items: result.items.into_iter().cloned().collect(),
            total_matched: result.total_matched,
            total_pages: result.total_pages,
        }
    }
}

/// The outcome of running a [`ListQuery`]: one page of records plus the
/// metadata a table UI needs for its controls.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<T> {
    /// The matched, sorted, paginated records.
    pub items: Vec<T>,
    /// Matches before pagination, for "Showing X-Y of Z".
    pub total_matched: usize,
    /// `ceil(total_matched / page_size)`; `0` when nothing matched.
    pub total_pages: usize,
}

impl<T> QueryResult<T> {
    /// Returns `true` if the page carries no records.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
