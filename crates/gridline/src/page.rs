//! Offset pagination over an ordered sequence.

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};

/// A 1-based page request.
///
/// Page size must be positive; a zero size is rejected at construction (and
/// deserialization) as a caller bug. Out-of-range page *numbers* are not
/// errors: page 0 or a page past the end yields an empty slice, and
/// `total_pages` is `0` for an empty sequence, so the UI never shows
/// "page 1 of 0 items".
///
/// # Example
///
/// ```
/// use gridline::PageSpec;
///
/// let page = PageSpec::new(2, 2)?;
/// let (items, total_pages) = page.apply(&[1, 2, 3, 4, 5]);
/// assert_eq!(items, &[3, 4]);
/// assert_eq!(total_pages, 3);
/// # Ok::<(), gridline::QueryError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPageSpec")]
pub struct PageSpec {
    number: usize,
    size: usize,
}

impl PageSpec {
    /// Creates a page spec. Fails if `size` is zero.
    pub fn new(number: usize, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(QueryError::ZeroPageSize);
        }
        Ok(PageSpec { number, size })
    }

    /// The 1-based page number.
    pub fn number(&self) -> usize {
        self.number
    }

    /// The page size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The number of pages needed for a sequence of `len` items.
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.size)
    }

    /// Slices one page out of `items`, clipped to the sequence bounds.
    ///
    /// Returns the page and the total page count.
    pub fn apply<'s, T>(&self, items: &'s [T]) -> (&'s [T], usize) {
        let total_pages = self.total_pages(items.len());
        if self.number == 0 {
            return (&items[..0], total_pages);
        }
        let start = (self.number - 1).saturating_mul(self.size).min(items.len());
        let end = start.saturating_add(self.size).min(items.len());
        (&items[start..end], total_pages)
    }
}

#[derive(Deserialize)]
struct RawPageSpec {
    number: usize,
    size: usize,
}

impl TryFrom<RawPageSpec> for PageSpec {
    type Error = QueryError;

    fn try_from(raw: RawPageSpec) -> Result<Self> {
        PageSpec::new(raw.number, raw.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_page() {
        let page = PageSpec::new(2, 2).unwrap();
        let (items, total_pages) = page.apply(&[1, 2, 3, 4, 5]);
        assert_eq!(items, &[3, 4]);
        assert_eq!(total_pages, 3);
    }

    #[test]
    fn last_page_may_be_short() {
        let page = PageSpec::new(3, 2).unwrap();
        let (items, total_pages) = page.apply(&[1, 2, 3, 4, 5]);
        assert_eq!(items, &[5]);
        assert_eq!(total_pages, 3);
    }

    #[test]
    fn page_past_end_is_empty() {
        let page = PageSpec::new(4, 2).unwrap();
        let (items, total_pages) = page.apply(&[1, 2, 3, 4, 5]);
        assert!(items.is_empty());
        assert_eq!(total_pages, 3);
    }

    #[test]
    fn page_zero_is_empty_not_an_error() {
        let page = PageSpec::new(0, 2).unwrap();
        let (items, total_pages) = page.apply(&[1, 2, 3]);
        assert!(items.is_empty());
        assert_eq!(total_pages, 2);
    }

    #[test]
    fn empty_sequence_has_zero_pages() {
        let page = PageSpec::new(1, 10).unwrap();
        let (items, total_pages) = page.apply(&[] as &[i32]);
        assert!(items.is_empty());
        assert_eq!(total_pages, 0);
    }

    #[test]
    fn zero_size_is_rejected() {
        assert_eq!(PageSpec::new(1, 0), Err(QueryError::ZeroPageSize));

        let parsed: std::result::Result<PageSpec, _> =
            serde_json::from_str(r#"{"number": 1, "size": 0}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn exact_fit() {
        let page = PageSpec::new(2, 3).unwrap();
        let (items, total_pages) = page.apply(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(items, &[4, 5, 6]);
        assert_eq!(total_pages, 2);
    }

    #[test]
    fn deserializes_from_wire_shape() {
        let page: PageSpec = serde_json::from_str(r#"{"number": 2, "size": 25}"#).unwrap();
        assert_eq!(page.number(), 2);
        assert_eq!(page.size(), 25);
    }
}
