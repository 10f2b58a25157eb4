//! Page range expressions.
//!
//! A page range expression is a comma-separated list of tokens, each either
//! a single page number or an inclusive `start-end` pair:
//!
//! ```text
//! expr  := token (',' token)*
//! token := INTEGER | INTEGER '-' INTEGER
//! ```
//!
//! `"1-3,5,8-10"` selects pages 1, 2, 3, 5, 8, 9 and 10. The result is
//! always sorted ascending with duplicates removed. A pair whose start is
//! greater than its end selects nothing, so `"3-1"` is a valid, empty range.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors from parsing a page range expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageRangeError {
    /// A token between commas is empty.
    #[error("Empty page range token at position {position}")]
    EmptyToken {
        /// Zero-based index of the token
        position: usize,
    },

    /// A single-page token is not a non-negative integer.
    #[error("Invalid page number '{token}'")]
    InvalidNumber {
        /// The offending token
        token: String,
    },

    /// A token with a hyphen is not `<start>-<end>`.
    #[error("Invalid page range '{token}': expected '<start>-<end>'")]
    InvalidRange {
        /// The offending token
        token: String,
    },
}

/// Parse a page range expression into sorted, unique page numbers.
///
/// Every page of every span is materialized, so the output size follows
/// the span widths: `"0-4294967295"` allocates one entry per `u32`. Callers
/// taking expressions from untrusted input should bound the span first or
/// clamp against a known page count with [`PageRange::clamp_to`].
///
/// ```
/// use docpipe_util::parse_page_range;
///
/// assert_eq!(parse_page_range("1-3,5,8-10").unwrap(), vec![1, 2, 3, 5, 8, 9, 10]);
/// assert_eq!(parse_page_range("5,1,3,1").unwrap(), vec![1, 3, 5]);
/// assert!(parse_page_range("3-1").unwrap().is_empty());
/// assert!(parse_page_range("a-3").is_err());
/// ```
pub fn parse_page_range(expression: &str) -> Result<Vec<u32>, PageRangeError> {
    let mut pages = BTreeSet::new();

    for (position, raw) in expression.split(',').enumerate() {
        let token = raw.trim();
        if token.is_empty() {
            return Err(PageRangeError::EmptyToken { position });
        }

        if token.contains('-') {
            let (start, end) = parse_pair(token)?;
            // Inverted bounds expand to nothing.
            pages.extend(start..=end);
        } else {
            let page = parse_number(token).ok_or_else(|| PageRangeError::InvalidNumber {
                token: token.to_string(),
            })?;
            pages.insert(page);
        }
    }

    Ok(pages.into_iter().collect())
}

fn parse_pair(token: &str) -> Result<(u32, u32), PageRangeError> {
    let invalid = || PageRangeError::InvalidRange {
        token: token.to_string(),
    };
    let (start, end) = token.split_once('-').ok_or_else(invalid)?;
    let start = parse_number(start.trim()).ok_or_else(invalid)?;
    let end = parse_number(end.trim()).ok_or_else(invalid)?;
    Ok((start, end))
}

fn parse_number(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// A parsed page selection: sorted, unique page numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PageRange {
    pages: Vec<u32>,
}

impl PageRange {
    /// Parse an expression. Same rules as [`parse_page_range`].
    pub fn parse(expression: &str) -> Result<Self, PageRangeError> {
        parse_page_range(expression).map(|pages| Self { pages })
    }

    /// Build a selection from arbitrary page numbers.
    pub fn from_pages(pages: impl IntoIterator<Item = u32>) -> Self {
        let pages: BTreeSet<u32> = pages.into_iter().collect();
        Self {
            pages: pages.into_iter().collect(),
        }
    }

    /// Every page of a document with `page_count` pages (zero-based).
    pub fn all(page_count: u32) -> Self {
        Self {
            pages: (0..page_count).collect(),
        }
    }

    /// Drop pages that do not exist in a document of `page_count` pages.
    pub fn clamp_to(mut self, page_count: u32) -> Self {
        self.pages.retain(|&page| page < page_count);
        self
    }

    /// Check if a page is selected.
    pub fn contains(&self, page: u32) -> bool {
        self.pages.binary_search(&page).is_ok()
    }

    /// Iterate selected pages in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.pages.iter().copied()
    }

    /// Selected pages as a sorted slice.
    pub fn as_slice(&self) -> &[u32] {
        &self.pages
    }

    /// Consume into the sorted page list.
    pub fn into_vec(self) -> Vec<u32> {
        self.pages
    }

    /// Number of selected pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Check if no page is selected.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Compact form with consecutive runs collapsed, e.g. `1-3,5,8-10`.
///
/// An empty selection displays as the empty string, which does not parse.
impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        let mut pages = self.pages.iter().copied().peekable();

        while let Some(start) = pages.next() {
            let mut end = start;
            while end
                .checked_add(1)
                .is_some_and(|next| pages.peek() == Some(&next))
            {
                end += 1;
                pages.next();
            }

            if !first {
                f.write_str(",")?;
            }
            first = false;

            if start == end {
                write!(f, "{start}")?;
            } else {
                write!(f, "{start}-{end}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for PageRange {
    type Err = PageRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for PageRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Deserializes from an expression string, or from a bare page number as
/// YAML produces for `page_range: 5`.
impl<'de> Deserialize<'de> for PageRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PageRangeVisitor;

        impl serde::de::Visitor<'_> for PageRangeVisitor {
            type Value = PageRange;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a page range expression or page number")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<PageRange, E> {
                PageRange::parse(v).map_err(E::custom)
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<PageRange, E> {
                let page = u32::try_from(v).map_err(E::custom)?;
                Ok(PageRange::from_pages([page]))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<PageRange, E> {
                let page = u32::try_from(v).map_err(E::custom)?;
                Ok(PageRange::from_pages([page]))
            }
        }

        deserializer.deserialize_any(PageRangeVisitor)
    }
}

impl<'a> IntoIterator for &'a PageRange {
    type Item = u32;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, u32>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_ranges_and_singles() {
        assert_eq!(
            parse_page_range("1-3,5,8-10").unwrap(),
            vec![1, 2, 3, 5, 8, 9, 10]
        );
    }

    #[test]
    fn test_dedup_and_sort() {
        assert_eq!(parse_page_range("5,1,3,1").unwrap(), vec![1, 3, 5]);
    }

    #[test]
    fn test_overlapping_ranges_merge() {
        assert_eq!(parse_page_range("4-6,1-5").unwrap(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        assert_eq!(parse_page_range("3-1").unwrap(), Vec::<u32>::new());
        assert_eq!(parse_page_range("3-1,7").unwrap(), vec![7]);
    }

    #[test]
    fn test_single_page_range() {
        assert_eq!(parse_page_range("4-4").unwrap(), vec![4]);
    }

    #[test]
    fn test_zero_is_valid() {
        assert_eq!(parse_page_range("0,0-2").unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_whitespace_around_tokens() {
        assert_eq!(parse_page_range(" 1 - 2 , 4 ").unwrap(), vec![1, 2, 4]);
    }

    #[test]
    fn test_non_numeric_start() {
        let err = parse_page_range("a-3").unwrap_err();
        assert_eq!(
            err,
            PageRangeError::InvalidRange {
                token: "a-3".to_string()
            }
        );
    }

    #[test]
    fn test_non_numeric_single() {
        let err = parse_page_range("1,two").unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"Invalid page number 'two'");
    }

    #[test]
    fn test_too_many_hyphens() {
        let err = parse_page_range("1-2-3").unwrap_err();
        insta::assert_snapshot!(
            err.to_string(),
            @"Invalid page range '1-2-3': expected '<start>-<end>'"
        );
    }

    #[test]
    fn test_negative_numbers_rejected() {
        assert!(matches!(
            parse_page_range("-3"),
            Err(PageRangeError::InvalidRange { .. })
        ));
        assert!(matches!(
            parse_page_range("2--3"),
            Err(PageRangeError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_empty_tokens() {
        assert_eq!(
            parse_page_range(""),
            Err(PageRangeError::EmptyToken { position: 0 })
        );
        assert_eq!(
            parse_page_range("1,,2"),
            Err(PageRangeError::EmptyToken { position: 1 })
        );
        assert_eq!(
            parse_page_range("1,"),
            Err(PageRangeError::EmptyToken { position: 1 })
        );
    }

    #[test]
    fn test_overflow_rejected() {
        assert!(parse_page_range("99999999999").is_err());
        assert!(parse_page_range("+3").is_err());
    }

    #[test]
    fn test_display_collapses_runs() {
        let range = PageRange::parse("10,8,9,1-3,5").unwrap();
        assert_eq!(range.to_string(), "1-3,5,8-10");

        let single = PageRange::from_pages([7]);
        assert_eq!(single.to_string(), "7");

        assert_eq!(PageRange::default().to_string(), "");
    }

    #[test]
    fn test_contains_and_len() {
        let range: PageRange = "2-4,9".parse().unwrap();
        assert!(range.contains(3));
        assert!(!range.contains(5));
        assert_eq!(range.len(), 4);
        assert_eq!(range.iter().collect::<Vec<_>>(), vec![2, 3, 4, 9]);
    }

    #[test]
    fn test_all_and_clamp() {
        assert_eq!(PageRange::all(3).as_slice(), &[0, 1, 2]);

        let clamped = PageRange::parse("0-4,10").unwrap().clamp_to(3);
        assert_eq!(clamped.into_vec(), vec![0, 1, 2]);
    }

    #[test]
    fn test_wide_span_materializes_every_page() {
        let range = PageRange::parse("0-99999").unwrap();
        assert_eq!(range.len(), 100_000);
        assert_eq!(range.clamp_to(2).into_vec(), vec![0, 1]);
    }

    #[test]
    fn test_serde_as_expression() {
        let range = PageRange::parse("3,1-2").unwrap();
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(json, "\"1-3\"");

        let back: PageRange = serde_json::from_str("\"5,1\"").unwrap();
        assert_eq!(back.as_slice(), &[1, 5]);

        let bad: Result<PageRange, _> = serde_json::from_str("\"x\"");
        assert!(bad.is_err());

        let number: PageRange = serde_json::from_str("4").unwrap();
        assert_eq!(number.as_slice(), &[4]);

        let negative: Result<PageRange, _> = serde_json::from_str("-4");
        assert!(negative.is_err());
    }
}
