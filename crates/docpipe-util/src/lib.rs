//! Shared utilities for docpipe.

pub mod page_range;

pub use page_range::{PageRange, PageRangeError, parse_page_range};
