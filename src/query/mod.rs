//! Query module for searching a loaded index
//!
//! This module provides:
//! - `QueryEngine`: per-page statistics and deterministic ranking
//! - `paginate`: splitting ranked rows into fixed-size presentation pages

mod engine;

pub use engine::{QueryEngine, ResultRow};

/// One presentation page of ranked results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultPage<'a> {
    /// 1-based page number
    pub number: usize,

    /// 1-based rank of the first row on this page
    pub first_rank: usize,

    /// Rows on this page, in rank order
    pub rows: &'a [ResultRow],

    /// True when this page is full, meaning the caller should pause before the next
    pub is_full: bool,
}

/// Splits ranked rows into pages of `page_length` rows
///
/// A `page_length` of zero is treated as one row per page.
///
/// # Examples
///
/// ```
/// use siteseek::query::{paginate, ResultRow};
///
/// let rows: Vec<ResultRow> = (0..5)
///     .map(|i| ResultRow { url: format!("u{}", i), hits: 1, count: 1, adjacency: 0 })
///     .collect();
/// let pages: Vec<_> = paginate(&rows, 2).collect();
/// assert_eq!(pages.len(), 3);
/// assert_eq!(pages[2].first_rank, 5);
/// assert!(!pages[2].is_full);
/// ```
pub fn paginate(rows: &[ResultRow], page_length: usize) -> impl Iterator<Item = ResultPage<'_>> {
    let page_length = page_length.max(1);
    rows.chunks(page_length)
        .enumerate()
        .map(move |(i, chunk)| ResultPage {
            number: i + 1,
            first_rank: i * page_length + 1,
            rows: chunk,
            is_full: chunk.len() == page_length,
        })
}
