//! Ranked multi-term lookup over a loaded index

use crate::index::{InvertedIndex, Occurrence};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Per-page statistics for one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    /// The page
    pub url: String,

    /// Number of distinct query terms found on the page
    pub hits: usize,

    /// Total occurrences of the query terms on the page
    pub count: usize,

    /// Pairs of matched occurrences at adjacent token positions
    pub adjacency: usize,
}

impl ResultRow {
    /// Ranking order: hits, then count, then adjacency, all descending, then
    /// URL ascending
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .hits
            .cmp(&self.hits)
            .then_with(|| other.count.cmp(&self.count))
            .then_with(|| other.adjacency.cmp(&self.adjacency))
            .then_with(|| self.url.cmp(&other.url))
    }
}

/// Read-only query view of an index
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    index: &'a InvertedIndex,
}

impl<'a> QueryEngine<'a> {
    pub fn new(index: &'a InvertedIndex) -> Self {
        Self { index }
    }

    /// Occurrence list of a single word, as shown by the `print` command
    pub fn lookup(&self, term: &str) -> Option<&'a [Occurrence]> {
        self.index.occurrences(&normalize_term(term))
    }

    /// The normalized query terms that exist in the index, in query order
    pub fn matched_terms<S: AsRef<str>>(&self, terms: &[S]) -> Vec<String> {
        normalize_terms(terms)
            .into_iter()
            .filter(|term| self.index.contains(term))
            .collect()
    }

    /// Ranks every page containing at least one of the terms
    ///
    /// Terms are trimmed, lowercased and deduplicated first. An empty result
    /// means none of the terms is indexed.
    ///
    /// # Examples
    ///
    /// ```
    /// use siteseek::{InvertedIndex, QueryEngine};
    ///
    /// let mut index = InvertedIndex::new();
    /// let words = |s: &str| s.split(' ').map(String::from).collect::<Vec<_>>();
    /// index.index_page("https://example.com/a", &words("good friends good books"));
    /// index.index_page("https://example.com/b", &words("books"));
    ///
    /// let rows = QueryEngine::new(&index).find(&["good", "books"]);
    /// assert_eq!(rows[0].url, "https://example.com/a");
    /// assert_eq!((rows[0].hits, rows[0].count, rows[0].adjacency), (2, 3, 1));
    /// assert_eq!(rows[1].url, "https://example.com/b");
    /// ```
    pub fn find<S: AsRef<str>>(&self, terms: &[S]) -> Vec<ResultRow> {
        let terms = self.matched_terms(terms);
        if terms.is_empty() {
            return Vec::new();
        }

        // Grouped in URL order so equal rows come out sorted by URL
        let mut pages: BTreeMap<&str, Vec<(&str, usize)>> = BTreeMap::new();
        for term in &terms {
            for occurrence in self.index.occurrences(term).unwrap_or_default() {
                pages
                    .entry(occurrence.url.as_str())
                    .or_default()
                    .push((term.as_str(), occurrence.position));
            }
        }

        let mut rows: Vec<ResultRow> = pages
            .into_iter()
            .map(|(url, matches)| page_statistics(url, &matches))
            .collect();

        rows.sort_by(ResultRow::rank_cmp);
        rows
    }
}

/// Computes hits, count and adjacency for one page's matched occurrences
fn page_statistics(url: &str, matches: &[(&str, usize)]) -> ResultRow {
    let mut distinct: Vec<&str> = matches.iter().map(|(term, _)| *term).collect();
    distinct.sort_unstable();
    distinct.dedup();

    ResultRow {
        url: url.to_string(),
        hits: distinct.len(),
        count: matches.len(),
        adjacency: count_adjacent_pairs(matches),
    }
}

/// Counts unordered pairs of occurrences whose positions differ by exactly one
///
/// Every pair is compared, so two occurrences of the same term side by side
/// count as well.
fn count_adjacent_pairs(matches: &[(&str, usize)]) -> usize {
    let mut pairs = 0;
    for (i, (_, a)) in matches.iter().enumerate() {
        for (_, b) in &matches[i + 1..] {
            if a.abs_diff(*b) == 1 {
                pairs += 1;
            }
        }
    }
    pairs
}

fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Lowercases terms and drops blanks and repeats, keeping first appearance
fn normalize_terms<S: AsRef<str>>(terms: &[S]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(terms.len());
    for term in terms {
        let term = normalize_term(term.as_ref());
        if !term.is_empty() && !normalized.contains(&term) {
            normalized.push(term);
        }
    }
    normalized
}
