//! Text rendering for the `load`, `print` and `find` commands

use crate::index::Occurrence;
use crate::query::ResultPage;
use std::io::{self, Write};

/// Writes the occurrence list of a word, or a not-found notice
pub fn write_occurrences<W: Write>(
    out: &mut W,
    term: &str,
    occurrences: Option<&[Occurrence]>,
) -> io::Result<()> {
    match occurrences {
        Some(occurrences) => {
            let rendered: Vec<String> = occurrences.iter().map(|o| o.to_string()).collect();
            writeln!(out, "{:?}", rendered)
        }
        None => writeln!(out, "Search term '{}' not found in index.", term),
    }
}

/// Writes the line announcing a search, or the no-match notice when `found` is false
pub fn write_results_header<W: Write>(out: &mut W, terms: &[String], found: bool) -> io::Result<()> {
    let search_term = terms.join(" ");
    if found {
        writeln!(out, "Search term '{}' appears at:", search_term)
    } else {
        writeln!(out, "No search terms in '{}' found in index.", search_term)
    }
}

/// Writes the rows of one result page as `│ rank │ url`
pub fn write_result_page<W: Write>(out: &mut W, page: &ResultPage<'_>) -> io::Result<()> {
    for (offset, row) in page.rows.iter().enumerate() {
        writeln!(out, "│ {:3} │ {}", page.first_rank + offset, row.url)?;
    }
    Ok(())
}

/// Writes the prompt shown after a full page
pub fn write_page_prompt<W: Write>(out: &mut W, page_number: usize) -> io::Result<()> {
    write!(out, "│     │ Page {}, press enter to continue...", page_number)?;
    out.flush()
}
