/// Page outcome definitions for tracking crawl progress
///
/// Every URL taken off the frontier ends in exactly one of these outcomes.
use std::fmt;

/// Represents how the crawl finished with a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageOutcome {
    /// Page was fetched, tokenized and added to the index
    Indexed,

    /// Page answered with a status other than 200
    DeadLink,

    /// Page could not be reached (connection refused, DNS failure, timeout)
    Unreachable,
}

impl PageOutcome {
    /// Returns true if the page contributed to the index
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Indexed)
    }

    /// Returns true if the page was skipped because of a fetch failure
    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    /// Returns the snake_case label of this outcome
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Indexed => "indexed",
            Self::DeadLink => "dead_link",
            Self::Unreachable => "unreachable",
        }
    }

    /// Returns every outcome in reporting order
    pub fn all() -> &'static [PageOutcome] {
        &[Self::Indexed, Self::DeadLink, Self::Unreachable]
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
