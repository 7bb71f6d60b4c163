//! Positional inverted index
//!
//! This module holds the in-memory index built during a crawl:
//! - `Tokenizer`: page text to ordered index tokens
//! - `InvertedIndex`: token to ordered occurrence list
//! - `IndexStore`: JSON persistence of the index

mod store;
mod tokenizer;

pub use store::{IndexStore, StoreError};
pub use tokenizer::{Tokenizer, ENGLISH_STOP_WORDS};

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Where a token appeared: a page and the token's position in that page's
/// filtered token sequence
///
/// Serialized as the string `"<url>|<position>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Occurrence {
    pub url: String,
    pub position: usize,
}

impl Occurrence {
    pub fn new(url: impl Into<String>, position: usize) -> Self {
        Self {
            url: url.into(),
            position,
        }
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.url, self.position)
    }
}

impl FromStr for Occurrence {
    type Err = String;

    /// Splits on the last `|`, so URLs that contain the separator survive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (url, position) = s
            .rsplit_once('|')
            .ok_or_else(|| format!("occurrence '{}' has no '|' separator", s))?;

        if url.is_empty() {
            return Err(format!("occurrence '{}' has an empty URL", s));
        }

        let position = position
            .parse::<usize>()
            .map_err(|e| format!("occurrence '{}' has an invalid position: {}", s, e))?;

        Ok(Self::new(url, position))
    }
}

impl Serialize for Occurrence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Occurrence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OccurrenceVisitor;

        impl Visitor<'_> for OccurrenceVisitor {
            type Value = Occurrence;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string of the form \"<url>|<position>\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Occurrence, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(OccurrenceVisitor)
    }
}

/// Token to occurrence-list mapping
///
/// Occurrence lists keep append order. Tokens are kept sorted so the persisted
/// file is stable for equal contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InvertedIndex {
    entries: BTreeMap<String, Vec<Occurrence>>,
}

/// Reads a JSON object of occurrence arrays, rejecting repeated tokens
impl<'de> Deserialize<'de> for InvertedIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IndexVisitor;

        impl<'de> Visitor<'de> for IndexVisitor {
            type Value = InvertedIndex;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping tokens to occurrence arrays")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<InvertedIndex, A::Error> {
                let mut entries = BTreeMap::new();
                while let Some((token, occurrences)) =
                    map.next_entry::<String, Vec<Occurrence>>()?
                {
                    if entries.contains_key(&token) {
                        return Err(de::Error::custom(format!(
                            "token '{}' appears more than once",
                            token
                        )));
                    }
                    entries.insert(token, occurrences);
                }
                Ok(InvertedIndex { entries })
            }
        }

        deserializer.deserialize_map(IndexVisitor)
    }
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one occurrence per token of a page
    ///
    /// The token at position `n` of `tokens` is recorded as `(url, n)`. No
    /// deduplication happens here; the crawl guarantees each URL is indexed
    /// at most once.
    ///
    /// # Examples
    ///
    /// ```
    /// use siteseek::{InvertedIndex, Occurrence};
    ///
    /// let mut index = InvertedIndex::new();
    /// let tokens: Vec<String> = ["quick", "brown", "fox"].iter().map(|s| s.to_string()).collect();
    /// index.index_page("https://example.com/", &tokens);
    ///
    /// assert_eq!(
    ///     index.occurrences("brown"),
    ///     Some(&[Occurrence::new("https://example.com/", 1)][..])
    /// );
    /// ```
    pub fn index_page<S: AsRef<str>>(&mut self, url: &str, tokens: &[S]) {
        for (position, token) in tokens.iter().enumerate() {
            self.entries
                .entry(token.as_ref().to_string())
                .or_default()
                .push(Occurrence::new(url, position));
        }
    }

    /// Returns the occurrence list of a token
    pub fn occurrences(&self, token: &str) -> Option<&[Occurrence]> {
        self.entries.get(token).map(Vec::as_slice)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of occurrences across all tokens
    pub fn occurrence_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Iterates tokens in sorted order with their occurrence lists
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Occurrence])> {
        self.entries
            .iter()
            .map(|(token, occurrences)| (token.as_str(), occurrences.as_slice()))
    }
}
