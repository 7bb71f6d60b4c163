//! Word tokenizer with stop word removal.
//!
//! Text is lowercased and split into maximal runs of word characters
//! (letters, digits and underscore, Unicode-aware). Tokens found in the
//! stop-word set are dropped; everything else is kept in order, duplicates
//! included, because positions and frequencies feed the index.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid regex"));

/// NLTK's English stop-word list
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by", "for",
    "with", "about", "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
    "again", "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
    "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
    "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will", "just", "don",
    "should", "now",
];

/// Splits page text into normalized index tokens
#[derive(Debug, Clone)]
pub struct Tokenizer {
    stop_words: HashSet<String>,
}

impl Tokenizer {
    /// Creates a tokenizer that drops the given stop words
    ///
    /// Stop words are lowercased so they match the lowercased token stream.
    pub fn new<I, S>(stop_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stop_words: stop_words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    /// Creates a tokenizer from an optional configured list, falling back to
    /// [`ENGLISH_STOP_WORDS`]
    pub fn from_config(stop_words: Option<&[String]>) -> Self {
        match stop_words {
            Some(words) => Self::new(words),
            None => Self::default(),
        }
    }

    /// Returns true if `word` is dropped by this tokenizer
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Number of stop words in the set
    pub fn stop_word_count(&self) -> usize {
        self.stop_words.len()
    }

    /// Tokenizes text into lowercase words in reading order
    ///
    /// # Examples
    ///
    /// ```
    /// use siteseek::Tokenizer;
    ///
    /// let tokens = Tokenizer::default().tokenize("The world as we have created it");
    /// assert_eq!(tokens, vec!["world", "created"]);
    /// ```
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        WORD.find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|token| !self.is_stop_word(token))
            .map(str::to_string)
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(ENGLISH_STOP_WORDS)
    }
}
