//! Tokenizer: turns raw document text into a `TokenSet`.
//!
//! The default `TokenizerConfig` is the plain ATS behaviour: lowercase, then
//! split on whitespace runs. Punctuation is kept, so `results.` and `results`
//! are different tokens. The optional steps below can be switched on per
//! request to get a more forgiving match.

use std::collections::{BTreeSet, HashSet};

use lazy_static::lazy_static;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOP_WORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any",
            "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
            "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during",
            "each", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her",
            "here", "hers", "him", "his", "how", "i", "if", "in", "into", "is", "it", "its",
            "me", "more", "most", "my", "no", "nor", "not", "of", "off", "on", "once", "only",
            "or", "other", "our", "ours", "out", "over", "own", "same", "she", "should", "so",
            "some", "such", "than", "that", "the", "their", "them", "then", "there", "these",
            "they", "this", "those", "through", "to", "too", "under", "until", "up", "very",
            "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why",
            "will", "with", "would", "you", "your", "yours",
        ];
        words.iter().copied().collect()
    };
}

/// Optional preprocessing steps applied after lowercasing and splitting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Trim leading/trailing punctuation from each token (`+` and `#` survive).
    pub strip_punctuation: bool,
    /// Apply NFKC normalization before lowercasing.
    pub fold_unicode: bool,
    /// Drop common English stop words.
    pub remove_stop_words: bool,
    /// Reduce tokens to their English Snowball stem.
    pub stem: bool,
}

impl TokenizerConfig {
    /// Plain whitespace split + lowercase. Same as `Default`.
    pub fn raw() -> Self {
        Self::default()
    }

    /// Every preprocessing step enabled.
    pub fn normalized() -> Self {
        Self {
            strip_punctuation: true,
            fold_unicode: true,
            remove_stop_words: true,
            stem: true,
        }
    }
}

/// The set of unique normalized tokens of one document. Iteration is sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    tokens: BTreeSet<String>,
}

impl TokenSet {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Tokens present in both sets.
    pub fn intersection(&self, other: &TokenSet) -> TokenSet {
        self.tokens.intersection(&other.tokens).cloned().collect()
    }

    /// Tokens in `self` that are absent from `other`.
    pub fn difference(&self, other: &TokenSet) -> TokenSet {
        self.tokens.difference(&other.tokens).cloned().collect()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.tokens.into_iter().collect()
    }
}

impl FromIterator<String> for TokenSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

/// Tokenizes `text` into a `TokenSet` under `config`.
pub fn tokenize(text: &str, config: &TokenizerConfig) -> TokenSet {
    let lowered = if config.fold_unicode {
        text.nfkc().collect::<String>().to_lowercase()
    } else {
        text.to_lowercase()
    };

    lowered
        .split_whitespace()
        .filter_map(|token| normalize_token(token, config))
        .collect()
}

fn normalize_token(token: &str, config: &TokenizerConfig) -> Option<String> {
    let token = if config.strip_punctuation {
        token.trim_matches(is_edge_punctuation)
    } else {
        token
    };

    if token.is_empty() {
        return None;
    }
    if config.remove_stop_words && STOP_WORDS.contains(token) {
        return None;
    }

    if config.stem {
        Some(STEMMER.stem(token).into_owned())
    } else {
        Some(token.to_string())
    }
}

/// `c++` and `c#` are skills, so their trailing symbols are kept.
fn is_edge_punctuation(c: char) -> bool {
    !c.is_alphanumeric() && c != '+' && c != '#'
}
