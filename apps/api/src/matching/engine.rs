//! Matching Engine: keyword-overlap ATS score between a resume and a job description.
//!
//! Algorithm:
//! 1. Tokenize both documents into `TokenSet`s.
//! 2. matched = resume ∩ job
//! 3. score = min(100, |matched| / |job| × 100), or 0 when the job set is empty.
//!
//! Pure and synchronous: safe to call from any number of requests at once.

use serde::{Deserialize, Serialize};

use crate::matching::tokenizer::{tokenize, TokenizerConfig};

pub const MAX_SCORE: f64 = 100.0;

/// Where a document's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentOrigin {
    Resume,
    JobDescription,
}

/// Raw text of one side of a match. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
    origin: DocumentOrigin,
}

impl Document {
    pub fn resume(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: DocumentOrigin::Resume,
        }
    }

    pub fn job_description(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: DocumentOrigin::JobDescription,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> DocumentOrigin {
        self.origin
    }
}

/// Output of one scoring request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// 0.0 – 100.0
    pub score: f64,
    /// Tokens in both documents, sorted.
    pub matched_terms: Vec<String>,
    /// Job tokens the resume lacks, sorted.
    pub missing_terms: Vec<String>,
    pub resume_token_count: usize,
    pub job_token_count: usize,
}

impl MatchResult {
    /// Score with two decimals and a percent sign, e.g. `57.14%`.
    pub fn formatted_score(&self) -> String {
        format!("{:.2}%", self.score)
    }

    pub fn matched_terms_display(&self) -> String {
        self.matched_terms.join(", ")
    }
}

/// Scorer bound to one tokenizer configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchEngine {
    config: TokenizerConfig,
}

impl MatchEngine {
    pub fn new(config: TokenizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    pub fn score(&self, resume_text: &str, job_description_text: &str) -> MatchResult {
        let resume_tokens = tokenize(resume_text, &self.config);
        let job_tokens = tokenize(job_description_text, &self.config);

        let matched = resume_tokens.intersection(&job_tokens);
        let missing = job_tokens.difference(&resume_tokens);

        let score = if job_tokens.is_empty() {
            0.0
        } else {
            (matched.len() as f64 / job_tokens.len() as f64 * MAX_SCORE).min(MAX_SCORE)
        };

        MatchResult {
            score,
            matched_terms: matched.into_vec(),
            missing_terms: missing.into_vec(),
            resume_token_count: resume_tokens.len(),
            job_token_count: job_tokens.len(),
        }
    }

    /// Scores a pair of documents. Argument order does not matter; origins decide the roles.
    /// Two documents of the same origin are scored in the order given.
    pub fn score_documents(&self, a: &Document, b: &Document) -> MatchResult {
        match (a.origin(), b.origin()) {
            (DocumentOrigin::JobDescription, DocumentOrigin::Resume) => {
                self.score(b.text(), a.text())
            }
            _ => self.score(a.text(), b.text()),
        }
    }
}

/// Scores with the default (whitespace + lowercase) tokenizer.
pub fn score(resume_text: &str, job_description_text: &str) -> MatchResult {
    MatchEngine::default().score(resume_text, job_description_text)
}
