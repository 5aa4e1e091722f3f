// ATS matching: tokenization, scoring and the HTTP handlers that expose them.
// Scoring is pure; the only I/O on this path is resume PDF extraction.

pub mod engine;
pub mod handlers;
pub mod tokenizer;

pub use engine::{score, Document, DocumentOrigin, MatchEngine, MatchResult};
pub use tokenizer::{tokenize, TokenSet, TokenizerConfig};
