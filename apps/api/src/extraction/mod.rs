//! Document Text Extractor: PDF bytes in, plain text out.
//!
//! Parsing is CPU-bound and can panic on hostile input, so callers go through
//! `extract_with_timeout`, which runs the extractor on the blocking pool.

pub mod pdf;

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

pub use pdf::PdfTextExtractor;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("uploaded document is empty")]
    Empty,

    #[error("not a valid PDF: {0}")]
    InvalidPdf(String),

    #[error("PDF contains no extractable text layer")]
    NoTextLayer,

    #[error("text extraction timed out after {0:?}")]
    Timeout(Duration),
}

pub trait TextExtractor: Send + Sync {
    /// Returns the text of every page, concatenated in page order.
    fn extract_text(&self, pdf: &[u8]) -> Result<String, ExtractionError>;
}

/// Runs `extractor` on the blocking pool, bounded by `timeout`.
pub async fn extract_with_timeout(
    extractor: Arc<dyn TextExtractor>,
    pdf: bytes::Bytes,
    timeout: Duration,
) -> Result<String, ExtractionError> {
    let task = tokio::task::spawn_blocking(move || extractor.extract_text(&pdf));

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => {
            tracing::error!("PDF extraction task failed: {join_error}");
            Err(ExtractionError::InvalidPdf(
                "parser aborted while reading the document".to_string(),
            ))
        }
        Err(_) => Err(ExtractionError::Timeout(timeout)),
    }
}
