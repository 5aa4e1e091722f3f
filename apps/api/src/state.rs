use std::sync::Arc;

use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::generative::GenerativeService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Resume PDF text extractor. Default: PdfTextExtractor.
    pub extractor: Arc<dyn TextExtractor>,
    /// Image, speech, summary and code explanation backend. Default: AiServiceClient.
    pub generative: Arc<dyn GenerativeService>,
}
