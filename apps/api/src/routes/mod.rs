pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::generative::handlers as generative;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // ATS Score Checker
        .route("/api/v1/ats/score", post(matching::handle_score))
        .route(
            "/api/v1/ats/score/upload",
            post(matching::handle_score_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Generative tools
        .route("/api/v1/image", post(generative::handle_generate_image))
        .route("/api/v1/audio", post(generative::handle_text_to_audio))
        .route("/api/v1/summarize", post(generative::handle_summarize))
        .route("/api/v1/code/explain", post(generative::handle_explain_code))
        .with_state(state)
}
