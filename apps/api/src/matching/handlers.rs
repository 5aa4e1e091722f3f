//! Axum route handlers for the ATS Score API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::{AppError, AppJson};
use crate::extraction::extract_with_timeout;
use crate::matching::engine::{MatchEngine, MatchResult};
use crate::matching::tokenizer::TokenizerConfig;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub resume_text: String,
    pub job_description: String,
    #[serde(default)]
    pub tokenizer: TokenizerConfig,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub request_id: Uuid,
    #[serde(flatten)]
    pub result: MatchResult,
    pub formatted_score: String,
    pub scored_at: DateTime<Utc>,
}

impl ScoreResponse {
    fn new(result: MatchResult) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            formatted_score: result.formatted_score(),
            result,
            scored_at: Utc::now(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ats/score
///
/// Scores already-extracted resume text against a job description.
pub async fn handle_score(
    AppJson(request): AppJson<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    require_job_description(&request.job_description)?;

    let engine = MatchEngine::new(request.tokenizer);
    let result = engine.score(&request.resume_text, &request.job_description);
    log_result(&result);

    Ok(Json(ScoreResponse::new(result)))
}

/// POST /api/v1/ats/score/upload
///
/// Multipart form: `resume` (PDF), `job_description` (text), optional
/// `tokenizer` (`raw` | `normalized`).
pub async fn handle_score_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScoreResponse>, AppError> {
    let mut resume_pdf = None;
    let mut job_description = None;
    let mut tokenizer = TokenizerConfig::raw();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("failed to read resume: {e}")))?;
                resume_pdf = Some(data);
            }
            "job_description" => {
                job_description = Some(read_text_field(field).await?);
            }
            "tokenizer" => {
                tokenizer = parse_tokenizer_mode(&read_text_field(field).await?)?;
            }
            _ => {}
        }
    }

    let resume_pdf =
        resume_pdf.ok_or_else(|| AppError::Validation("resume PDF is required".to_string()))?;
    let job_description = job_description.unwrap_or_default();
    require_job_description(&job_description)?;

    let resume_text = extract_with_timeout(
        state.extractor.clone(),
        resume_pdf,
        state.config.extraction_timeout,
    )
    .await?;

    let result = MatchEngine::new(tokenizer).score(&resume_text, &job_description);
    log_result(&result);

    Ok(Json(ScoreResponse::new(result)))
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("invalid form field: {e}")))
}

fn require_job_description(text: &str) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn parse_tokenizer_mode(mode: &str) -> Result<TokenizerConfig, AppError> {
    match mode.trim() {
        "" | "raw" => Ok(TokenizerConfig::raw()),
        "normalized" => Ok(TokenizerConfig::normalized()),
        other => Err(AppError::Validation(format!(
            "unknown tokenizer mode '{other}' (expected 'raw' or 'normalized')"
        ))),
    }
}

fn log_result(result: &MatchResult) {
    info!(
        "ATS score {:.2} ({} of {} job tokens matched, {} resume tokens)",
        result.score,
        result.matched_terms.len(),
        result.job_token_count,
        result.resume_token_count
    );
}
