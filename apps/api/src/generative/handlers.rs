//! Axum route handlers for the generative endpoints.

use anyhow::Context;
use axum::{
    extract::State,
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
        HeaderValue,
    },
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppJson};
use crate::generative::{GeneratedOutput, Modality, ServiceError, Voice};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ImageRequest {
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct AudioRequest {
    pub text: String,
    #[serde(default)]
    pub voice: Voice,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub struct ExplainCodeRequest {
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct ExplainCodeResponse {
    pub explanation: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/image
pub async fn handle_generate_image(
    State(state): State<AppState>,
    AppJson(request): AppJson<ImageRequest>,
) -> Result<Response, AppError> {
    require_non_blank("prompt", &request.prompt)?;

    let output = state
        .generative
        .invoke(&request.prompt, &Modality::Image)
        .await?;
    let (content_type, data) = into_bytes(output)?;

    Ok(([(CONTENT_TYPE, header_value(&content_type)?)], data).into_response())
}

/// POST /api/v1/audio
///
/// Returns the MP3 as a download named `output.mp3`.
pub async fn handle_text_to_audio(
    State(state): State<AppState>,
    AppJson(request): AppJson<AudioRequest>,
) -> Result<Response, AppError> {
    require_non_blank("text", &request.text)?;

    let modality = Modality::Audio {
        voice: request.voice,
    };
    let output = state.generative.invoke(&request.text, &modality).await?;
    let (content_type, data) = into_bytes(output)?;

    Ok((
        [
            (CONTENT_TYPE, header_value(&content_type)?),
            (
                CONTENT_DISPOSITION,
                HeaderValue::from_static("attachment; filename=\"output.mp3\""),
            ),
        ],
        data,
    )
        .into_response())
}

/// POST /api/v1/summarize
pub async fn handle_summarize(
    State(state): State<AppState>,
    AppJson(request): AppJson<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, AppError> {
    require_non_blank("text", &request.text)?;

    let output = state
        .generative
        .invoke(&request.text, &Modality::Summary)
        .await?;

    Ok(Json(SummarizeResponse {
        summary: into_text(output)?,
    }))
}

/// POST /api/v1/code/explain
pub async fn handle_explain_code(
    State(state): State<AppState>,
    AppJson(request): AppJson<ExplainCodeRequest>,
) -> Result<Json<ExplainCodeResponse>, AppError> {
    require_non_blank("code", &request.code)?;

    let output = state
        .generative
        .invoke(&request.code, &Modality::CodeExplanation)
        .await?;

    Ok(Json(ExplainCodeResponse {
        explanation: into_text(output)?,
    }))
}

fn require_non_blank(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Upstream content types are echoed back, so they must be valid header values.
fn header_value(content_type: &str) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(content_type)
        .with_context(|| format!("upstream sent an unusable content type {content_type:?}"))
        .map_err(AppError::Internal)
}

fn into_bytes(output: GeneratedOutput) -> Result<(String, Bytes), ServiceError> {
    match output {
        GeneratedOutput::Bytes { content_type, data } => Ok((content_type, data)),
        GeneratedOutput::Text(_) => Err(ServiceError::InvalidResponse(
            "expected binary output, got text".to_string(),
        )),
    }
}

fn into_text(output: GeneratedOutput) -> Result<String, ServiceError> {
    match output {
        GeneratedOutput::Text(text) => Ok(text),
        GeneratedOutput::Bytes { .. } => Err(ServiceError::InvalidResponse(
            "expected text output, got bytes".to_string(),
        )),
    }
}
