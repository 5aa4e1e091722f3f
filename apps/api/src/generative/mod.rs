//! Generative Services: image, speech, summary and code explanation.
//!
//! These are opaque remote calls. Handlers depend on the `GenerativeService`
//! trait only; `AiServiceClient` is the production backend and carries the
//! per-call timeout.

pub mod client;
pub mod handlers;
pub mod prompts;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use client::AiServiceClient;

/// Voices offered for text-to-speech.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    #[default]
    Alloy,
    Echo,
    Fable,
}

impl Voice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Voice::Alloy => "alloy",
            Voice::Echo => "echo",
            Voice::Fable => "fable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modality {
    Image,
    Audio { voice: Voice },
    Summary,
    CodeExplanation,
}

impl Modality {
    pub fn provider(&self) -> Provider {
        match self {
            Modality::Image | Modality::Summary => Provider::HuggingFace,
            Modality::Audio { .. } | Modality::CodeExplanation => Provider::OpenAi,
        }
    }
}

/// Which upstream account a modality is billed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    HuggingFace,
}

impl Provider {
    pub fn env_key(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::HuggingFace => "HF_API_KEY",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::OpenAi => write!(f, "OpenAI"),
            Provider::HuggingFace => write!(f, "Hugging Face"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedOutput {
    Bytes { content_type: String, data: Bytes },
    Text(String),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{provider} API key is not configured (set {})", .provider.env_key())]
    MissingCredentials { provider: Provider },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned status {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("upstream call timed out")]
    Timeout,

    #[error("unexpected upstream response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait GenerativeService: Send + Sync {
    async fn invoke(
        &self,
        prompt: &str,
        modality: &Modality,
    ) -> Result<GeneratedOutput, ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modalities_map_to_providers() {
        assert_eq!(Modality::Image.provider(), Provider::HuggingFace);
        assert_eq!(Modality::Summary.provider(), Provider::HuggingFace);
        assert_eq!(
            Modality::Audio { voice: Voice::Echo }.provider(),
            Provider::OpenAi
        );
        assert_eq!(Modality::CodeExplanation.provider(), Provider::OpenAi);
    }

    #[test]
    fn test_voice_serde_is_lowercase() {
        let voice: Voice = serde_json::from_str(r#""fable""#).unwrap();
        assert_eq!(voice, Voice::Fable);
        assert_eq!(serde_json::to_string(&Voice::Alloy).unwrap(), r#""alloy""#);
    }

    #[test]
    fn test_unknown_voice_rejected() {
        assert!(serde_json::from_str::<Voice>(r#""nova""#).is_err());
    }

    #[test]
    fn test_missing_credentials_message_names_env_var() {
        let err = ServiceError::MissingCredentials {
            provider: Provider::HuggingFace,
        };
        assert!(err.to_string().contains("HF_API_KEY"));
    }
}
