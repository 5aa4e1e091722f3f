//! `AiServiceClient`: the reqwest backend behind `GenerativeService`.
//!
//! One call per request, no retries. Each request is bounded by the
//! configured service timeout.

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::Config;
use crate::generative::prompts::{
    code_debug_prompt, CHAT_MODEL, IMAGE_MODEL, SPEECH_MODEL, SUMMARY_MAX_LENGTH,
    SUMMARY_MIN_LENGTH, SUMMARY_MODEL,
};
use crate::generative::{
    GeneratedOutput, GenerativeService, Modality, Provider, ServiceError, Voice,
};

const DEFAULT_IMAGE_CONTENT_TYPE: &str = "image/jpeg";
const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SummaryItem {
    summary_text: String,
}

#[derive(Clone)]
pub struct AiServiceClient {
    client: Client,
    openai_api_key: Option<String>,
    hf_api_key: Option<String>,
    openai_base_url: String,
    hf_base_url: String,
}

impl AiServiceClient {
    pub fn new(config: &Config) -> Result<Self, ServiceError> {
        Ok(Self {
            client: Client::builder().timeout(config.service_timeout).build()?,
            openai_api_key: config.openai_api_key.clone(),
            hf_api_key: config.hf_api_key.clone(),
            openai_base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            hf_base_url: config.hf_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn api_key(&self, provider: Provider) -> Result<&str, ServiceError> {
        let key = match provider {
            Provider::OpenAi => self.openai_api_key.as_deref(),
            Provider::HuggingFace => self.hf_api_key.as_deref(),
        };
        key.ok_or(ServiceError::MissingCredentials { provider })
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        provider: Provider,
        url: &str,
        body: &B,
    ) -> Result<Response, ServiceError> {
        let key = self.api_key(provider)?;

        let response = self
            .client
            .post(url)
            .bearer_auth(key)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!("{provider} returned {status} for {url}");
            return Err(ServiceError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    async fn generate_image(&self, prompt: &str) -> Result<GeneratedOutput, ServiceError> {
        let url = format!("{}/{IMAGE_MODEL}", self.hf_base_url);
        let response = self
            .post_json(Provider::HuggingFace, &url, &json!({ "inputs": prompt }))
            .await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|ct| ct.starts_with("image/"))
            .unwrap_or(DEFAULT_IMAGE_CONTENT_TYPE)
            .to_string();
        let data = response.bytes().await.map_err(map_transport_error)?;
        if data.is_empty() {
            return Err(ServiceError::InvalidResponse("empty image body".to_string()));
        }

        debug!("Image generated: {} bytes ({content_type})", data.len());
        Ok(GeneratedOutput::Bytes { content_type, data })
    }

    async fn synthesize_speech(
        &self,
        text: &str,
        voice: Voice,
    ) -> Result<GeneratedOutput, ServiceError> {
        let url = format!("{}/audio/speech", self.openai_base_url);
        let response = self
            .post_json(Provider::OpenAi, &url, &speech_payload(text, voice))
            .await?;

        let data = response.bytes().await.map_err(map_transport_error)?;
        debug!("Speech synthesized: {} bytes", data.len());
        Ok(GeneratedOutput::Bytes {
            content_type: AUDIO_CONTENT_TYPE.to_string(),
            data,
        })
    }

    async fn summarize(&self, text: &str) -> Result<GeneratedOutput, ServiceError> {
        let url = format!("{}/{SUMMARY_MODEL}", self.hf_base_url);
        let response = self
            .post_json(Provider::HuggingFace, &url, &summary_payload(text))
            .await?;

        let body = response.text().await.map_err(map_transport_error)?;
        parse_summary(&body).map(GeneratedOutput::Text)
    }

    async fn explain_code(&self, code: &str) -> Result<GeneratedOutput, ServiceError> {
        let url = format!("{}/chat/completions", self.openai_base_url);
        let prompt = code_debug_prompt(code);
        let response = self
            .post_json(Provider::OpenAi, &url, &chat_payload(&prompt))
            .await?;

        let body = response.text().await.map_err(map_transport_error)?;
        parse_chat(&body).map(GeneratedOutput::Text)
    }
}

#[async_trait]
impl GenerativeService for AiServiceClient {
    async fn invoke(
        &self,
        prompt: &str,
        modality: &Modality,
    ) -> Result<GeneratedOutput, ServiceError> {
        match modality {
            Modality::Image => self.generate_image(prompt).await,
            Modality::Audio { voice } => self.synthesize_speech(prompt, *voice).await,
            Modality::Summary => self.summarize(prompt).await,
            Modality::CodeExplanation => self.explain_code(prompt).await,
        }
    }
}

fn map_transport_error(e: reqwest::Error) -> ServiceError {
    if e.is_timeout() {
        ServiceError::Timeout
    } else {
        ServiceError::Http(e)
    }
}

fn speech_payload(text: &str, voice: Voice) -> Value {
    json!({
        "model": SPEECH_MODEL,
        "voice": voice.as_str(),
        "input": text,
    })
}

fn summary_payload(text: &str) -> Value {
    json!({
        "inputs": text,
        "parameters": {
            "max_length": SUMMARY_MAX_LENGTH,
            "min_length": SUMMARY_MIN_LENGTH,
            "do_sample": false,
        }
    })
}

fn chat_payload(prompt: &str) -> ChatRequest<'_> {
    ChatRequest {
        model: CHAT_MODEL,
        messages: vec![ChatMessage {
            role: "user",
            content: prompt,
        }],
    }
}

/// Inference API returns `[{"summary_text": "..."}]`.
fn parse_summary(body: &str) -> Result<String, ServiceError> {
    let items: Vec<SummaryItem> = serde_json::from_str(body)
        .map_err(|e| ServiceError::InvalidResponse(format!("summary payload: {e}")))?;
    items
        .into_iter()
        .next()
        .map(|item| item.summary_text)
        .ok_or_else(|| ServiceError::InvalidResponse("no summary returned".to_string()))
}

fn parse_chat(body: &str) -> Result<String, ServiceError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ServiceError::InvalidResponse(format!("chat payload: {e}")))?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| ServiceError::InvalidResponse("no completion returned".to_string()))
}
