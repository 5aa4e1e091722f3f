#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use bytes::Bytes;
use http_body_util::BodyExt;
use tower::ServiceExt;

use studio_api::config::Config;
use studio_api::extraction::{ExtractionError, TextExtractor};
use studio_api::generative::{GeneratedOutput, GenerativeService, Modality, ServiceError};
use studio_api::state::AppState;

pub const BOUNDARY: &str = "studio-test-boundary";

/// Returns fixed text for any upload, or a fixed error.
pub struct FakeExtractor(pub Result<String, ExtractionError>);

impl TextExtractor for FakeExtractor {
    fn extract_text(&self, _pdf: &[u8]) -> Result<String, ExtractionError> {
        self.0.clone()
    }
}

/// Records every invocation and answers with a canned output per modality.
#[derive(Default)]
pub struct FakeGenerative {
    pub calls: Mutex<Vec<(String, Modality)>>,
    pub fail_with_status: Option<u16>,
}

#[async_trait]
impl GenerativeService for FakeGenerative {
    async fn invoke(
        &self,
        prompt: &str,
        modality: &Modality,
    ) -> Result<GeneratedOutput, ServiceError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), modality.clone()));

        if let Some(status) = self.fail_with_status {
            return Err(ServiceError::Upstream {
                status,
                message: "upstream exploded".to_string(),
            });
        }

        Ok(match modality {
            Modality::Image => GeneratedOutput::Bytes {
                content_type: "image/png".to_string(),
                data: Bytes::from_static(b"\x89PNG fake"),
            },
            Modality::Audio { .. } => GeneratedOutput::Bytes {
                content_type: "audio/mpeg".to_string(),
                data: Bytes::from_static(b"ID3 fake"),
            },
            Modality::Summary => {
                GeneratedOutput::Text(format!("summary of {} chars", prompt.len()))
            }
            Modality::CodeExplanation => {
                GeneratedOutput::Text("`undefined_variable` is never defined.".to_string())
            }
        })
    }
}

pub fn app_with(extractor: FakeExtractor, generative: Arc<FakeGenerative>) -> Router {
    studio_api::build_router(AppState {
        config: Config::default(),
        extractor: Arc::new(extractor),
        generative,
    })
}

pub fn default_app() -> Router {
    app_with(
        FakeExtractor(Ok(String::new())),
        Arc::new(FakeGenerative::default()),
    )
}

pub type Headers = Vec<(String, String)>;

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Headers, Bytes) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response
        .headers()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
        .collect();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, body)
}

pub fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

pub fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, filename, data) => {
                let disposition = format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\""
                );
                body.extend_from_slice(disposition.as_bytes());
                body.extend_from_slice(b"\r\nContent-Type: application/pdf\r\n\r\n");
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::post(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
