//! Gemini `generateContent` client used as the song oracle.
//!
//! See: https://ai.google.dev/api/generate-content

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::normalize::DecodeError;
use crate::config::OracleConfig;

const USER_AGENT: &str = concat!("k-pulse/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("oracle returned no text")]
    EmptyResponse,

    #[error("malformed oracle response: {0}")]
    Malformed(#[from] DecodeError),
}

/// A text completion constrained to a JSON response schema.
///
/// Implement this trait to substitute the oracle in tests.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Returns the raw JSON text produced for `prompt`.
    async fn complete_json(&self, prompt: &str, schema: Value) -> Result<String, OracleError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

pub struct GeminiClient {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &OracleConfig) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.resolved_api_key(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    fn build_request(&self, prompt: &str, schema: Value, api_key: &str) -> reqwest::RequestBuilder {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            },
        };

        self.http_client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
    }
}

/// Error message from a Gemini error body, else the status reason
fn status_error(status: StatusCode, body: &str) -> OracleError {
    let message = match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(body) => body.error.message,
        Err(_) => status.canonical_reason().unwrap_or("Unknown").to_string(),
    };
    OracleError::Status { status: status.as_u16(), message }
}

/// Text of a successful response body
fn response_text(body: &str) -> Result<String, OracleError> {
    let response: GenerateResponse = serde_json::from_str(body).map_err(DecodeError::from)?;
    response.into_text().ok_or(OracleError::EmptyResponse)
}

#[async_trait]
impl CompletionService for GeminiClient {
    async fn complete_json(&self, prompt: &str, schema: Value) -> Result<String, OracleError> {
        let api_key = self.api_key.as_deref().ok_or(OracleError::MissingApiKey)?;

        let response = self
            .build_request(prompt, schema, api_key)
            .send()
            .await
            .map_err(|e| OracleError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| OracleError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        response_text(&body)
    }
}

#[cfg(test)]
pub mod mocks {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Replays canned responses in order and records the prompts it saw
    #[derive(Default)]
    pub struct ScriptedCompletion {
        responses: Mutex<VecDeque<Result<String, OracleError>>>,
        pub prompts: Mutex<Vec<String>>,
        pub schemas: Mutex<Vec<Value>>,
    }

    impl ScriptedCompletion {
        pub fn replying(responses: Vec<Result<String, OracleError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                ..Default::default()
            }
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionService for ScriptedCompletion {
        async fn complete_json(&self, prompt: &str, schema: Value) -> Result<String, OracleError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.schemas.lock().unwrap().push(schema);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(OracleError::EmptyResponse))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> OracleConfig {
        OracleConfig {
            api_key: Some("test-key".to_string()),
            model: "gemini-3-flash-preview".to_string(),
            base_url: "http://localhost:8080/".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_endpoint_format() {
        let client = GeminiClient::new(&config()).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let request = GenerateRequest {
            contents: vec![RequestContent { parts: vec![RequestPart { text: "hi" }] }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: json!({ "type": "OBJECT" }),
            },
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn test_response_text_joins_parts() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "[{\"a\":" }, { "text": "1}]" }] } }]
        }))
        .unwrap();
        assert_eq!(response.into_text().as_deref(), Some("[{\"a\":1}]"));
    }

    #[test]
    fn test_response_without_candidates() {
        let response: GenerateResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.into_text().is_none());
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_fast() {
        let mut cfg = config();
        cfg.api_key = None;
        let client = GeminiClient {
            http_client: reqwest::Client::new(),
            base_url: cfg.base_url.clone(),
            model: cfg.model.clone(),
            api_key: None,
        };
        let err = client.complete_json("prompt", json!({})).await.unwrap_err();
        assert!(matches!(err, OracleError::MissingApiKey));
    }

    #[test]
    fn test_request_carries_api_key_header() {
        let client = GeminiClient::new(&config()).unwrap();
        let request = client
            .build_request("hi", json!({ "type": "ARRAY" }), "test-key")
            .build()
            .unwrap();

        assert_eq!(request.method(), &reqwest::Method::POST);
        assert_eq!(
            request.url().as_str(),
            "http://localhost:8080/v1beta/models/gemini-3-flash-preview:generateContent"
        );
        assert_eq!(request.headers().get("x-goog-api-key").unwrap(), "test-key");

        let bytes = request.body().and_then(|b| b.as_bytes()).unwrap();
        let body: Value = serde_json::from_slice(bytes).unwrap();
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "ARRAY");
    }

    #[test]
    fn test_error_body_message_is_kept() {
        let body = r#"{
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        }"#;
        match status_error(StatusCode::BAD_REQUEST, body) {
            OracleError::Status { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid. Please pass a valid API key.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unparsable_error_body_uses_reason() {
        let err = status_error(StatusCode::SERVICE_UNAVAILABLE, "<html>busy</html>");
        assert!(matches!(
            err,
            OracleError::Status { status: 503, ref message } if message == "Service Unavailable"
        ));
    }

    #[test]
    fn test_undecodable_success_body_is_malformed() {
        let err = response_text("not json").unwrap_err();
        assert!(matches!(err, OracleError::Malformed(DecodeError::Json(_))));

        let err = response_text(r#"{"candidates":[]}"#).unwrap_err();
        assert!(matches!(err, OracleError::EmptyResponse));
    }
}
