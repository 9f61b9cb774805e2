//! Generation-service interaction for outline text.
//!
//! This module talks to the Google Generative Language API. It exposes a
//! trait-based seam:
//! - [`GenerateAsync`]: core trait defining the async generation call
//! - [`GeminiClient`]: the `generateContent` implementation over HTTP
//!
//! One invocation makes exactly one outbound call — there is no retry
//! logic, no caching and no deduplication of overlapping calls. Recovery
//! is manual: the wizard surfaces the failure and lets the user resubmit.
//!
//! [`GenerateError`] distinguishes a known failure carrying a service or
//! transport message from an unknown one, so the error panel can always
//! show something human-readable.

use serde::Deserialize;
use serde_json::json;
use std::error::Error;
use std::fmt;
use std::time::Instant;
use tracing::{error, info, instrument, warn};

use crate::config::GeminiConfig;

/// Trait for async outline generation.
///
/// Implementors send a prompt to a generation service and return its raw
/// response text. The wizard depends on this seam rather than on the
/// concrete client, so tests can substitute a scripted generator.
pub trait GenerateAsync {
    /// The type of response returned by the service.
    type Response;

    /// Send a prompt to the service and receive its response.
    ///
    /// The prompt must be non-empty. Exactly one outbound call is made
    /// per invocation.
    async fn generate(&self, prompt: &str) -> Result<Self::Response, GenerateError>;
}

/// A failed generation call.
///
/// The `Display` rendering is the user-facing message shown in the error
/// panel; known failures carry the underlying detail, unknown ones fall
/// back to a generic message.
#[derive(Debug)]
pub enum GenerateError {
    /// The caller tried to generate from an empty prompt.
    EmptyPrompt,
    /// The request never produced a usable HTTP response.
    Http(String),
    /// The service answered with an error status and message.
    Api { status: u16, message: String },
    /// The service answered 200 but the payload had no outline text.
    MalformedResponse(String),
    /// The failure carried no extractable message.
    Unknown,
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::EmptyPrompt => {
                write!(f, "Falla en la Matrix generando la pauta: el prompt está vacío")
            }
            GenerateError::Http(detail) => {
                write!(f, "Falla en la Matrix generando la pauta: {detail}")
            }
            GenerateError::Api { status, message } => {
                write!(
                    f,
                    "Falla en la Matrix generando la pauta: el servicio respondió {status}: {message}"
                )
            }
            GenerateError::MalformedResponse(detail) => {
                write!(f, "Falla en la Matrix generando la pauta: {detail}")
            }
            GenerateError::Unknown => write!(
                f,
                "Ocurrió un error desconocido al contactar a la IA. Quizás se fue a tomar un café."
            ),
        }
    }
}

impl Error for GenerateError {}

/// Client for the `models/{model}:generateContent` endpoint.
pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.model)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a client from a resolved configuration.
    ///
    /// The credential was already validated at startup; construction
    /// cannot fail.
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// The model this client is pinned to.
    pub fn model(&self) -> &str {
        &self.config.model
    }
}

impl GenerateAsync for GeminiClient {
    type Response = String;

    #[instrument(level = "info", skip_all, fields(model = %self.config.model))]
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        if prompt.trim().is_empty() {
            return Err(GenerateError::EmptyPrompt);
        }

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "maxOutputTokens": self.config.max_output_tokens
            }
        });

        let t0 = Instant::now();
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(elapsed_ms = t0.elapsed().as_millis() as u128, error = %e, "Request failed");
                GenerateError::Http(e.to_string())
            })?;

        let status = response.status();
        let payload = response
            .text()
            .await
            .map_err(|e| GenerateError::Http(e.to_string()))?;

        if !status.is_success() {
            error!(
                status = status.as_u16(),
                elapsed_ms = t0.elapsed().as_millis() as u128,
                "Generation service returned an error status"
            );
            return Err(api_error(status.as_u16(), &payload));
        }

        let text = extract_text(&payload)?;
        info!(
            elapsed_ms = t0.elapsed().as_millis() as u128,
            bytes = text.len(),
            "Generation succeeded"
        );
        Ok(text)
    }
}

/// Classify a non-success response into [`GenerateError::Api`] when the
/// standard error envelope carries a message, [`GenerateError::Unknown`]
/// otherwise.
fn api_error(status: u16, payload: &str) -> GenerateError {
    let envelope: Result<ErrorEnvelope, _> = serde_json::from_str(payload);
    match envelope {
        Ok(ErrorEnvelope {
            error: Some(ApiErrorBody {
                message: Some(message),
                ..
            }),
        }) if !message.trim().is_empty() => GenerateError::Api { status, message },
        _ => GenerateError::Unknown,
    }
}

/// Extract the concatenated candidate text from a success payload.
fn extract_text(payload: &str) -> Result<String, GenerateError> {
    let parsed: GenerateContentResponse = serde_json::from_str(payload)
        .map_err(|e| GenerateError::MalformedResponse(format!("respuesta no es JSON válido: {e}")))?;

    let text: String = parsed
        .candidates
        .into_iter()
        .flat_map(|candidate| candidate.content.into_iter())
        .flat_map(|content| content.parts)
        .filter_map(|part| part.text)
        .collect();

    if text.is_empty() {
        return Err(GenerateError::MalformedResponse(
            "la respuesta no trae texto de pauta".to_string(),
        ));
    }
    Ok(text)
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct ApiErrorBody {
    message: Option<String>,
    status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileConfig;

    fn test_client() -> GeminiClient {
        let config = GeminiConfig::resolve(
            "test-key".to_string(),
            None,
            None,
            &FileConfig::default(),
        )
        .unwrap();
        GeminiClient::new(config)
    }

    #[tokio::test]
    async fn test_empty_prompt_is_rejected_without_a_call() {
        let client = test_client();
        let result = client.generate("   ").await;
        assert!(matches!(result, Err(GenerateError::EmptyPrompt)));
    }

    #[test]
    fn test_extract_text_from_success_payload() {
        let payload = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "**Intro (1-3 minutos)**\n"},
                        {"text": "1. Saludo inicial"}
                    ],
                    "role": "model"
                },
                "finishReason": "STOP"
            }]
        }"#;
        let text = extract_text(payload).unwrap();
        assert_eq!(text, "**Intro (1-3 minutos)**\n1. Saludo inicial");
    }

    #[test]
    fn test_payload_without_text_is_malformed() {
        let payload = r#"{"candidates": [{"content": {"parts": [], "role": "model"}}]}"#;
        assert!(matches!(
            extract_text(payload),
            Err(GenerateError::MalformedResponse(_))
        ));

        assert!(matches!(
            extract_text("not json"),
            Err(GenerateError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_api_error_with_message_is_known() {
        let payload = r#"{"error": {"code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}}"#;
        let err = api_error(429, payload);
        assert!(err.to_string().contains("Resource has been exhausted"));
        match err {
            GenerateError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "Resource has been exhausted");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_api_error_without_message_is_unknown() {
        let err = api_error(502, "<html>Bad Gateway</html>");
        assert!(matches!(err, GenerateError::Unknown));
        assert!(err.to_string().contains("error desconocido"));
    }

    #[test]
    fn test_display_messages_are_non_empty() {
        for err in [
            GenerateError::EmptyPrompt,
            GenerateError::Http("connection refused".to_string()),
            GenerateError::MalformedResponse("sin texto".to_string()),
            GenerateError::Unknown,
        ] {
            assert!(!err.to_string().is_empty());
        }
    }
}
