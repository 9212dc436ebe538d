use crate::config::GatewayConfig;
use crate::errors::{truncate_for_error, CoreError, GatewayError};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::backend::{GatewayResponse, GenerationConfig, ModelGateway};

pub const PROVIDER: &str = "gemini";

/// Gateway for the Gemini `generateContent` REST endpoint.
pub struct GeminiGateway {
    client: Client,
    base_url: String,
    model: String,
}

impl GeminiGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, CoreError> {
        if !config.provider.eq_ignore_ascii_case(PROVIDER) {
            return Err(CoreError::Config(format!(
                "unsupported gateway provider '{}' (expected '{PROVIDER}')",
                config.provider
            )));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CoreError::Config(format!("building HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

impl ModelGateway for GeminiGateway {
    fn generate(
        &self,
        credential: &str,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<GatewayResponse, GatewayError> {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: RequestGenerationConfig::from(config),
        };

        // Never in the query string: reqwest errors echo the URL.
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", credential)
            .json(&request)
            .send()
            .map_err(classify_transport_error)?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| GatewayError::Network(format!("reading response body: {e}")))?;

        if !status.is_success() {
            return Err(classify_status(status, &body));
        }

        extract_response(&body)
    }
}

fn classify_transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Network(format!("request timed out: {e}"))
    } else if e.is_connect() || e.is_request() {
        GatewayError::Network(e.to_string())
    } else {
        GatewayError::Unknown(e.to_string())
    }
}

/// Map a non-2xx Gemini response onto the gateway error taxonomy.
pub(crate) fn classify_status(status: StatusCode, body: &str) -> GatewayError {
    let api_error = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|e| e.error);
    let message = api_error
        .as_ref()
        .map(|e| e.message.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP {status}: {}", truncate_for_error(body, 500)));
    let api_status = api_error.as_ref().map(|e| e.status.as_str()).unwrap_or("");

    let bad_key = body.contains("API_KEY_INVALID") || body.contains("API key not valid");

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayError::Auth(message),
        StatusCode::BAD_REQUEST if bad_key => GatewayError::Auth(message),
        StatusCode::TOO_MANY_REQUESTS => GatewayError::Quota(message),
        _ if api_status == "RESOURCE_EXHAUSTED" => GatewayError::Quota(message),
        _ if api_status == "PERMISSION_DENIED" || api_status == "UNAUTHENTICATED" => {
            GatewayError::Auth(message)
        }
        s if s.is_server_error() => GatewayError::Unknown(format!("server error: {message}")),
        _ => GatewayError::Unknown(message),
    }
}

/// Pull the first candidate's text out of a successful response body.
pub(crate) fn extract_response(body: &str) -> Result<GatewayResponse, GatewayError> {
    let parsed: GenerateResponse = serde_json::from_str(body).map_err(|e| {
        GatewayError::Unknown(format!(
            "failed to parse Gemini response: {e}\nraw output: {}",
            truncate_for_error(body, 500)
        ))
    })?;

    let usage = parsed.usage_metadata.unwrap_or_default();

    let Some(candidate) = parsed.candidates.into_iter().next() else {
        let reason = parsed
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates".to_string());
        return Err(GatewayError::Unknown(format!(
            "Gemini returned no candidates (block reason: {reason})"
        )));
    };

    let text = candidate
        .content
        .map(|c| {
            c.parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GatewayError::Unknown(format!(
            "Gemini returned empty text (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    }

    Ok(GatewayResponse {
        text,
        input_tokens: usage.prompt_token_count,
        output_tokens: usage.candidates_token_count,
    })
}

// ── Wire types ──

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<RequestContent>,
    generation_config: RequestGenerationConfig,
}

#[derive(Serialize, Debug)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Serialize, Debug)]
struct RequestPart {
    text: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RequestGenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

impl From<&GenerationConfig> for RequestGenerationConfig {
    fn from(c: &GenerationConfig) -> Self {
        Self {
            temperature: c.temperature,
            top_k: c.top_k,
            top_p: c.top_p,
            max_output_tokens: c.max_output_tokens,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize, Debug)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Deserialize, Debug)]
struct ApiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}
