use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::DescribeConfig;
use crate::error::{PipelineError, Result};

/// Randomness used for every completion; low so repeated requests agree.
pub const TEMPERATURE: f64 = 0.4;
pub const TOP_P: f64 = 1.0;
pub const FREQUENCY_PENALTY: f64 = 0.0;
pub const PRESENCE_PENALTY: f64 = 0.0;

/// Role of a message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// Request to the LLM.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmRequest {
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
}

impl LlmRequest {
    /// Single user message with the fixed decoding parameters.
    pub fn single_turn(prompt: &str, max_tokens: u32) -> Self {
        Self {
            messages: vec![Message {
                role: Role::User,
                content: prompt.trim().to_string(),
            }],
            max_tokens,
            temperature: TEMPERATURE,
            top_p: TOP_P,
            frequency_penalty: FREQUENCY_PENALTY,
            presence_penalty: PRESENCE_PENALTY,
        }
    }
}

/// Response from the LLM: the first choice's text, nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmResponse {
    pub content: String,
}

/// Trait for LLM clients, enabling mocking in tests.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse>;
}

/// OpenAI chat-completions client.
///
/// NOTE: Do NOT derive `Debug` on this struct, `api_key` would be exposed.
/// If Debug is needed, implement it manually with the key redacted.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    api_base_url: String,
    model: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f64,
    max_tokens: u32,
    top_p: f64,
    frequency_penalty: f64,
    presence_penalty: f64,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct OpenAiErrorResponse {
    error: Option<OpenAiErrorDetail>,
}

#[derive(Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}

impl OpenAiClient {
    pub fn new(config: &DescribeConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(PipelineError::LlmApiRequest)?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse> {
        let url = format!("{}/v1/chat/completions", self.api_base_url);

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            top_p: request.top_p,
            frequency_penalty: request.frequency_penalty,
            presence_penalty: request.presence_penalty,
        };

        debug!(
            model = %self.model,
            max_tokens = request.max_tokens,
            messages = request.messages.len(),
            "sending LLM request"
        );

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "LLM request failed");
                PipelineError::LlmApiRequest(e)
            })?;

        let status = resp.status().as_u16();

        if status == 429 {
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            warn!(retry_after, "LLM rate limited");
            return Err(PipelineError::LlmRateLimited {
                retry_after_secs: retry_after,
            });
        }

        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OpenAiErrorResponse>(&body_text)
                .ok()
                .and_then(|r| r.error)
                .map(|e| e.message)
                .unwrap_or(body_text);
            warn!(status, message = %message, "LLM API error");
            return Err(PipelineError::LlmApiError { status, message });
        }

        let api_response: ChatCompletionResponse = resp
            .json()
            .await
            .map_err(|e| PipelineError::LlmResponseParse(e.to_string()))?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| {
                warn!("LLM returned empty response");
                PipelineError::LlmEmptyResponse
            })?;

        Ok(LlmResponse { content })
    }
}

/// Test utilities for the LLM client.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_support {
    use super::*;
    use std::sync::Mutex;

    /// Mock LLM client for testing. Returns pre-configured responses in order
    /// and records every request it receives.
    pub struct MockLlmClient {
        responses: Mutex<Vec<Result<LlmResponse>>>,
        requests: Mutex<Vec<LlmRequest>>,
    }

    impl MockLlmClient {
        pub fn new(responses: Vec<Result<LlmResponse>>) -> Self {
            // Reverse so we can pop from the end
            let mut responses = responses;
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn with_response(content: &str) -> Self {
            Self::new(vec![Ok(LlmResponse {
                content: content.to_string(),
            })])
        }

        pub fn with_error(error: PipelineError) -> Self {
            Self::new(vec![Err(error)])
        }

        /// Requests received so far, oldest first.
        pub fn requests(&self) -> Vec<LlmRequest> {
            self.requests
                .lock()
                .map(|requests| requests.clone())
                .unwrap_or_default()
        }
    }

    #[async_trait]
    impl LlmClient for MockLlmClient {
        async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse> {
            if let Ok(mut requests) = self.requests.lock() {
                requests.push(request.clone());
            }
            let mut responses = self.responses.lock().map_err(|e| {
                PipelineError::LlmResponseParse(format!("mock lock poisoned: {e}"))
            })?;
            responses.pop().unwrap_or(Err(PipelineError::LlmEmptyResponse))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_turn_request_is_trimmed() {
        let request = LlmRequest::single_turn("\n  Мір\n  ", 256);
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, Role::User);
        assert_eq!(request.messages[0].content, "Мір");
        assert_eq!(request.max_tokens, 256);
    }

    #[test]
    fn test_single_turn_decoding_parameters() {
        let request = LlmRequest::single_turn("x", 1024);
        assert_eq!(request.temperature, 0.4);
        assert_eq!(request.top_p, 1.0);
        assert_eq!(request.frequency_penalty, 0.0);
        assert_eq!(request.presence_penalty, 0.0);
    }

    #[test]
    fn test_request_body_wire_format() {
        let request = LlmRequest::single_turn("Мір", 256);
        let body = ChatCompletionRequest {
            model: "gpt-4o-mini",
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            top_p: request.top_p,
            frequency_penalty: request.frequency_penalty,
            presence_penalty: request.presence_penalty,
        };
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "model": "gpt-4o-mini",
                "messages": [{"role": "user", "content": "Мір"}],
                "temperature": 0.4,
                "max_tokens": 256,
                "top_p": 1.0,
                "frequency_penalty": 0.0,
                "presence_penalty": 0.0
            })
        );
    }

    #[tokio::test]
    async fn test_mock_records_requests() {
        let mock = test_support::MockLlmClient::with_response("Барока\nXVIII ст.");
        let request = LlmRequest::single_turn("prompt", 256);
        let response = mock.complete(&request).await.expect("response");
        assert_eq!(response.content, "Барока\nXVIII ст.");
        assert_eq!(mock.requests(), vec![request]);
    }
}
