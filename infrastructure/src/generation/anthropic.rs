//! Anthropic Messages API generator.
//!
//! Each request is a single user message; only `text` content blocks are
//! read back. Timeouts are applied by the caller, not by the HTTP client.

use async_trait::async_trait;
use boardroom_application::{GenerationError, TextGenerator};
use boardroom_domain::{GenerationOutput, GenerationRequest, TokenUsage};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// [`TextGenerator`] backed by `POST {base_url}/v1/messages`
pub struct AnthropicGenerator {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl AnthropicGenerator {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| GenerationError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: crate::config::DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// Point at a proxy or a test server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [UserMessage<'a>; 1],
}

#[derive(Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Deserialize, Default)]
struct Usage {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
}

#[async_trait]
impl TextGenerator for AnthropicGenerator {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationOutput, GenerationError> {
        let url = format!("{}/v1/messages", self.base_url);
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: request.max_tokens,
            messages: [UserMessage {
                role: "user",
                content: &request.prompt,
            }],
        };

        debug!(
            model = %self.model,
            max_tokens = request.max_tokens,
            "Sending messages request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if status == 429 {
            let message = response.text().await.unwrap_or_default();
            return Err(GenerationError::RateLimited(message));
        }
        if status == 401 || status == 403 {
            let message = response.text().await.unwrap_or_default();
            return Err(GenerationError::Authentication(message));
        }
        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status, body = %message, "Anthropic API error");
            return Err(GenerationError::Api { status, message });
        }

        let parsed: MessagesResponse = response.json().await.map_err(|e| {
            GenerationError::MalformedOutput(format!("failed to parse messages response: {e}"))
        })?;

        let text = parsed
            .content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join("");
        if text.trim().is_empty() {
            return Err(GenerationError::MalformedOutput(
                "response contained no text".into(),
            ));
        }

        let usage = TokenUsage {
            input_tokens: parsed.usage.input_tokens,
            output_tokens: parsed.usage.output_tokens,
        };
        debug!(
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            "Messages request completed"
        );
        Ok(GenerationOutput::new(
            text,
            parsed.model.unwrap_or_else(|| self.model.clone()),
            usage,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn generator(server: &MockServer) -> AnthropicGenerator {
        AnthropicGenerator::new("test-key", "claude-test")
            .unwrap()
            .with_base_url(format!("{}/", server.uri()))
    }

    #[tokio::test]
    async fn test_generate_sends_single_user_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "test-key"))
            .and(header("anthropic-version", ANTHROPIC_VERSION))
            .and(body_partial_json(json!({
                "model": "claude-test",
                "max_tokens": 500,
                "messages": [{"role": "user", "content": "Speak."}],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "msg_1",
                "model": "claude-test-20250101",
                "content": [
                    {"type": "text", "text": "I "},
                    {"type": "tool_use", "id": "t", "name": "x", "input": {}},
                    {"type": "text", "text": "agree."}
                ],
                "usage": {"input_tokens": 12, "output_tokens": 3}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let output = generator(&server)
            .await
            .generate(&GenerationRequest::new("Speak.", 500))
            .await
            .unwrap();
        assert_eq!(output.text, "I agree.");
        assert_eq!(output.model, "claude-test-20250101");
        assert_eq!(output.usage.input_tokens, 12);
        assert_eq!(output.usage.output_tokens, 3);
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let cases = [
            (429, "rate"),
            (401, "auth"),
            (403, "auth"),
            (500, "api"),
            (400, "api"),
        ];
        for (status, kind) in cases {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
                .mount(&server)
                .await;

            let err = generator(&server)
                .await
                .generate(&GenerationRequest::new("x", 10))
                .await
                .unwrap_err();
            match (kind, err) {
                ("rate", GenerationError::RateLimited(_)) => {}
                ("auth", GenerationError::Authentication(_)) => {}
                ("api", GenerationError::Api { status: got, message }) => {
                    assert_eq!(got, status);
                    assert_eq!(message, "nope");
                }
                (kind, other) => panic!("status {status}: expected {kind}, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_empty_text_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "text", "text": "   "}],
                "usage": {"input_tokens": 1, "output_tokens": 0}
            })))
            .mount(&server)
            .await;

        let err = generator(&server)
            .await
            .generate(&GenerationRequest::new("x", 10))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::MalformedOutput(_)));
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = generator(&server)
            .await
            .generate(&GenerationRequest::new("x", 10))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::MalformedOutput(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let generator = AnthropicGenerator::new("k", "m")
            .unwrap()
            .with_base_url("http://127.0.0.1:1");
        let err = generator
            .generate(&GenerationRequest::new("x", 10))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Network(_)));
        assert!(err.is_transient());
    }
}
