use super::types::{CompletionBody, CompletionResponse};
use super::{ChatRequest, Completer};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Server returned error status {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Model returned no content")]
    EmptyResponse,
}

/// Connection settings for an OpenAI-compatible chat endpoint
#[derive(Debug, Clone)]
pub struct CompletionSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl CompletionSettings {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1";
    pub const DEFAULT_MODEL: &'static str = "gpt-3.5-turbo";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            model: Self::DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(120),
        }
    }
}

pub struct OpenAiClient {
    http: Client,
    settings: CompletionSettings,
}

impl OpenAiClient {
    pub fn new(settings: CompletionSettings) -> Result<Self, CompletionError> {
        let http = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self { http, settings })
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.settings.base_url.trim_end_matches('/'))
    }

    async fn send(&self, request: ChatRequest) -> Result<String, CompletionError> {
        let body = CompletionBody {
            model: &self.settings.model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CompletionError::ServerError {
                status: status.as_u16(),
                body,
            });
        }

        let res: CompletionResponse = response.json().await?;
        debug!(model = %self.settings.model, choices = res.choices.len(), "Completion received");
        extract_content(res)
    }
}

impl Completer for OpenAiClient {
    fn complete(
        &self,
        request: ChatRequest,
    ) -> impl Future<Output = Result<String, CompletionError>> + Send {
        self.send(request)
    }
}

/// Text of the first choice, rejecting missing or blank content
fn extract_content(res: CompletionResponse) -> Result<String, CompletionError> {
    res.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(CompletionError::EmptyResponse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::ChatMessage;

    #[test]
    fn test_request_body_shape() {
        let request = ChatRequest::new("be terse", "review this", 1000).temperature(0.7);
        let body = CompletionBody {
            model: "gpt-3.5-turbo",
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["max_tokens"], 1000);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "review this");
        assert!((json["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_temperature_omitted_when_unset() {
        let messages = vec![ChatMessage::user("hi")];
        let body = CompletionBody {
            model: "m",
            messages: &messages,
            max_tokens: 5,
            temperature: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn test_extract_first_choice() {
        let res: CompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Looks fine."}},{"message":{"content":"other"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_content(res).unwrap(), "Looks fine.");
    }

    #[test]
    fn test_extract_empty() {
        for raw in [
            r#"{"choices":[]}"#,
            r#"{}"#,
            r#"{"choices":[{"message":{"content":null}}]}"#,
            r#"{"choices":[{"message":{"content":"   "}}]}"#,
        ] {
            let res: CompletionResponse = serde_json::from_str(raw).unwrap();
            assert!(matches!(extract_content(res), Err(CompletionError::EmptyResponse)));
        }
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let mut settings = CompletionSettings::new("sk-test");
        settings.base_url = "http://localhost:8080/v1/".to_string();
        let client = OpenAiClient::new(settings).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080/v1/chat/completions");
        assert_eq!(client.model(), "gpt-3.5-turbo");
    }
}
