//! Anthropic Messages API provider

use anyhow::{Context, Result};
use reqwest::Client;

use super::config::ModelConfig;
use super::provider::LlmProvider;
use super::types::{ApiError, Message, MessageRequest, ToolDefinition};

/// API version header value
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic LLM provider
pub struct AnthropicProvider {
    client: Client,
    config: ModelConfig,
    api_key: String,
}

impl AnthropicProvider {
    /// Create a provider from an explicit configuration
    ///
    /// Fails when the configuration carries no API key.
    pub fn new(config: ModelConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .context("Missing API key: set ANTHROPIC_API_KEY or ANTHROPIC_AUTH_TOKEN")?;

        tracing::info!("Using model: {}", config.model);
        tracing::info!("API endpoint: {}", config.messages_url());
        tracing::info!("Max tokens: {}", config.max_tokens);

        Ok(Self {
            client: Client::new(),
            config,
            api_key,
        })
    }

    /// Turn a non-success body into a readable message
    fn describe_error(status: reqwest::StatusCode, body: &str) -> String {
        match serde_json::from_str::<ApiError>(body) {
            Ok(api_error) => format!(
                "Anthropic API error ({}): {}: {}",
                status, api_error.error.error_type, api_error.error.message
            ),
            Err(_) => format!("Anthropic API error ({}): {}", status, body),
        }
    }
}

#[async_trait::async_trait]
impl LlmProvider for AnthropicProvider {
    async fn send_with_tools(
        &self,
        messages: Vec<Message>,
        system: Option<&str>,
        tools: Vec<ToolDefinition>,
    ) -> Result<String> {
        let request = MessageRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            messages,
            system: system.map(str::to_string),
            tools: if tools.is_empty() { None } else { Some(tools) },
        };

        tracing::info!(
            "Sending {} messages to Anthropic API",
            request.messages.len()
        );

        let response = self
            .client
            .post(self.config.messages_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Anthropic API")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read Anthropic response body")?;

        tracing::debug!("Response status: {}", status);
        tracing::debug!("Response body length: {} bytes", body.len());

        if !status.is_success() {
            let message = Self::describe_error(status, &body);
            tracing::error!("{}", message);
            anyhow::bail!(message);
        }

        Ok(body)
    }

    fn model(&self) -> String {
        self.config.model.clone()
    }

    fn provider_name(&self) -> &str {
        "anthropic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_api_key() {
        assert!(AnthropicProvider::new(ModelConfig::default()).is_err());

        let provider = AnthropicProvider::new(ModelConfig::default().with_api_key("sk-test")).unwrap();
        assert_eq!(provider.provider_name(), "anthropic");
        assert_eq!(provider.model(), crate::llm::config::DEFAULT_MODEL);
    }

    #[test]
    fn test_describe_error() {
        let body = r#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#;
        let message = AnthropicProvider::describe_error(reqwest::StatusCode::UNAUTHORIZED, body);
        assert!(message.contains("authentication_error"));
        assert!(message.contains("invalid x-api-key"));

        let message = AnthropicProvider::describe_error(reqwest::StatusCode::BAD_GATEWAY, "upstream down");
        assert!(message.contains("502"));
        assert!(message.contains("upstream down"));
    }
}
