//! Model boundary configuration
//!
//! Built once at process start and handed to the provider. Nothing below
//! `main` reads the environment.

use std::env;

/// Default model when `MODEL_ID` is unset
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
/// Default API base address
pub const DEFAULT_API_BASE: &str = "https://api.anthropic.com";
/// Default response token cap
pub const DEFAULT_MAX_TOKENS: u32 = 8000;

/// Model identifier, endpoint and credentials
#[derive(Clone, PartialEq, Eq)]
pub struct ModelConfig {
    /// Model identifier sent with every request
    pub model: String,
    /// API base address, without the `/v1/messages` path
    pub api_base: String,
    /// API key, if one was configured
    pub api_key: Option<String>,
    /// Maximum tokens per response
    pub max_tokens: u32,
}

impl ModelConfig {
    /// Create a configuration for `model` against the default endpoint
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: None,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Build from environment variables
    ///
    /// Reads:
    /// - `MODEL_ID` (optional, defaults to [`DEFAULT_MODEL`])
    /// - `ANTHROPIC_BASE_URL` or `ANTHROPIC_API_BASE` (optional)
    /// - `ANTHROPIC_API_KEY` or `ANTHROPIC_AUTH_TOKEN` (optional here, the
    ///   HTTP provider requires it)
    /// - `MAX_TOKENS` (optional, defaults to [`DEFAULT_MAX_TOKENS`])
    pub fn from_env() -> Self {
        tracing::info!("Loading model configuration from environment");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let model = non_empty("MODEL_ID").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let api_base = non_empty("ANTHROPIC_BASE_URL")
            .or_else(|| non_empty("ANTHROPIC_API_BASE"))
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let api_key = non_empty("ANTHROPIC_API_KEY").or_else(|| non_empty("ANTHROPIC_AUTH_TOKEN"));
        let max_tokens = match non_empty("MAX_TOKENS") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(
                    "Ignoring unparsable MAX_TOKENS {:?}, using {}",
                    raw,
                    DEFAULT_MAX_TOKENS
                );
                DEFAULT_MAX_TOKENS
            }),
            None => DEFAULT_MAX_TOKENS,
        };

        Self {
            model,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key,
            max_tokens,
        }
    }

    /// Set the API base address
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the max tokens for responses
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Full URL of the Messages endpoint
    pub fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.api_base)
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}

impl std::fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelConfig")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}
