//! Generic client for OpenAI-compatible APIs.

use crate::openai_compat::{ChatResponse, conversions, sse};
use aign_core::{CompletionRequest, CompletionResponse};
use aign_error::{AignResult, ConfigError, TransportError, TransportErrorKind};
use aign_interface::{ChatDriver, ChunkStream, Streaming};
use aign_retry::ProviderConfig;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, instrument};

/// Generic client for any OpenAI-compatible API.
///
/// Posts to `{base_url}/chat/completions` with bearer authentication.
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
    provider: String,
    max_tokens: Option<u32>,
}

impl OpenAICompatibleClient {
    /// Creates a new OpenAI-compatible client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - API key for authentication
    /// * `model` - Model identifier
    /// * `base_url` - Base URL of the API, without `/chat/completions`
    /// * `provider` - Name of the provider (for logging/tracing)
    #[instrument(skip_all, fields(provider = %provider, model = %model))]
    pub fn new(api_key: String, model: String, base_url: &str, provider: String) -> Self {
        let endpoint = format!("{}/chat/completions", base_url.trim_end_matches('/'));

        debug!(url = %endpoint, "Created OpenAI-compatible client");

        Self {
            client: Client::new(),
            api_key,
            model,
            endpoint,
            provider,
            max_tokens: None,
        }
    }

    /// Build a client from configuration, reading the key from the
    /// environment variable named by `api_key_env`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the variable is unset or empty.
    pub fn from_config(config: &ProviderConfig) -> AignResult<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ConfigError::new(format!(
                    "Environment variable {} is not set",
                    config.api_key_env
                ))
            })?;

        let mut client = Self::new(
            api_key,
            config.model.clone(),
            &config.base_url,
            config.name.clone(),
        );
        client.max_tokens = config.max_tokens;
        Ok(client)
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, req: &CompletionRequest, stream: bool) -> AignResult<reqwest::Response> {
        let chat_request = conversions::to_chat_request(req, &self.model, self.max_tokens, stream)?;

        debug!(
            provider = %self.provider,
            model = %chat_request.model(),
            message_count = chat_request.messages().len(),
            stream,
            "Sending request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| {
                error!(provider = %self.provider, error = ?e, "HTTP request failed");
                TransportError::new(TransportErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            error!(provider = %self.provider, "Rate limit exceeded");
            return Err(TransportError::new(TransportErrorKind::RateLimited).into());
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                provider = %self.provider,
                status = %status,
                error = %error_text,
                "API error"
            );

            return Err(TransportError::new(TransportErrorKind::Api {
                status: status.as_u16(),
                message: error_text,
            })
            .into());
        }

        Ok(response)
    }
}

#[async_trait]
impl ChatDriver for OpenAICompatibleClient {
    #[instrument(skip(self, req), fields(provider = %self.provider, model = %self.model))]
    async fn complete(&self, req: &CompletionRequest) -> AignResult<CompletionResponse> {
        let response = self.post(req, false).await?;

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            error!(provider = %self.provider, error = ?e, "Failed to parse response");
            TransportError::new(TransportErrorKind::ResponseParsing(format!(
                "Failed to parse JSON: {}",
                e
            )))
        })?;

        debug!(
            provider = %self.provider,
            choices = chat_response.choices.len(),
            "Received response"
        );

        Ok(conversions::from_chat_response(&chat_response)?)
    }

    fn provider_name(&self) -> &str {
        &self.provider
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Streaming for OpenAICompatibleClient {
    #[instrument(skip(self, req), fields(provider = %self.provider, model = %self.model))]
    async fn complete_stream(&self, req: &CompletionRequest) -> AignResult<ChunkStream> {
        let response = self.post(req, true).await?;
        Ok(sse::decode(response.bytes_stream()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_url() {
        let client = OpenAICompatibleClient::new(
            "key".into(),
            "glm-4".into(),
            "https://open.bigmodel.cn/api/paas/v4/",
            "zhipu".into(),
        );

        assert_eq!(
            client.endpoint(),
            "https://open.bigmodel.cn/api/paas/v4/chat/completions"
        );
        assert_eq!(client.provider_name(), "zhipu");
        assert_eq!(client.model_name(), "glm-4");
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = ProviderConfig {
            name: "zhipu".into(),
            base_url: "https://example.invalid/v1".into(),
            model: "glm-4".into(),
            api_key_env: "AIGN_TEST_KEY_THAT_IS_NEVER_SET".into(),
            max_tokens: None,
        };

        let err = OpenAICompatibleClient::from_config(&config).expect_err("missing key");
        assert!(err.to_string().contains("AIGN_TEST_KEY_THAT_IS_NEVER_SET"));
    }
}
