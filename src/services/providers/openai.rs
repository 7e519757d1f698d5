use async_openai::{
    config::{Config, OpenAIConfig},
    error::WrappedError,
};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use secrecy::ExposeSecret;
use serde_json::{json, Value};

use super::{GenerationProvider, ProviderCall, ProviderError, ProviderKind};
use crate::config::GenerationConfig;

const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// OpenAI chat-completions backend.
///
/// Requests go out through a plain `reqwest` client so that one call is one
/// HTTP round trip and the upstream status reaches [`ProviderError::Status`].
pub struct OpenAiProvider {
    client: HttpClient,
    config: OpenAIConfig,
    model: String,
}

impl OpenAiProvider {
    pub fn new(config: &GenerationConfig) -> Self {
        Self {
            client: HttpClient::new(),
            config: OpenAIConfig::new()
                .with_api_base(config.openai_base_url.trim_end_matches('/')),
            model: config.openai_model.clone(),
        }
    }

    fn endpoint(&self) -> String {
        self.config.url(CHAT_COMPLETIONS_PATH)
    }

    fn build_request(&self, call: &ProviderCall) -> Value {
        let content = match &call.image {
            None => Value::String(call.brief.clone()),
            Some(image) => json!([
                { "type": "text", "text": call.brief },
                { "type": "image_url", "image_url": { "url": image.to_data_uri() } }
            ]),
        };

        json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": content }]
        })
    }

    fn extract_text(response: &Value) -> Result<String, ProviderError> {
        if let Some(message) = response["error"]["message"].as_str() {
            return Err(ProviderError::Api(message.to_string()));
        }

        response["choices"][0]["message"]["content"]
            .as_str()
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .ok_or(ProviderError::EmptyResponse)
    }
}

/// Prefers the `{"error": {"message": ..}}` envelope; gateways often answer with plain text.
fn error_body(raw: String) -> String {
    match serde_json::from_str::<WrappedError>(&raw) {
        Ok(wrapped) => wrapped.error.message,
        Err(_) => raw,
    }
}

#[async_trait]
impl GenerationProvider for OpenAiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    async fn generate(&self, call: ProviderCall) -> Result<String, ProviderError> {
        let request = self.build_request(&call);

        log::debug!(
            "Sending OpenAI request (model {}, image: {})",
            self.model,
            call.image.is_some()
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(call.api_key.expose_secret())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response.text().await.unwrap_or_default());
            log::warn!("OpenAI API returned {}: {}", status, body);
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: Value = response.json().await?;
        Self::extract_text(&parsed)
    }
}
