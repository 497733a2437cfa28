use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::backend::{BackendError, TextGenerator};
use crate::config::HuggingFaceSettings;

const PROVIDER: &str = "Hugging Face";

/// Hosted text-generation inference for Llama-2 chat models.
#[derive(Debug, Clone)]
pub struct HuggingFaceBackend {
    client: Client,
    settings: HuggingFaceSettings,
}

impl HuggingFaceBackend {
    pub fn new(client: Client, settings: HuggingFaceSettings) -> Self {
        Self { client, settings }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }
}

pub fn llama_chat_prompt(system_prompt: &str, user_prompt: &str) -> String {
    format!("<s>[INST] <<SYS>>\n{system_prompt}\n<</SYS>>\n\n{user_prompt} [/INST]")
}

#[async_trait]
impl TextGenerator for HuggingFaceBackend {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn is_configured(&self) -> bool {
        self.settings.api_key.is_some()
    }

    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, BackendError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or(BackendError::MissingCredential { provider: PROVIDER })?;

        let payload = serde_json::json!({
            "inputs": llama_chat_prompt(system_prompt, user_prompt),
            "parameters": {
                "max_new_tokens": self.settings.max_new_tokens,
                "temperature": self.settings.temperature,
                "return_full_text": false
            }
        });

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|source| BackendError::Transport {
                provider: PROVIDER,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
                body,
            });
        }

        let body: serde_json::Value =
            response
                .json()
                .await
                .map_err(|source| BackendError::Transport {
                    provider: PROVIDER,
                    source,
                })?;
        debug!(model = %self.settings.model, "hugging face generation received");

        body.pointer("/0/generated_text")
            .and_then(|value| value.as_str())
            .map(|text| text.trim().to_string())
            .ok_or(BackendError::MalformedResponse { provider: PROVIDER })
    }
}
