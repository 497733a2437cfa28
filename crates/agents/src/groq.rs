use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::backend::{BackendError, TextGenerator};
use crate::config::GroqSettings;

const PROVIDER: &str = "Groq";

/// OpenAI-compatible chat completions endpoint hosted by Groq.
#[derive(Debug, Clone)]
pub struct GroqBackend {
    client: Client,
    settings: GroqSettings,
}

impl GroqBackend {
    pub fn new(client: Client, settings: GroqSettings) -> Self {
        Self { client, settings }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl TextGenerator for GroqBackend {
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
            "model": self.settings.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_prompt }
            ],
            "temperature": self.settings.temperature,
            "max_tokens": self.settings.max_tokens
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
            if let Some(api_error) = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|value| value.get("error").cloned())
            {
                warn!(status = status.as_u16(), error = %api_error, "groq api error");
            }
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
        debug!(model = %self.settings.model, "groq completion received");

        extract_completion_text(&body).ok_or(BackendError::MalformedResponse { provider: PROVIDER })
    }
}

fn extract_completion_text(payload: &serde_json::Value) -> Option<String> {
    payload
        .pointer("/choices/0/message/content")
        .and_then(|value| value.as_str())
        .map(|text| text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn backend(server: &MockServer, api_key: Option<&str>) -> GroqBackend {
        GroqBackend::new(
            Client::new(),
            GroqSettings {
                api_key: api_key.map(ToString::to_string),
                base_url: server.uri(),
                ..GroqSettings::default()
            },
        )
    }

    #[tokio::test]
    async fn sends_system_and_user_messages() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer gsk_test"))
            .and(body_partial_json(serde_json::json!({
                "model": "llama-3.3-70b-versatile",
                "messages": [
                    { "role": "system", "content": "sistema" },
                    { "role": "user", "content": "¿Qué clima hace en Lima?" }
                ],
                "max_tokens": 1024
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "  clima \n" } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = backend(&server, Some("gsk_test"))
            .generate("sistema", "¿Qué clima hace en Lima?")
            .await
            .unwrap();

        assert_eq!(reply, "clima");
    }

    #[tokio::test]
    async fn missing_key_skips_the_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let error = backend(&server, None)
            .generate("sistema", "usuario")
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            BackendError::MissingCredential { provider: "Groq" }
        ));
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": { "message": "Invalid API Key" }
            })))
            .mount(&server)
            .await;

        let error = backend(&server, Some("bad"))
            .generate("sistema", "usuario")
            .await
            .unwrap_err();

        assert!(matches!(error, BackendError::Status { status: 401, .. }));
    }

    #[tokio::test]
    async fn missing_choices_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&server)
            .await;

        let error = backend(&server, Some("gsk_test"))
            .generate("sistema", "usuario")
            .await
            .unwrap_err();

        assert!(matches!(error, BackendError::MalformedResponse { .. }));
    }
}
