use async_trait::async_trait;
use ruta_core::{Locale, PromptPair};
use ruta_observability::AppMetrics;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{provider} credential is not configured")]
    MissingCredential { provider: &'static str },
    #[error("request to {provider} failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{provider} returned status {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },
    #[error("{provider} response did not contain generated text")]
    MalformedResponse { provider: &'static str },
}

/// A remote text-completion service reached with a system and a user prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Display name used in logs and in the "not configured" apology.
    fn provider(&self) -> &'static str;

    fn is_configured(&self) -> bool;

    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, BackendError>;
}

/// Calls the backend and folds any failure into an apology the user can read.
/// Never returns an error: callers treat the text like any other answer.
pub async fn respond(
    backend: &dyn TextGenerator,
    prompt: &PromptPair,
    locale: Locale,
    metrics: &AppMetrics,
) -> String {
    metrics.inc_remote_call();

    match backend.generate(&prompt.system, &prompt.user).await {
        Ok(text) => text,
        Err(error) => {
            metrics.inc_backend_failure();
            warn!(provider = backend.provider(), error = %error, "remote generation failed");
            apology_for(&error, locale)
        }
    }
}

pub fn apology_for(error: &BackendError, locale: Locale) -> String {
    match (error, locale) {
        (BackendError::MissingCredential { provider }, Locale::Es) => format!(
            "Lo siento, no estoy configurado correctamente. Falta la clave de API de {provider}."
        ),
        (BackendError::MissingCredential { provider }, Locale::En) => format!(
            "Sorry, I am not configured correctly. The {provider} API key is missing."
        ),
        (_, Locale::Es) => "Lo siento, no pude generar una respuesta en este momento.".to_string(),
        (_, Locale::En) => "Sorry, I could not generate an answer right now.".to_string(),
    }
}
