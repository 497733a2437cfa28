use std::sync::Arc;

use ruta_core::{Classification, Locale, PromptPair, CLASSIFIER_SYSTEM_PROMPT};
use ruta_observability::AppMetrics;
use tracing::debug;

use crate::backend::{respond, TextGenerator};

#[derive(Clone)]
pub struct IntentClassifier {
    backend: Arc<dyn TextGenerator>,
    metrics: Arc<AppMetrics>,
}

impl IntentClassifier {
    pub fn new(backend: Arc<dyn TextGenerator>, metrics: Arc<AppMetrics>) -> Self {
        Self { backend, metrics }
    }

    /// One remote call with the fixed taxonomy prompt. A failed call yields
    /// an apology, which simply classifies as `Other`.
    pub async fn classify(&self, question: &str, locale: Locale) -> Classification {
        let prompt = PromptPair {
            system: CLASSIFIER_SYSTEM_PROMPT.to_string(),
            user: question.to_string(),
        };
        let reply = respond(self.backend.as_ref(), &prompt, locale, &self.metrics).await;
        let classification = Classification::from_reply(&reply);
        debug!(
            label = %classification.label,
            category = ?classification.category,
            "question classified"
        );
        classification
    }
}
