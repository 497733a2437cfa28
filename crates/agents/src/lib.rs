mod backend;
mod classifier;
mod config;
mod dispatch;
mod groq;
mod huggingface;

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::Client;
use ruta_core::{detect_locale, Category, InputRejection, Locale, PipelineState, PolicyEngine};
use ruta_observability::AppMetrics;
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

pub use backend::{apology_for, respond, BackendError, TextGenerator};
pub use classifier::IntentClassifier;
pub use config::{
    AgentProvider, BackendSettings, BackendStatus, ConfigError, GroqSettings,
    HuggingFaceSettings,
};
pub use dispatch::AgentDispatcher;
pub use groq::GroqBackend;
pub use huggingface::{llama_chat_prompt, HuggingFaceBackend};

/// How a pipeline run ended. Exactly one of these reaches the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Terminal {
    Blocked { rule: InputRejection },
    Answered { category: Category },
    OutputRejected { category: Category },
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineRun {
    pub state: PipelineState,
    pub locale: Locale,
    pub terminal: Terminal,
}

/// Guardrail, classification, dispatch and output check for one question.
///
/// Holds no per-request state, so one instance serves concurrent requests.
#[derive(Clone)]
pub struct Pipeline {
    policy_engine: PolicyEngine,
    classifier: IntentClassifier,
    dispatcher: AgentDispatcher,
    metrics: Arc<AppMetrics>,
}

impl Pipeline {
    pub fn new(
        classifier_backend: Arc<dyn TextGenerator>,
        agent_backend: Arc<dyn TextGenerator>,
        metrics: Arc<AppMetrics>,
    ) -> Self {
        Self {
            policy_engine: PolicyEngine::default(),
            classifier: IntentClassifier::new(classifier_backend.clone(), metrics.clone()),
            dispatcher: AgentDispatcher::new(agent_backend, classifier_backend, metrics.clone()),
            metrics,
        }
    }

    pub fn from_settings(settings: &BackendSettings, metrics: Arc<AppMetrics>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(6))
            .build()
            .context("failed to build HTTP client")?;

        let groq: Arc<dyn TextGenerator> =
            Arc::new(GroqBackend::new(client.clone(), settings.groq.clone()));
        let agent_backend: Arc<dyn TextGenerator> = match settings.agent_provider {
            AgentProvider::Groq => groq.clone(),
            AgentProvider::HuggingFace => Arc::new(HuggingFaceBackend::new(
                client,
                settings.huggingface.clone(),
            )),
        };

        if !groq.is_configured() {
            warn!("GROQ_API_KEY is not set; classifier answers will be apologies");
        }
        if !agent_backend.is_configured() {
            warn!(
                provider = agent_backend.provider(),
                "agent backend credential is not set"
            );
        }

        Ok(Self::new(groq, agent_backend, metrics))
    }

    pub async fn process(&self, question: &str) -> String {
        self.run(question).await.state.into_answer()
    }

    #[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
    pub async fn run(&self, question: &str) -> PipelineRun {
        let started = Instant::now();
        self.metrics.inc_request();
        let locale = detect_locale(None, question);

        let (state, rejection) = self.policy_engine.screen(PipelineState::new(question));
        if let Some(rule) = rejection {
            let elapsed = started.elapsed();
            self.metrics.inc_blocked();
            self.metrics.observe_latency(elapsed);
            info!(
                rule = ?rule,
                locale = locale.as_code(),
                latency_ms = elapsed.as_millis() as u64,
                "question blocked"
            );
            return PipelineRun {
                state,
                locale,
                terminal: Terminal::Blocked { rule },
            };
        }

        let classification = self.classifier.classify(state.question(), locale).await;
        let category = classification.category;
        let state = state.with_intent(classification.label);
        self.metrics.inc_dispatch(category.as_key());

        let state = self.dispatcher.dispatch(state, category, locale).await;

        let (state, terminal) = if self.policy_engine.validate_answer(state.answer()) {
            (state, Terminal::Answered { category })
        } else {
            self.metrics.inc_output_rejected();
            warn!(category = ?category, "generated answer failed content check");
            let message = self.policy_engine.output_rejection_message(locale);
            (
                state.with_answer(message),
                Terminal::OutputRejected { category },
            )
        };

        let elapsed = started.elapsed();
        self.metrics.observe_latency(elapsed);
        info!(
            intent = %state.intent(),
            category = ?category,
            locale = locale.as_code(),
            terminal = ?terminal,
            latency_ms = elapsed.as_millis() as u64,
            "question answered"
        );

        PipelineRun {
            state,
            locale,
            terminal,
        }
    }
}
