#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ruta_agents::{BackendError, Pipeline, TextGenerator};
use ruta_observability::AppMetrics;

/// Deterministic backend: always the same reply, or a missing credential.
pub struct ScriptedBackend {
    reply: Option<String>,
    calls: AtomicUsize,
    user_prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            calls: AtomicUsize::new(0),
            user_prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn unconfigured() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: AtomicUsize::new(0),
            user_prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn user_prompts(&self) -> Vec<String> {
        self.user_prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedBackend {
    fn provider(&self) -> &'static str {
        "Groq"
    }

    fn is_configured(&self) -> bool {
        self.reply.is_some()
    }

    async fn generate(&self, _system: &str, user: &str) -> Result<String, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.user_prompts.lock().unwrap().push(user.to_string());
        self.reply
            .clone()
            .ok_or(BackendError::MissingCredential { provider: "Groq" })
    }
}

pub fn pipeline(classifier: &Arc<ScriptedBackend>, agent: &Arc<ScriptedBackend>) -> Pipeline {
    Pipeline::new(classifier.clone(), agent.clone(), AppMetrics::shared())
}

pub fn static_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../static")
}
