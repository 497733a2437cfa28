use std::env;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_HUGGINGFACE_MODEL: &str = "meta-llama/Llama-2-7b-chat-hf";
pub const DEFAULT_HUGGINGFACE_BASE_URL: &str = "https://api-inference.huggingface.co";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown agent backend `{0}`, expected `groq` or `huggingface`")]
    UnknownProvider(String),
    #[error("invalid value `{value}` for {key}")]
    InvalidNumber { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentProvider {
    Groq,
    HuggingFace,
}

impl FromStr for AgentProvider {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "groq" => Ok(Self::Groq),
            "huggingface" | "hugging_face" | "hf" => Ok(Self::HuggingFace),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GroqSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GroqSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GROQ_MODEL.to_string(),
            base_url: DEFAULT_GROQ_BASE_URL.to_string(),
            temperature: 0.7,
            max_tokens: 1024,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HuggingFaceSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_new_tokens: u32,
}

impl Default for HuggingFaceSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_HUGGINGFACE_MODEL.to_string(),
            base_url: DEFAULT_HUGGINGFACE_BASE_URL.to_string(),
            temperature: 0.3,
            max_new_tokens: 300,
        }
    }
}

/// Everything needed to reach the remote generators. The classifier and the
/// generic fallback always go through Groq; the specialized agents use
/// `agent_provider`.
#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub groq: GroqSettings,
    pub huggingface: HuggingFaceSettings,
    pub agent_provider: AgentProvider,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            groq: GroqSettings::default(),
            huggingface: HuggingFaceSettings::default(),
            agent_provider: AgentProvider::Groq,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BackendStatus {
    pub classifier_provider: &'static str,
    pub classifier_model: String,
    pub classifier_configured: bool,
    pub agent_provider: AgentProvider,
    pub agent_model: String,
    pub agent_configured: bool,
}

impl BackendSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let groq = GroqSettings {
            api_key: non_empty("GROQ_API_KEY"),
            model: non_empty("GROQ_MODEL").unwrap_or(defaults.groq.model),
            base_url: non_empty("GROQ_BASE_URL").unwrap_or(defaults.groq.base_url),
            temperature: parse_or(
                "GROQ_TEMPERATURE",
                non_empty("GROQ_TEMPERATURE"),
                defaults.groq.temperature,
            )?,
            max_tokens: parse_or(
                "GROQ_MAX_TOKENS",
                non_empty("GROQ_MAX_TOKENS"),
                defaults.groq.max_tokens,
            )?,
        };

        let huggingface = HuggingFaceSettings {
            api_key: non_empty("HUGGINGFACE_TOKEN"),
            model: non_empty("HUGGINGFACE_MODEL").unwrap_or(defaults.huggingface.model),
            base_url: non_empty("HUGGINGFACE_BASE_URL").unwrap_or(defaults.huggingface.base_url),
            ..defaults.huggingface
        };

        let agent_provider = match non_empty("RUTA_AGENT_BACKEND") {
            Some(value) => value.parse()?,
            None => defaults.agent_provider,
        };

        Ok(Self {
            groq,
            huggingface,
            agent_provider,
        })
    }

    pub fn status(&self) -> BackendStatus {
        let (agent_model, agent_configured) = match self.agent_provider {
            AgentProvider::Groq => (self.groq.model.clone(), self.groq.api_key.is_some()),
            AgentProvider::HuggingFace => (
                self.huggingface.model.clone(),
                self.huggingface.api_key.is_some(),
            ),
        };

        BackendStatus {
            classifier_provider: "groq",
            classifier_model: self.groq.model.clone(),
            classifier_configured: self.groq.api_key.is_some(),
            agent_provider: self.agent_provider,
            agent_model,
            agent_configured,
        }
    }
}

fn parse_or<T: FromStr>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        Some(value) => value
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
        None => Ok(default),
    }
}
