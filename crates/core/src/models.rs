use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    Es,
    En,
}

impl Locale {
    pub fn from_optional_str(value: Option<&str>) -> Option<Self> {
        match value.map(|v| v.trim().to_lowercase()) {
            Some(v) if v == "es" || v == "es-es" || v == "es-mx" || v == "spanish" => Some(Self::Es),
            Some(v) if v == "en" || v == "en-us" || v == "en-gb" || v == "english" => Some(Self::En),
            _ => None,
        }
    }

    pub fn as_code(self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::En => "en",
        }
    }
}

/// Purpose of a question as decided by the classifier backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Climate,
    Costs,
    Places,
    Itinerary,
    Other,
}

impl Category {
    /// Matches a normalized classifier label against the known keys verbatim.
    /// Anything that is not exactly one of the keys is `Other`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "clima" | "climate" => Self::Climate,
            "costos" | "costs" => Self::Costs,
            "lugares" | "places" => Self::Places,
            "itinerario" | "itinerary" => Self::Itinerary,
            _ => Self::Other,
        }
    }

    pub fn as_key(self) -> &'static str {
        match self {
            Self::Climate => "clima",
            Self::Costs => "costos",
            Self::Places => "lugares",
            Self::Itinerary => "itinerario",
            Self::Other => "otro",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    #[serde(rename = "familiar")]
    Family,
    #[serde(rename = "aventura")]
    Adventure,
    #[serde(rename = "romántico")]
    Romantic,
    #[serde(rename = "cultural")]
    Cultural,
    #[serde(rename = "gastronómico")]
    Gastronomic,
    #[serde(rename = "naturaleza")]
    Nature,
    #[serde(rename = "low-cost")]
    LowCost,
    #[serde(rename = "general")]
    General,
}

impl Theme {
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::Family => "familiar",
            Self::Adventure => "aventura",
            Self::Romantic => "romántico",
            Self::Cultural => "cultural",
            Self::Gastronomic => "gastronómico",
            Self::Nature => "naturaleza",
            Self::LowCost => "low-cost",
            Self::General => "general",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

/// Parameters an agent derives from the question text. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedParameters {
    pub destination: String,
    pub days: u32,
    pub theme: Theme,
}

impl ExtractedParameters {
    pub fn from_question(question: &str) -> Self {
        Self {
            destination: crate::extract::extract_destination(question),
            days: crate::extract::extract_days(question),
            theme: crate::extract::extract_theme(question),
        }
    }
}

/// Value threaded through one pipeline run.
///
/// Transitions consume the state and return a new one. Once the state is
/// blocked its answer is frozen: `with_answer` and `with_intent` return it
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineState {
    question: String,
    answer: String,
    blocked: bool,
    intent: String,
}

impl PipelineState {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: String::new(),
            blocked: false,
            intent: String::new(),
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    pub fn intent(&self) -> &str {
        &self.intent
    }

    pub fn into_answer(self) -> String {
        self.answer
    }

    pub fn blocked_with(self, message: impl Into<String>) -> Self {
        if self.blocked {
            return self;
        }
        Self {
            answer: message.into(),
            blocked: true,
            ..self
        }
    }

    pub fn with_intent(self, intent: impl Into<String>) -> Self {
        if self.blocked {
            return self;
        }
        Self {
            intent: intent.into(),
            ..self
        }
    }

    pub fn with_answer(self, answer: impl Into<String>) -> Self {
        if self.blocked {
            return self;
        }
        Self {
            answer: answer.into(),
            ..self
        }
    }
}
