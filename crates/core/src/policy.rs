use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::intent::detect_locale;
use crate::models::{Locale, PipelineState};

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}").expect("valid email regex")
});

static CONTACT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\d{8,}").expect("valid contact number regex"));

static DEFAULT_ENGINE: Lazy<PolicyEngine> = Lazy::new(PolicyEngine::default);

const FORBIDDEN_TERMS: &[&str] = &[
    "odio",
    "odiar",
    "violencia",
    "insulto",
    "insultar",
    "matar",
    "robar",
    "pegar",
    "agredir",
    "golpear",
    "lastimar",
    "amenazar",
    "dañar",
    "abusar",
    "secuestrar",
    "secuestro",
    "torturar",
    "herir",
    "discriminar",
    "humillar",
    "intimidar",
    "vengar",
    "sabotear",
    "maltratar",
    "violar",
    "corromper",
    "estafar",
    "traicionar",
    "despreciar",
    "destruir",
    "oprimir",
    "castigar",
    "maldecir",
    "provocar",
    "burlar",
    "manipular",
    "saquear",
    "extorsionar",
    "asesinar",
    "hatred",
    "violence",
    "insult",
    "murder",
    "kidnap",
    "torture",
    "assault",
    "extort",
    "sabotage",
    "humiliate",
    "intimidate",
    "threaten",
    "blackmail",
    "kill someone",
];

const PLAGIARISM_TERMS: &[&str] = &[
    "plagio",
    "descargar libro gratis",
    "bypass",
    "paywall",
    "plagiarism",
    "pirated",
    "download free book",
];

const MEDICAL_LEGAL_TERMS: &[&str] = &[
    "medicina",
    "tratamiento",
    "receta",
    "abogado",
    "demanda",
    "medicine",
    "treatment",
    "prescription",
    "lawyer",
    "lawsuit",
];

/// Term tables shared by the question and answer guardrails.
#[derive(Debug, Clone)]
pub struct ContentPolicy {
    pub forbidden_terms: Vec<String>,
    pub plagiarism_terms: Vec<String>,
    pub medical_legal_terms: Vec<String>,
}

impl Default for ContentPolicy {
    fn default() -> Self {
        Self {
            forbidden_terms: to_owned_terms(FORBIDDEN_TERMS),
            plagiarism_terms: to_owned_terms(PLAGIARISM_TERMS),
            medical_legal_terms: to_owned_terms(MEDICAL_LEGAL_TERMS),
        }
    }
}

/// Rules that apply to both questions and generated answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentViolation {
    ForbiddenTerm,
    EmailAddress,
    ContactNumber,
}

/// Why a question was refused, in rule order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputRejection {
    EmptyQuestion,
    InappropriateContent,
    EmailAddress,
    ContactData,
    TooShort,
    Plagiarism,
    MedicalOrLegal,
}

impl InputRejection {
    pub fn message(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::EmptyQuestion, Locale::Es) => "No hay ninguna pregunta de entrada.",
            (Self::EmptyQuestion, Locale::En) => "No question provided.",
            (Self::InappropriateContent, Locale::Es) => "Contenido inapropiado detectado.",
            (Self::InappropriateContent, Locale::En) => "Inappropriate content detected.",
            (Self::EmailAddress, Locale::Es) => "No puedo procesar correos electrónicos.",
            (Self::EmailAddress, Locale::En) => "I cannot process email addresses.",
            (Self::ContactData, Locale::Es) => "No puedo mostrar datos de contacto.",
            (Self::ContactData, Locale::En) => "I cannot show contact data.",
            (Self::TooShort, Locale::Es) => "Pregunta demasiado corta para recomendar algo.",
            (Self::TooShort, Locale::En) => "Question too short to recommend anything.",
            (Self::Plagiarism, Locale::Es) => {
                "No puedo ayudar con tareas de plagio o acceso no autorizado."
            }
            (Self::Plagiarism, Locale::En) => {
                "I cannot help with plagiarism or unauthorized access."
            }
            (Self::MedicalOrLegal, Locale::Es) => {
                "Este sistema no está diseñado para dar consejos médicos o legales."
            }
            (Self::MedicalOrLegal, Locale::En) => {
                "This system is not designed to give medical or legal advice."
            }
        }
    }
}

impl From<ContentViolation> for InputRejection {
    fn from(violation: ContentViolation) -> Self {
        match violation {
            ContentViolation::ForbiddenTerm => Self::InappropriateContent,
            ContentViolation::EmailAddress => Self::EmailAddress,
            ContentViolation::ContactNumber => Self::ContactData,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PolicyEngine {
    policy: ContentPolicy,
}

impl Default for PolicyEngine {
    fn default() -> Self {
        Self::new(ContentPolicy::default())
    }
}

impl PolicyEngine {
    pub fn new(policy: ContentPolicy) -> Self {
        Self { policy }
    }

    /// Runs the question rules in order and reports the first one that fires.
    pub fn evaluate_question(&self, question: &str) -> Option<InputRejection> {
        let lower = question.to_lowercase();
        let lower = lower.trim();

        if lower.is_empty() {
            return Some(InputRejection::EmptyQuestion);
        }

        if let Some(violation) = self.content_violation(lower) {
            return Some(violation.into());
        }

        if lower.split_whitespace().count() < 2 {
            return Some(InputRejection::TooShort);
        }

        if contains_any(lower, &self.policy.plagiarism_terms) {
            return Some(InputRejection::Plagiarism);
        }

        if contains_any(lower, &self.policy.medical_legal_terms) {
            return Some(InputRejection::MedicalOrLegal);
        }

        None
    }

    pub fn guardrails(&self, state: PipelineState) -> PipelineState {
        self.screen(state).0
    }

    /// Same as `guardrails`, also reporting which rule blocked the question.
    pub fn screen(&self, state: PipelineState) -> (PipelineState, Option<InputRejection>) {
        match self.evaluate_question(state.question()) {
            Some(rejection) => {
                let locale = detect_locale(None, state.question());
                (state.blocked_with(rejection.message(locale)), Some(rejection))
            }
            None => (state, None),
        }
    }

    /// Only the content rules are applied to answers; the empty, too-short,
    /// plagiarism and medical/legal rules describe questions.
    pub fn validate_answer(&self, answer: &str) -> bool {
        self.content_violation(&answer.to_lowercase()).is_none()
    }

    pub fn output_rejection_message(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::Es => "Lo siento, no puedo proporcionar esa información.",
            Locale::En => "Sorry, I cannot provide that information.",
        }
    }

    fn content_violation(&self, lower: &str) -> Option<ContentViolation> {
        if contains_any(lower, &self.policy.forbidden_terms) {
            return Some(ContentViolation::ForbiddenTerm);
        }
        if EMAIL_PATTERN.is_match(lower) {
            return Some(ContentViolation::EmailAddress);
        }
        if CONTACT_PATTERN.is_match(lower) {
            return Some(ContentViolation::ContactNumber);
        }
        None
    }
}

pub fn guardrails(state: PipelineState) -> PipelineState {
    DEFAULT_ENGINE.guardrails(state)
}

pub fn validate_answer(answer: &str) -> bool {
    DEFAULT_ENGINE.validate_answer(answer)
}

fn contains_any(input: &str, needles: &[String]) -> bool {
    needles.iter().any(|needle| input.contains(needle.as_str()))
}

fn to_owned_terms(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|term| term.to_string()).collect()
}
