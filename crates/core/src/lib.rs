pub mod extract;
pub mod intent;
pub mod models;
pub mod policy;
pub mod prompts;

pub use extract::{extract_days, extract_destination, extract_theme};
pub use intent::{detect_locale, Classification, CLASSIFIER_SYSTEM_PROMPT};
pub use models::*;
pub use policy::{
    guardrails, validate_answer, ContentPolicy, ContentViolation, InputRejection, PolicyEngine,
};
pub use prompts::PromptPair;
