use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

use crate::models::{Category, Locale};

pub const CLASSIFIER_SYSTEM_PROMPT: &str = "Clasifica la intención de la pregunta del usuario en una de estas categorías:
- \"clima\": Preguntas sobre el clima o condiciones meteorológicas
- \"costos\": Consultas sobre precios, presupuestos o gastos
- \"lugares\": Búsqueda de puntos de interés o recomendaciones
- \"itinerario\": Solicitudes para crear planes de viaje o rutas
- \"otro\": Cualquier otra consulta que no entre en las categorías anteriores

Responde SOLO con la palabra clave de la categoría, sin comillas ni puntos.";

const SPANISH_MARKERS: &[&str] = &[
    "qué", "que", "cuál", "cual", "cuánto", "cuanto", "dónde", "donde", "cómo", "como", "el",
    "la", "los", "las", "en", "de", "del", "para", "por", "con", "un", "una", "es", "hay", "y",
    "mi", "quiero", "viaje", "viajar", "clima", "lugares", "días", "dias", "costos", "cuesta",
    "hace", "itinerario", "recomiéndame", "recomienda",
];

const ENGLISH_MARKERS: &[&str] = &[
    "what", "which", "how", "where", "the", "is", "are", "in", "to", "for", "with", "and", "of",
    "my", "i", "want", "trip", "travel", "weather", "places", "days", "day", "cost", "costs",
    "much", "plan", "visit", "should", "recommend",
];

/// Result of mapping the classifier's reply onto a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Reply text after lower-casing and trimming; kept as the state's intent.
    pub label: String,
    pub category: Category,
}

impl Classification {
    pub fn from_reply(reply: &str) -> Self {
        let label = normalize_label(reply);
        let category = Category::from_label(&label);
        Self { label, category }
    }
}

pub fn normalize_label(reply: &str) -> String {
    reply.to_lowercase().trim().to_string()
}

/// Picks the reply language for canned messages and prompts.
///
/// Spanish wins ties since it is the product's primary language.
pub fn detect_locale(explicit: Option<Locale>, text: &str) -> Locale {
    if let Some(locale) = explicit {
        return locale;
    }

    if text
        .chars()
        .any(|ch| matches!(ch, 'ñ' | 'Ñ' | '¿' | '¡'))
    {
        return Locale::Es;
    }

    let lower = text.to_lowercase();
    let mut spanish_hits = 0usize;
    let mut english_hits = 0usize;

    for word in lower.unicode_words() {
        if SPANISH_MARKERS.contains(&word) {
            spanish_hits += 1;
        }
        if ENGLISH_MARKERS.contains(&word) {
            english_hits += 1;
        }
        if word.chars().any(|ch| matches!(ch, 'á' | 'é' | 'í' | 'ó' | 'ú')) {
            spanish_hits += 1;
        }
    }

    if english_hits > spanish_hits {
        Locale::En
    } else {
        Locale::Es
    }
}
