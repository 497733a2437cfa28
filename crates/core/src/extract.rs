use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Theme;

const MAX_TRIP_DAYS: u32 = 14;
const DEFAULT_TRIP_DAYS: u32 = 3;

// Tried in order; the first rule with a match wins.
static DESTINATION_RULES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(?:en|a|para|hacia|de)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)",
        r"(?i)(?:viajar|visitar|conocer|ir|ver)\s+(?:a|en)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)",
        r"(?i)(?:qué\s+hay\s+en|qué\s+hacer\s+en|qué\s+ver\s+en)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)",
        r"(?i)\b(?:in|to|for|visit|visiting)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid destination regex"))
    .collect()
});

static CAPITALIZED_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][a-z]+\b").expect("valid capitalized word regex"));

static DAY_COUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([0-9]+)\s+(?:d[ií]as?|days?)").expect("valid day count regex")
});

// Priority order matters: the first set with a hit decides the theme.
const THEME_KEYWORDS: &[(Theme, &[&str])] = &[
    (
        Theme::Family,
        &[
            "familiar", "niños", "niñas", "niño", "niña", "hijos", "hijas", "pequeños", "family",
            "kids", "children",
        ],
    ),
    (
        Theme::Adventure,
        &[
            "aventura",
            "aventurero",
            "extremo",
            "deportes extremos",
            "adventure",
            "extreme sports",
        ],
    ),
    (
        Theme::Romantic,
        &[
            "romántico",
            "romantico",
            "pareja",
            "luna de miel",
            "aniversario",
            "romantic",
            "honeymoon",
            "anniversary",
        ],
    ),
    (
        Theme::Cultural,
        &[
            "cultural",
            "cultura",
            "museos",
            "historia",
            "histórico",
            "tradiciones",
            "culture",
            "museum",
            "history",
            "historic",
        ],
    ),
    (
        Theme::Gastronomic,
        &[
            "gastronomía",
            "gastronomia",
            "comida",
            "restaurantes",
            "platos típicos",
            "food",
            "restaurant",
            "cuisine",
        ],
    ),
    (
        Theme::Nature,
        &[
            "naturaleza",
            "parques",
            "montaña",
            "playa",
            "selva",
            "bosque",
            "cataratas",
            "nature",
            "national park",
            "mountain",
            "beach",
            "jungle",
            "forest",
            "waterfall",
        ],
    ),
    (
        Theme::LowCost,
        &[
            "económico",
            "económica",
            "barato",
            "barata",
            "low cost",
            "bajo presupuesto",
            "cheap",
            "budget",
        ],
    ),
];

/// Best-effort destination name from a free-text question.
///
/// Rules match case-insensitively, so the first rule can swallow ordinary
/// lower-case words that follow a preposition (`"clima en Lima"` yields
/// `"en Lima"`). The captured text keeps its original casing. When no rule
/// matches, every capitalized word is joined with spaces.
pub fn extract_destination(text: &str) -> String {
    for rule in DESTINATION_RULES.iter() {
        if let Some(captures) = rule.captures(text) {
            if let Some(phrase) = captures.get(1) {
                return phrase.as_str().trim().to_string();
            }
        }
    }

    CAPITALIZED_WORD
        .find_iter(text)
        .map(|word| word.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn extract_days(text: &str) -> u32 {
    let Some(digits) = DAY_COUNT
        .captures(text)
        .and_then(|captures| captures.get(1))
    else {
        return DEFAULT_TRIP_DAYS;
    };

    // A run too long for u32 is still "more than the ceiling".
    digits
        .as_str()
        .parse::<u32>()
        .map(|days| days.min(MAX_TRIP_DAYS))
        .unwrap_or(MAX_TRIP_DAYS)
}

pub fn extract_theme(text: &str) -> Theme {
    let lower = text.to_lowercase();
    THEME_KEYWORDS
        .iter()
        .find(|(_, keywords)| contains_any(&lower, keywords))
        .map(|(theme, _)| *theme)
        .unwrap_or(Theme::General)
}

fn contains_any(input: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| input.contains(needle))
}
