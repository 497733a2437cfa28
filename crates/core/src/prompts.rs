use serde::Serialize;

use crate::models::{Category, Locale, Theme};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

pub fn disclaimer(locale: Locale) -> &'static str {
    match locale {
        Locale::Es => "ℹ Nota: Esta información es ficticia y solo con fines académicos.",
        Locale::En => "ℹ Note: This information is fictional and for academic purposes only.",
    }
}

/// Question asked back when an agent could not find a destination.
pub fn clarification(category: Category, locale: Locale) -> &'static str {
    match (category, locale) {
        (Category::Climate, Locale::Es) => {
            "¿Podrías decirme de qué lugar te gustaría saber el clima?"
        }
        (Category::Climate, Locale::En) => {
            "Could you tell me which place you would like to know the weather for?"
        }
        (Category::Costs, Locale::Es) => {
            "¿Podrías decirme de qué lugar te gustaría saber los costos?"
        }
        (Category::Costs, Locale::En) => {
            "Could you tell me which place you would like to know the costs for?"
        }
        (Category::Places, Locale::Es) => {
            "¿Podrías decirme de qué lugar te gustaría recomendaciones?"
        }
        (Category::Places, Locale::En) => {
            "Could you tell me which place you would like recommendations for?"
        }
        (Category::Itinerary | Category::Other, Locale::Es) => {
            "¿Podrías decirme para qué destino te gustaría un itinerario?"
        }
        (Category::Itinerary | Category::Other, Locale::En) => {
            "Could you tell me which destination you would like an itinerary for?"
        }
    }
}

pub fn climate_prompt(destination: &str, locale: Locale) -> PromptPair {
    let (system, user) = match locale {
        Locale::Es => (
            "Eres un asistente turístico especializado en información climática. \
             Proporciona información útil sobre el clima del destino, incluyendo temporadas, \
             temperaturas promedio, y recomendaciones de ropa.",
            format!("Proporciona información sobre el clima en {destination}."),
        ),
        Locale::En => (
            "You are a travel assistant specialized in climate information. \
             Give useful information about the destination's weather, including seasons, \
             average temperatures and clothing recommendations.",
            format!("Give information about the weather in {destination}."),
        ),
    };
    with_disclaimer(system, user, locale)
}

pub fn costs_prompt(destination: &str, locale: Locale) -> PromptPair {
    let (system, user) = match locale {
        Locale::Es => (
            "Eres un experto en viajes que proporciona estimaciones de costos. \
             Incluye rangos de precios para alojamiento, comida, transporte y actividades. \
             Sé claro que son estimaciones aproximadas.",
            format!("Proporciona estimaciones de costos para viajar a {destination}."),
        ),
        Locale::En => (
            "You are a travel expert who provides cost estimates. \
             Include price ranges for lodging, food, transport and activities. \
             Be clear that these are rough estimates.",
            format!("Give cost estimates for traveling to {destination}."),
        ),
    };
    with_disclaimer(system, user, locale)
}

pub fn places_prompt(destination: &str, theme: Theme, locale: Locale) -> PromptPair {
    let theme = theme.as_tag();
    let (system, user) = match locale {
        Locale::Es => (
            "Eres un guía turístico experto. Recomienda lugares interesantes para visitar, \
             incluyendo atracciones principales, lugares menos conocidos y consejos útiles. \
             Organiza la información de manera clara y atractiva.",
            format!("Recomienda lugares para visitar en {destination} con temática {theme}."),
        ),
        Locale::En => (
            "You are an expert tour guide. Recommend interesting places to visit, \
             including main attractions, lesser-known spots and useful tips. \
             Organize the information in a clear and appealing way.",
            format!("Recommend places to visit in {destination} with a {theme} theme."),
        ),
    };
    with_disclaimer(system, user, locale)
}

pub fn itinerary_prompt(destination: &str, days: u32, theme: Theme, locale: Locale) -> PromptPair {
    let theme = theme.as_tag();
    let (system, user) = match locale {
        Locale::Es => (
            "Eres un experto en planificación de viajes. Crea un itinerario detallado \
             que incluya actividades para cada día, recomendaciones de lugares para comer, \
             y consejos de transporte. Sé específico y realista con los tiempos.",
            format!("Crea un itinerario de {days} días en {destination} con temática {theme}."),
        ),
        Locale::En => (
            "You are a travel planning expert. Create a detailed itinerary \
             with activities for each day, recommendations of places to eat \
             and transport tips. Be specific and realistic with timing.",
            format!("Create a {days}-day itinerary in {destination} with a {theme} theme."),
        ),
    };
    with_disclaimer(system, user, locale)
}

/// Generic assistant prompt paired with the question exactly as received.
pub fn fallback_prompt(question: &str, locale: Locale) -> PromptPair {
    let system = match locale {
        Locale::Es => {
            "Eres un asistente turístico amable y servicial. Responde a la pregunta \
             del usuario de manera clara y concisa. Si no tienes suficiente información, \
             sé honesto y ofrece ayuda con lo que puedas."
        }
        Locale::En => {
            "You are a friendly and helpful travel assistant. Answer the user's question \
             clearly and concisely. If you do not have enough information, \
             be honest and offer help with what you can."
        }
    };
    PromptPair {
        system: system.to_string(),
        user: question.to_string(),
    }
}

fn with_disclaimer(system: &str, user: String, locale: Locale) -> PromptPair {
    PromptPair {
        system: system.to_string(),
        user: format!("{user} {}", disclaimer(locale)),
    }
}
