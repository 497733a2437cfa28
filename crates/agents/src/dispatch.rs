use std::sync::Arc;

use ruta_core::prompts::{
    clarification, climate_prompt, costs_prompt, fallback_prompt, itinerary_prompt, places_prompt,
};
use ruta_core::{
    extract_days, extract_destination, extract_theme, Category, Locale, PipelineState, PromptPair,
};
use ruta_observability::AppMetrics;
use tracing::debug;

use crate::backend::{respond, TextGenerator};

/// Routes a classified question to its agent. Specialized agents use the
/// agent backend; the generic fallback shares the classifier's backend.
#[derive(Clone)]
pub struct AgentDispatcher {
    agent_backend: Arc<dyn TextGenerator>,
    fallback_backend: Arc<dyn TextGenerator>,
    metrics: Arc<AppMetrics>,
}

impl AgentDispatcher {
    pub fn new(
        agent_backend: Arc<dyn TextGenerator>,
        fallback_backend: Arc<dyn TextGenerator>,
        metrics: Arc<AppMetrics>,
    ) -> Self {
        Self {
            agent_backend,
            fallback_backend,
            metrics,
        }
    }

    pub async fn dispatch(
        &self,
        state: PipelineState,
        category: Category,
        locale: Locale,
    ) -> PipelineState {
        match category {
            Category::Climate => self.climate(state, locale).await,
            Category::Costs => self.costs(state, locale).await,
            Category::Places => self.places(state, locale).await,
            Category::Itinerary => self.itinerary(state, locale).await,
            Category::Other => self.fallback(state, locale).await,
        }
    }

    pub async fn climate(&self, state: PipelineState, locale: Locale) -> PipelineState {
        let destination = extract_destination(state.question());
        if destination.is_empty() {
            return state.with_answer(clarification(Category::Climate, locale));
        }
        let prompt = climate_prompt(&destination, locale);
        self.generate_into(state, &prompt, locale).await
    }

    pub async fn costs(&self, state: PipelineState, locale: Locale) -> PipelineState {
        let destination = extract_destination(state.question());
        if destination.is_empty() {
            return state.with_answer(clarification(Category::Costs, locale));
        }
        let prompt = costs_prompt(&destination, locale);
        self.generate_into(state, &prompt, locale).await
    }

    pub async fn places(&self, state: PipelineState, locale: Locale) -> PipelineState {
        let destination = extract_destination(state.question());
        if destination.is_empty() {
            return state.with_answer(clarification(Category::Places, locale));
        }
        let theme = extract_theme(state.question());
        let prompt = places_prompt(&destination, theme, locale);
        self.generate_into(state, &prompt, locale).await
    }

    pub async fn itinerary(&self, state: PipelineState, locale: Locale) -> PipelineState {
        let destination = extract_destination(state.question());
        if destination.is_empty() {
            return state.with_answer(clarification(Category::Itinerary, locale));
        }
        let days = extract_days(state.question());
        let theme = extract_theme(state.question());
        debug!(days, theme = theme.as_tag(), "building itinerary prompt");
        let prompt = itinerary_prompt(&destination, days, theme, locale);
        self.generate_into(state, &prompt, locale).await
    }

    /// No extraction: the question goes out exactly as the user wrote it.
    pub async fn fallback(&self, state: PipelineState, locale: Locale) -> PipelineState {
        let prompt = fallback_prompt(state.question(), locale);
        let answer = respond(self.fallback_backend.as_ref(), &prompt, locale, &self.metrics).await;
        state.with_answer(answer)
    }

    async fn generate_into(
        &self,
        state: PipelineState,
        prompt: &PromptPair,
        locale: Locale,
    ) -> PipelineState {
        let answer = respond(self.agent_backend.as_ref(), prompt, locale, &self.metrics).await;
        state.with_answer(answer)
    }
}
