use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use ruta_agents::{BackendSettings, BackendStatus, Pipeline};
use ruta_core::{AskRequest, AskResponse};
use ruta_observability::{AppMetrics, MetricsSnapshot};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

const MISSING_QUESTION_ERROR: &str = "Se requiere una pregunta";
const MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct ApiState {
    pub pipeline: Arc<Pipeline>,
    pub metrics: Arc<AppMetrics>,
    pub backends: BackendStatus,
    pub static_dir: PathBuf,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    metrics: MetricsSnapshot,
    backends: BackendStatus,
}

// `question` is optional here so a missing field maps to our own 400 body.
#[derive(Debug, Deserialize)]
struct AskPayload {
    question: Option<String>,
}

pub fn build_app_from_env() -> Result<Router> {
    let settings = BackendSettings::from_env().context("invalid backend configuration")?;
    let static_dir = env::var("RUTA_STATIC_DIR").unwrap_or_else(|_| "static".to_string());
    build_app(&settings, static_dir)
}

pub fn build_app(settings: &BackendSettings, static_dir: impl AsRef<Path>) -> Result<Router> {
    let metrics = AppMetrics::shared();
    let pipeline = Pipeline::from_settings(settings, metrics.clone())
        .context("failed to initialize pipeline")?;

    Ok(build_router(ApiState {
        pipeline: Arc::new(pipeline),
        metrics,
        backends: settings.status(),
        static_dir: static_dir.as_ref().to_path_buf(),
    }))
}

pub fn build_router(state: ApiState) -> Router {
    let static_files = ServeDir::new(&state.static_dir).append_index_html_on_directories(true);

    Router::new()
        .route("/health", get(health))
        .route("/api/ask", post(ask))
        .fallback_service(static_files)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        metrics: state.metrics.snapshot(),
        backends: state.backends.clone(),
    })
}

async fn ask(
    State(state): State<ApiState>,
    payload: Result<Json<AskPayload>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(AskPayload {
            question: Some(question),
        })) => AskRequest { question },
        Ok(_) => return missing_question(),
        Err(
            JsonRejection::JsonDataError(_)
            | JsonRejection::JsonSyntaxError(_)
            | JsonRejection::MissingJsonContentType(_),
        ) => return missing_question(),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected ask payload");
            return rejection.into_response();
        }
    };

    let answer = state.pipeline.process(&request.question).await;
    (StatusCode::OK, Json(AskResponse { answer })).into_response()
}

fn missing_question() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": MISSING_QUESTION_ERROR })),
    )
        .into_response()
}
