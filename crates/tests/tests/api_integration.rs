mod support;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use ruta_agents::BackendSettings;
use ruta_api::{build_app, build_router, ApiState};
use ruta_observability::AppMetrics;
use serde_json::json;
use support::{static_root, ScriptedBackend};
use tower::ServiceExt;

fn scripted_app(classifier_reply: &str, agent_reply: &str) -> Router {
    let metrics = AppMetrics::shared();
    let pipeline = ruta_agents::Pipeline::new(
        ScriptedBackend::replying(classifier_reply),
        ScriptedBackend::replying(agent_reply),
        metrics.clone(),
    );

    build_router(ApiState {
        pipeline: Arc::new(pipeline),
        metrics,
        backends: BackendSettings::default().status(),
        static_dir: static_root(),
    })
}

fn ask_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/ask")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn ask_returns_answer() {
    let app = scripted_app("clima", "En Lima julio es fresco y nublado.");

    let response = app
        .oneshot(ask_request(
            json!({ "question": "¿Qué clima hace en julio? Quiero ir a Lima" }).to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = json_body(response).await;
    assert_eq!(parsed["answer"], "En Lima julio es fresco y nublado.");
}

#[tokio::test]
async fn blocked_question_is_still_a_successful_response() {
    let app = scripted_app("clima", "nunca");

    let response = app
        .oneshot(ask_request(json!({ "question": "Paris" }).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = json_body(response).await;
    assert_eq!(parsed["answer"], "Pregunta demasiado corta para recomendar algo.");
}

#[tokio::test]
async fn missing_question_field_is_bad_request() {
    let app = scripted_app("clima", "nunca");

    let response = app
        .oneshot(ask_request(json!({ "pregunta": "hola" }).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let parsed = json_body(response).await;
    assert_eq!(parsed, json!({ "error": "Se requiere una pregunta" }));
}

#[tokio::test]
async fn invalid_json_is_bad_request() {
    let app = scripted_app("clima", "nunca");

    let response = app.oneshot(ask_request("{not json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let parsed = json_body(response).await;
    assert_eq!(parsed["error"], "Se requiere una pregunta");
}

#[tokio::test]
async fn oversized_body_is_payload_too_large() {
    let app = scripted_app("clima", "nunca");

    let response = app
        .oneshot(ask_request(
            json!({ "question": "hola ".repeat(20_000) }).to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn responses_carry_generated_request_id() {
    let app = scripted_app("clima", "nunca");

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("request id should be echoed");
    assert!(!request_id.is_empty());
}

#[tokio::test]
async fn health_reports_metrics_and_backends() {
    let app = scripted_app("clima", "nunca");

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = json_body(response).await;
    assert_eq!(parsed["status"], "ok");
    assert_eq!(parsed["metrics"]["requests_total"], 0);
    assert_eq!(parsed["backends"]["classifier_configured"], false);
    assert_eq!(parsed["backends"]["agent_provider"], "groq");
}

#[tokio::test]
async fn root_serves_frontend() {
    let app = scripted_app("clima", "nunca");

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&body).contains("/api/ask"));
}

#[tokio::test]
async fn app_without_credentials_answers_with_apology() {
    let app = build_app(&BackendSettings::default(), static_root()).expect("app should build");

    let response = app
        .oneshot(ask_request(
            json!({ "question": "Quiero ir a Lima" }).to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = json_body(response).await;
    assert_eq!(
        parsed["answer"],
        "Lo siento, no estoy configurado correctamente. Falta la clave de API de Groq."
    );
}
