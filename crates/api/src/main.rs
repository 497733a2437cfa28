use std::env;

use anyhow::Result;
use ruta_api::build_app_from_env;
use ruta_observability::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing("ruta_api");

    let bind = env::var("RUTA_BIND").unwrap_or_else(|_| {
        let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
        format!("0.0.0.0:{port}")
    });

    let app = build_app_from_env()?;

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!(bind = %bind, "ruta api started");

    axum::serve(listener, app).await?;
    Ok(())
}
