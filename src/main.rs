use std::sync::Arc;

mod admin;
mod app;
mod auth;
mod chat;
mod config;
mod db;
mod dto;
mod error;
mod resources;
mod state;


use crate::{config::AppConfig, db::PgDatabase, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "campusbot=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    let db = Arc::new(PgDatabase::connect(&config).await?);

    if let Err(e) = db.migrate().await {
        tracing::warn!(error = %e, "migration failed; continuing");
    }

    let app_state = AppState::init(config, db.clone())?;
    let app = app::build_app(app_state);

    app::serve(app).await?;

    db.close().await;
    tracing::info!("database pool closed");
    Ok(())
}
