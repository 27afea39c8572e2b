mod config;
mod handlers;
mod models;
mod server;
mod services;

use anyhow::{Context, Result};
use std::sync::Arc;

use config::Config;
use handlers::MealAnalyzer;
use services::{CompletionService, GroqService};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    // Initialize logger
    env_logger::init();

    log::info!("🚀 Starting Meal Analysis Service...");

    let groq = Arc::new(GroqService::new(
        config.groq_api_key.clone(),
        config.model.clone(),
        config.base_url.clone(),
    ));
    log::info!("✅ Groq service initialized with model: {}", groq.model());

    let analyzer = Arc::new(MealAnalyzer::new(
        groq as Arc<dyn CompletionService>,
        config.timeout(),
    ));

    if let Some(dish) = config.dish.as_deref() {
        let outcome = analyzer.analyze_meal(dish).await?;
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    let app = server::create_router(analyzer);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    log::info!("🌐 HTTP server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    log::info!("🛑 Shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("❌ Failed to listen for Ctrl+C: {}", e);
    }
}
