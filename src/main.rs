mod api;
mod config;
mod ingest;
mod sentiment;

use crate::api::AppState;
use crate::config::AppConfig;
use crate::sentiment::ChatCompletionClient;
use anyhow::Context;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up GROQ_API_KEY and friends from a local .env, if any
    let dotenv_path = dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("🚀 Starting Review Sentiment API Server");
    if let Some(path) = dotenv_path {
        info!("   - Environment loaded from {}", path.display());
    }

    // Load configuration
    let config = AppConfig::load()?;
    info!("📋 Configuration loaded");
    info!("   - Provider: {}", config.llm.base_url);
    info!("   - Model: {}", config.llm.model);
    info!("   - Server: {}:{}", config.server.host, config.server.port);

    if config.llm.api_key.is_none() {
        warn!(
            "⚠️  {} is not set; /read_reviews will answer 503 until it is",
            config.llm.api_key_env
        );
    }

    // Initialize sentiment client
    let model = Arc::new(
        ChatCompletionClient::new(&config.llm).context("Failed to build HTTP client")?,
    );
    info!("✅ Sentiment client ready");

    let addr = config.bind_addr();

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        model,
    };

    let app = api::app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📡 Available endpoints:");
    info!("   GET  /                 - Usage");
    info!("   GET  /health           - Health check");
    info!("   POST /read_reviews     - Average sentiment of uploaded reviews");
    info!("");
    info!("✨ Server is ready to accept requests!");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutting down gracefully");

    Ok(())
}

/// Graceful shutdown handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutdown signal received");
}
