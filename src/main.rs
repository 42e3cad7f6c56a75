use anyhow::Context;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use chat_relay::{config::ServerConfig, routes, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_relay=info,tower_http=info".into()),
        )
        .init();

    let config = ServerConfig::from_env().context("invalid configuration")?;
    info!(port = config.port, chat = ?config.chat, "starting chat relay");

    if config.chat.usable_api_key().is_none() {
        warn!(
            "{} is not set; chat requests will return setup instructions",
            config.chat.provider.key_var()
        );
    }

    let state = AppState::from_config(config.chat)
        .context("failed to build provider client")?
        .shared();

    let cors = CorsLayer::very_permissive();

    let app = routes::create_router().with_state(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;

    info!("chat relay listening on http://localhost:{}", config.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("chat relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
