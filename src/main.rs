use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use iptvusca_site::config::Config;
use iptvusca_site::db::AppState;
use iptvusca_site::handlers;

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    if config.admin_password_is_default {
        tracing::warn!("ADMIN_PASSWORD is not set; using the built-in default password");
    }
    if !config.require_admin_token {
        tracing::warn!(
            "Settings writes are not token-checked; set REQUIRE_ADMIN_TOKEN=true to enforce"
        );
    }

    let state = AppState::from_config(&config)?;
    tracing::info!(
        "Settings storage: {} (merge base: {})",
        state.settings.backend_name(),
        state.settings.merge_base().as_ref()
    );

    let app = handlers::router(state);

    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
