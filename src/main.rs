//! Server binary: reads settings, opens the document store, mounts every resource, serves until Ctrl-C.

use social_api::{app, connect, ensure_collections, load_registry, AppState, Settings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("social_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let registry = load_registry(settings.rules_path.as_deref()).await?;

    let store = connect(&settings).await?;
    ensure_collections(store.as_ref(), registry.collections()).await?;

    let state = AppState::new(store.clone(), registry);
    let router = app(state, settings.body_limit);

    let listener = TcpListener::bind(settings.listen_addr()?).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
