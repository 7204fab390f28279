use std::sync::Arc;

use anyhow::Context;
use folio::app::{router, AppState};
use folio::content::service::ContentService;
use folio::storage::client::{ContentStore, FsContentStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (_cli, settings) = folio::config::load_with_cli().context("Failed to load configuration")?;

    folio::telemetry::init_tracing(&settings.log);

    tracing::info!("Starting Folio server...");

    let store: Arc<dyn ContentStore> = Arc::new(FsContentStore::new(&settings.content_dir));
    tracing::info!(
        content_dir = %settings.content_dir.display(),
        cache = ?settings.content.cache_policy,
        "Content store initialized"
    );

    let content = Arc::new(ContentService::new(store, settings.content.clone()));

    // Surface unreadable content directories at startup instead of on first request
    match content.collection().await {
        Ok(collection) => tracing::info!("Indexed {} posts", collection.len()),
        Err(e) => tracing::warn!("Initial index build failed: {}", e),
    }

    let app = router(AppState {
        content,
        api: settings.api.clone(),
    });

    let addr = settings.server.addr;
    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
