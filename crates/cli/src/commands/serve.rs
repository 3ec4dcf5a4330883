use anyhow::Result;
use recipe_cache_http::{AppState, create_router};
use recipe_cache_service::RecipeService;
use recipe_cache_upstream::SpoonacularClient;
use std::sync::Arc;

use crate::{cors_origins, open_storage, upstream_config};

pub(crate) async fn run(port: u16, host: String) -> Result<()> {
    let upstream = SpoonacularClient::new(upstream_config()?)?;
    tracing::info!(base_url = upstream.base_url(), "upstream configured");

    let storage = Arc::new(open_storage().await?);
    tracing::info!(backend = storage.kind(), "storage ready");

    let recipe_service = Arc::new(RecipeService::new(storage, Arc::new(upstream)));
    let state = Arc::new(AppState { recipe_service });

    let origins = cors_origins();
    let router = create_router(state, &origins);
    let addr = format!("{host}:{port}");
    tracing::info!(%addr, cors_origins = ?origins, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
