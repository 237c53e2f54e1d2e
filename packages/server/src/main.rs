use std::sync::Arc;

use anyhow::Context;
use common::storage::FilesystemDocumentStore;
use tracing::{Level, info};

use server::config::AppConfig;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load().context("Failed to load config")?;

    let db = server::database::init_db(&config.database.url)
        .await
        .context("Failed to initialize database")?;

    let documents = Arc::new(
        FilesystemDocumentStore::new(
            config.storage.uploads_dir.clone(),
            config.storage.max_upload_size,
        )
        .await
        .context("Failed to initialize uploads directory")?,
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState {
        db,
        documents,
        config,
    };
    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
