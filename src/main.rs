use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, EnvFilter};

use crate::secrets::SECRET_MANAGER;
mod controllers;
mod db;
mod errors;
mod memory;
mod models;
mod routers;
mod secrets;
use controllers::SongController;
use db::{Database, SongStore};
use memory::MemoryStore;

/// Connects before anything listens; a store we cannot reach is fatal.
async fn connect_store() -> anyhow::Result<Arc<dyn SongStore>> {
    if SECRET_MANAGER.get("STORE") == "memory" {
        info!("🧪 Using in-memory song store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let database = Database::connect(&SECRET_MANAGER.get("MONGODB_URI"))
        .await
        .context("Failed to connect to database")?;
    info!("📊 Database connection ready");
    Ok(Arc::new(database))
}

async fn run() -> anyhow::Result<()> {
    let store = connect_store().await?;

    let port = SECRET_MANAGER.get("PORT");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;

    let public_dir = SECRET_MANAGER.get("PUBLIC_DIR");
    let app = routers::app(SongController::new(store), &public_dir);

    info!("🎧 App now running on port {}", listener.local_addr()?.port());
    info!("📡 Song endpoints: /songs, /songs/{{id}}, /songs/{{id}}/file, /demosongs");
    info!("🗂️ Static files from {}", public_dir);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_target(false)
        .init();

    if let Err(e) = run().await {
        error!("❌ {:#}", e);
        std::process::exit(1);
    }
}
