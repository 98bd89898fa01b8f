mod app;
mod cli;
mod error;
mod handlers;
mod model;
mod state;

use crate::app::App;
use crate::cli::{StorageBackendArg, CLI};
use crate::state::AppState;
use anyhow::Context;
use clap::Parser;
use rangelink_lease::{CoordinatorSettings, NodeAllocator, RangeCoordinator};
use rangelink_shortener::ShortenerService;
use rangelink_storage::{InMemoryRepository, Repository, SqliteRepository};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();

    rangelink_telemetry::init(config.log_format.into())?;

    info!(
        listen_addr = %config.listen_addr,
        public_base_url = %config.public_base_url,
        start_id = config.start_id,
        block_size = config.block_size,
        storage_backend = %config.storage,
        "starting rangelink gateway"
    );

    let settings = CoordinatorSettings::builder()
        .start_id(config.start_id)
        .block_size(config.block_size)
        .build();
    let coordinator = Arc::new(RangeCoordinator::new(settings)?);
    let allocator = NodeAllocator::new(coordinator);

    match config.storage {
        StorageBackendArg::InMemory => {
            let service = ShortenerService::new(InMemoryRepository::new(), allocator);
            run_server(config.listen_addr, config.public_base_url, service).await?;
        }
        StorageBackendArg::Sqlite => {
            let sqlite_url = config
                .sqlite_url
                .context("sqlite url is required when storage backend is sqlite")?;
            let repository = SqliteRepository::connect(&sqlite_url).await?;
            let service = ShortenerService::new(repository, allocator);
            run_server(config.listen_addr, config.public_base_url, service).await?;
        }
    }

    info!("rangelink gateway stopped");
    Ok(())
}

async fn run_server<R: Repository>(
    listen_addr: SocketAddr,
    public_base_url: String,
    service: ShortenerService<R, NodeAllocator<RangeCoordinator>>,
) -> anyhow::Result<()> {
    let router = App::router(AppState::new(Arc::new(service), public_base_url));

    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("failed to bind {listen_addr}"))?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received");
}
