//! Kanban board server.
//!
//! Opens the data directory, seeding any missing documents, and serves the
//! board API until interrupted.

use clap::Parser;
use eyre::WrapErr;
use kanban_sync::{
    board::{adapters::file::JsonFileBoardStore, services::BoardService},
    config::{Cli, ServerConfig},
    http, telemetry,
};
use mockable::DefaultClock;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let config = ServerConfig::from(Cli::parse());
    telemetry::init_tracing(&config.log_filter)?;

    let store = JsonFileBoardStore::open(&config.data_dir)
        .wrap_err_with(|| format!("opening data directory {}", config.data_dir))?;
    info!(
        data_dir = %store.root(),
        ordering = %config.ordering,
        "board store ready"
    );

    let service = BoardService::new(Arc::new(store), Arc::new(DefaultClock), config.ordering);
    let listener = TcpListener::bind(config.listen)
        .await
        .wrap_err_with(|| format!("binding {}", config.listen))?;
    http::serve(listener, http::router(service))
        .await
        .wrap_err("serving board API")
}
