mod app;
mod cli;
mod error;
mod handlers;
mod model;
mod state;

use crate::app::App;
use crate::cli::{StorageBackendArg, CLI};
use crate::state::AppState;
use clap::Parser;
use encore_storage::{MemoryStore, MySqlStore};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = CLI::try_parse()?;

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        "starting booking gateway"
    );

    match config.storage {
        StorageBackendArg::InMemory => {
            serve(config.listen_addr, Arc::new(MemoryStore::new())).await?;
        }
        StorageBackendArg::Mysql => {
            let mysql_dsn = config
                .mysql_dsn
                .ok_or("mysql dsn is required when storage backend is mysql")?;
            let store = MySqlStore::connect(&mysql_dsn).await?;
            store.ensure_schema().await?;
            serve(config.listen_addr, Arc::new(store)).await?;
        }
    }

    Ok(())
}

async fn serve<S: state::Store>(
    listen_addr: std::net::SocketAddr,
    store: Arc<S>,
) -> Result<(), Box<dyn std::error::Error>> {
    let router = App::router(AppState::new(store));
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router).await?;
    Ok(())
}
