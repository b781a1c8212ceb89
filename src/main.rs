use crate::app_config::AppConfig;
use crate::domain::events::Event;
use crate::location::{GpsdSource, watch_positions};
use crate::store::Store;
use crate::store_listener::store_listener;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task;
use tracing::info;

mod app_config;
mod commands;
mod domain;
mod elevation;
mod geocoding;
mod http;
mod location;
mod map;
mod readout;
mod store;
mod store_listener;
mod terrain;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = Arc::new(AppConfig::load());
    info!("✅  Loaded configuration");

    let geo_client = http::new_client(&config)?;
    let analysis_client = terrain::new_client(&config)?;

    let (tx, rx) = mpsc::channel::<Event>(config.core().store_buffer_size());
    let mut store = Store::new(rx);
    let notifier_rx = store.notifier();

    task::spawn(async move {
        store.listen().await;
    });
    info!("✅  Initialized store");

    {
        let config = config.clone();
        let tx = tx.clone();
        task::spawn(async move {
            store_listener(notifier_rx, analysis_client, config, tx).await;
        });
    }
    info!("✅  Initialized store listener");

    let source = GpsdSource::new(config.location());
    let watch_task = task::spawn(watch_positions(source, geo_client.clone(), config.clone(), tx.clone()));
    info!("✅  Watching for position fixes");

    info!("🔥 {} is up and running, type a place name to search", env!("CARGO_PKG_NAME"));
    commands::command_loop(geo_client, config, tx, watch_task).await;

    Ok(())
}
