use crate::app_config::AppConfig;
use crate::domain::Position;
use crate::domain::events::Event;
use crate::elevation;
use crate::geocoding;
use reqwest::Client;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

/// Nominal accuracy for a geocoded centroid, which carries no error estimate.
const GEOCODED_ACCURACY_M: f64 = 25.0;

/// Reads commands from stdin: `quit`/`exit` stops the service, `refresh`
/// drops the terrain analysis so a new one starts, anything else is a place
/// search.
#[instrument(skip_all)]
pub async fn command_loop(client: Client, config: Arc<AppConfig>, tx: Sender<Event>, watch_task: JoinHandle<()>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        let command = line.trim();
        match command {
            "" => {}
            "quit" | "exit" => break,
            "refresh" => tx.send(Event::AnalysisInvalidated).await.unwrap_or_default(),
            query => search_and_apply(query, &client, &config, &tx, &watch_task).await,
        }
    }
}

/// Resolves a place search and applies it as the new position. A successful
/// search is a manual override: the live watch is stopped first, so a later
/// fix cannot snap the view back.
async fn search_and_apply(query: &str, client: &Client, config: &AppConfig, tx: &Sender<Event>, watch_task: &JoinHandle<()>) {
    match geocoding::search(client, config.geocoding(), query).await {
        Ok(place) => {
            watch_task.abort();

            // A geocoded position has no altitude of its own
            let altitude = elevation::resolve(client, config.elevation(), place.latitude, place.longitude).await;
            let position = Position {
                latitude: place.latitude,
                longitude: place.longitude,
                altitude: Some(altitude),
                accuracy: GEOCODED_ACCURACY_M,
            };

            info!("📍 Now showing '{}' instead of the live position", place.display_name);
            tx.send(Event::PositionChanged(position)).await.unwrap_or_default();
        }
        Err(e) => warn!("🔍 Search for '{}' failed: {}", query, e),
    }
}
