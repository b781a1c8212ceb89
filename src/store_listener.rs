use crate::app_config::AppConfig;
use crate::domain::Status;
use crate::domain::events::Event;
use crate::map;
use crate::readout;
use crate::store::{AnalysisState, StoreSnapshot};
use crate::terrain;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::mpsc::Sender;
use tokio::sync::watch::Receiver;
use tracing::{info, instrument, warn};

#[instrument(skip_all)]
pub async fn store_listener(mut rx: Receiver<StoreSnapshot>, client: Client, config: Arc<AppConfig>, tx: Sender<Event>) {
    while rx.changed().await.is_ok() {
        let snapshot: StoreSnapshot = rx.borrow().clone();
        render(&snapshot, &config);
        maybe_start_analysis(&snapshot, &client, &config, &tx).await;
    }
}

fn render(snapshot: &StoreSnapshot, config: &AppConfig) {
    info!("📡 {}", readout::status_line(&snapshot.status));

    let Some(position) = &snapshot.position else { return };

    if let Some(altitude) = position.altitude {
        info!(
            "⛰ {} (precisely {}, {:?}), ± {:.0} m ({})",
            readout::format_altitude(altitude),
            readout::format_altitude_precise(altitude),
            readout::sea_level_state(altitude),
            position.accuracy,
            readout::accuracy_indicator(position.accuracy)
        );
    }

    let (tile, marker) = map::tile_for(position.latitude, position.longitude, config.map().zoom(), config.map().max_zoom());
    info!(
        "🗺 {:.6}, {:.6} on {} (marker at {}, {} px)",
        position.latitude,
        position.longitude,
        map::tile_url(config.map().tile_url(), config.map().subdomains(), &tile),
        marker.x,
        marker.y
    );

    if let Some(description) = &snapshot.description {
        info!(
            "🌍 {} ({}), around {}",
            description.location_name,
            description.climate_zone,
            readout::format_altitude(description.elevation)
        );
        info!("🌍 Terrain: {}", description.features.join(", "));
        info!("🌍 \"{}\"", description.notable_fact);
    }
}

/// Starts a terrain analysis when the snapshot calls for one. The analysis
/// state in the store keeps this single-flight, and the token lets the store
/// discard results that resolve after the position has moved on.
async fn maybe_start_analysis(snapshot: &StoreSnapshot, client: &Client, config: &Arc<AppConfig>, tx: &Sender<Event>) {
    if !needs_analysis(snapshot) {
        return;
    }
    let Some(position) = snapshot.position.clone() else { return };

    let token = snapshot.analysis_token;
    if tx.send(Event::AnalysisStarted(token)).await.is_err() {
        return;
    }

    let client = client.clone();
    let config = config.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let description = match terrain::analyze(&client, config.analysis(), &position).await {
            Ok(description) => Some(description),
            Err(e) => {
                warn!("🤖 Terrain analysis failed: {}", e);
                None
            }
        };
        tx.send(Event::AnalysisResolved { token, description }).await.unwrap_or_default();
    });
}

fn needs_analysis(snapshot: &StoreSnapshot) -> bool {
    snapshot.status == Status::Fixed
        && snapshot.position.as_ref().is_some_and(|position| position.altitude.is_some())
        && snapshot.description.is_none()
        && snapshot.analysis == AnalysisState::NotRequested
}
