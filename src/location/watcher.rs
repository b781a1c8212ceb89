use crate::app_config::AppConfig;
use crate::domain::Position;
use crate::domain::events::Event;
use crate::elevation;
use crate::location::source::{Fix, PositionSource, WatchError};
use futures::StreamExt;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::mpsc::Sender;
use tokio::time::timeout;
use tracing::{debug, instrument};

/// Accuracy assumed for a fix whose device did not report an error estimate.
const UNKNOWN_ACCURACY_M: f64 = 100.0;

/// Consumes fixes from the source until the channel closes or the source
/// fails. Failures are terminal: a `WatchFailed` event is emitted and the
/// watch ends, leaving a restart as the only way to resume.
#[instrument(skip_all)]
pub async fn watch_positions(source: impl PositionSource, client: Client, config: Arc<AppConfig>, tx: Sender<Event>) {
    tx.send(Event::WatchStarted).await.unwrap_or_default();

    if let Err(e) = run_watch(source, &client, &config, &tx).await {
        tx.send(Event::WatchFailed(e.to_string())).await.unwrap_or_default();
    }
}

async fn run_watch(source: impl PositionSource, client: &Client, config: &AppConfig, tx: &Sender<Event>) -> Result<(), WatchError> {
    let mut fixes = source.watch().await?;
    let mut last_accepted: Option<Position> = None;

    loop {
        // The acquisition timeout only covers the wait for the first usable fix
        let next = if last_accepted.is_none() {
            let acquire_timeout = config.location().acquire_timeout();
            timeout(acquire_timeout, fixes.next())
                .await
                .map_err(|_| WatchError::AcquireTimeout(acquire_timeout))?
        } else {
            fixes.next().await
        };

        let fix = match next {
            Some(fix) => fix?,
            None => return Err(WatchError::StreamEnded),
        };

        if let Some(last) = &last_accepted
            && within_dead_zone(last, &fix, config.location().dead_zone_degrees())
        {
            debug!("⚪ Ignoring fix within the dead zone of {:.6}, {:.6}", last.latitude, last.longitude);
            continue;
        }

        let altitude = match fix.altitude {
            Some(altitude) => altitude,
            None => elevation::resolve(client, config.elevation(), fix.latitude, fix.longitude).await,
        };

        let position = Position {
            latitude: fix.latitude,
            longitude: fix.longitude,
            altitude: Some(altitude),
            accuracy: fix.accuracy.unwrap_or(UNKNOWN_ACCURACY_M),
        };
        debug!("🛰 Accepted fix from {:?}: {:?}", fix.time, position);

        last_accepted = Some(position.clone());
        if tx.send(Event::PositionChanged(position)).await.is_err() {
            return Ok(()); // The store is gone, we are shutting down
        }
    }
}

fn within_dead_zone(last: &Position, fix: &Fix, threshold: f64) -> bool {
    (fix.latitude - last.latitude).abs() < threshold && (fix.longitude - last.longitude).abs() < threshold
}
