use crate::domain::events::Event;
use crate::domain::{Position, Status, TerrainDescription};
use tokio::sync::mpsc::Receiver;
use tokio::sync::watch::{self, Receiver as WatchReceiver, Sender as WatchSender};
use tracing::{debug, info, instrument, warn};

/// Lifecycle of the terrain analysis for the current position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum AnalysisState {
    #[default]
    NotRequested,
    Pending,
    /// The last attempt failed; no retry until the position changes or a manual refresh.
    Failed,
    Resolved,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StoreSnapshot {
    pub status: Status,
    pub position: Option<Position>,
    pub description: Option<TerrainDescription>,
    pub analysis: AnalysisState,
    /// Bumped on every position change; analysis events carrying an older token are stale.
    pub analysis_token: u64,
}

#[derive(Debug)]
pub struct Store {
    snapshot: StoreSnapshot,
    rx: Receiver<Event>,
    notifier_tx: WatchSender<StoreSnapshot>,
    notifier_rx: WatchReceiver<StoreSnapshot>,
}

impl Store {
    pub fn new(rx: Receiver<Event>) -> Self {
        let (notifier_tx, notifier_rx) = watch::channel(StoreSnapshot::default());

        Store {
            snapshot: StoreSnapshot::default(),
            rx,
            notifier_tx,
            notifier_rx,
        }
    }

    pub fn notifier(&self) -> WatchReceiver<StoreSnapshot> {
        self.notifier_rx.clone()
    }

    #[instrument(skip(self))]
    pub async fn listen(&mut self) {
        while let Some(event) = self.rx.recv().await {
            debug!("🔵 Received event: {:?}", event);
            if self.apply(event) {
                self.notifier_tx.send(self.snapshot.clone()).unwrap_or_default();
            }
        }
    }

    fn apply(&mut self, event: Event) -> bool {
        match event {
            Event::WatchStarted => {
                self.snapshot.status = Status::Acquiring;
                true
            }
            Event::PositionChanged(position) => {
                info!("🟢 Position updated to {:.6}, {:.6}", position.latitude, position.longitude);
                self.snapshot.status = Status::Fixed;
                self.snapshot.position = Some(position);
                self.snapshot.description = None;
                self.snapshot.analysis = AnalysisState::NotRequested;
                self.snapshot.analysis_token += 1;
                true
            }
            Event::WatchFailed(reason) => {
                warn!("🔴 Position watch failed: {}", reason);
                self.snapshot.status = Status::Failed(reason);
                true
            }
            Event::AnalysisStarted(token) => {
                if token != self.snapshot.analysis_token {
                    debug!("⚪ Ignoring analysis start for stale token {}, current is {}", token, self.snapshot.analysis_token);
                    return false;
                }

                self.snapshot.analysis = AnalysisState::Pending;
                true
            }
            Event::AnalysisResolved { token, description } => {
                if token != self.snapshot.analysis_token {
                    debug!("⚪ Discarding analysis result for stale token {}, current is {}", token, self.snapshot.analysis_token);
                    return false;
                }

                match description {
                    Some(description) => {
                        info!("🟢 Terrain analysis resolved: '{}'", description.location_name);
                        self.snapshot.description = Some(description);
                        self.snapshot.analysis = AnalysisState::Resolved;
                    }
                    None => {
                        self.snapshot.analysis = AnalysisState::Failed;
                    }
                }
                true
            }
            Event::AnalysisInvalidated => {
                info!("🔄 Dropping terrain analysis on request");
                self.snapshot.description = None;
                self.snapshot.analysis = AnalysisState::NotRequested;
                self.snapshot.analysis_token += 1;
                true
            }
        }
    }
}
