use crate::domain::{Position, TerrainDescription};

#[derive(Debug, PartialEq)]
pub enum Event {
    WatchStarted,
    PositionChanged(Position),
    /// Terminal watch failure with a user-facing reason.
    WatchFailed(String),
    /// A terrain analysis request has been issued for the given token.
    AnalysisStarted(u64),
    /// A terrain analysis request has finished. `None` means it failed and the
    /// description stays absent. Ignored by the store when the token is stale.
    AnalysisResolved { token: u64, description: Option<TerrainDescription> },
    /// Manual refresh: drop the current description so a new analysis starts.
    AnalysisInvalidated,
}
