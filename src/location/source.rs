use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::BoxStream;
use std::time::Duration;
use thiserror::Error;

/// A raw position report from a location device, before any filtering.
#[derive(Clone, Debug, PartialEq)]
pub struct Fix {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
    /// Estimated horizontal error in meters, when the device reports one.
    pub accuracy: Option<f64>,
    pub time: Option<DateTime<Utc>>,
}

pub type FixStream = BoxStream<'static, Result<Fix, WatchError>>;

/// A continuous source of position fixes.
#[async_trait]
pub trait PositionSource: Sized + Send {
    async fn watch(self) -> Result<FixStream, WatchError>;
}

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("could not connect to gpsd at {address}: {source}")]
    Connect { address: String, source: std::io::Error },
    #[error("could not subscribe to gpsd reports: {0}")]
    Subscribe(std::io::Error),
    #[error("error while reading position reports: {0}")]
    Read(std::io::Error),
    #[error("the position stream ended unexpectedly")]
    StreamEnded,
    #[error("no position fix within {0:?}")]
    AcquireTimeout(Duration),
}
