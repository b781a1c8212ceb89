use crate::app_config;
use crate::location::source::{Fix, FixStream, PositionSource, WatchError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio_stream::wrappers::LinesStream;
use tracing::{debug, info, warn};

const WATCH_COMMAND: &[u8] = b"?WATCH={\"enable\":true,\"json\":true};\r\n";

/// Continuous position source speaking the gpsd JSON protocol over TCP.
pub struct GpsdSource {
    address: String,
    min_mode: u8,
}

impl GpsdSource {
    pub fn new(config: &app_config::Location) -> Self {
        GpsdSource {
            address: config.gpsd_address().to_string(),
            // A 3D fix is the only mode that carries a device altitude
            min_mode: if config.high_accuracy() { 3 } else { 2 },
        }
    }
}

#[async_trait]
impl PositionSource for GpsdSource {
    async fn watch(self) -> Result<FixStream, WatchError> {
        info!("Connecting to gpsd at {}...", self.address);
        let mut stream = TcpStream::connect(&self.address).await.map_err(|source| WatchError::Connect {
            address: self.address.clone(),
            source,
        })?;
        stream.write_all(WATCH_COMMAND).await.map_err(WatchError::Subscribe)?;
        info!("Connecting to gpsd at {}... OK", self.address);

        // The reader owns the whole socket so the write half stays open;
        // gpsd stops streaming reports when it sees the peer close it.
        let lines = BufReader::new(stream).lines();
        let min_mode = self.min_mode;
        let fixes = LinesStream::new(lines)
            .filter_map(move |line| async move {
                match line {
                    Ok(line) => fix_from_report(&line, min_mode).map(Ok),
                    Err(e) => Some(Err(WatchError::Read(e))),
                }
            })
            .boxed();

        Ok(fixes)
    }
}

// Protocol: https://gpsd.gitlab.io/gpsd/gpsd_json.html
#[derive(Debug, Deserialize)]
struct GpsdReport {
    class: String,
    #[serde(default)]
    mode: u8,
    time: Option<DateTime<Utc>>,
    lat: Option<f64>,
    lon: Option<f64>,
    #[serde(rename = "altMSL")]
    alt_msl: Option<f64>,
    alt: Option<f64>,
    epx: Option<f64>,
    epy: Option<f64>,
    eph: Option<f64>,
}

/// Maps a single gpsd report line to a fix. Non-TPV reports and TPV reports
/// below the required fix mode yield `None`.
fn fix_from_report(line: &str, min_mode: u8) -> Option<Fix> {
    let report = match serde_json::from_str::<GpsdReport>(line) {
        Ok(report) => report,
        Err(e) => {
            warn!("⚠️ Skipping unparseable gpsd report: {}", e);
            return None;
        }
    };

    if report.class != "TPV" {
        debug!("Ignoring gpsd {} report", report.class);
        return None;
    }
    if report.mode < min_mode {
        debug!("Ignoring TPV report with fix mode {}", report.mode);
        return None;
    }

    let (latitude, longitude) = (report.lat?, report.lon?);
    // gpsd 3.20 split `alt` into `altMSL` and `altHAE`; prefer the mean-sea-level one
    let altitude = report.alt_msl.or(report.alt);
    let accuracy = report.eph.or(match (report.epx, report.epy) {
        (Some(x), Some(y)) => Some(x.max(y)),
        (x, y) => x.or(y),
    });

    Some(Fix {
        latitude,
        longitude,
        altitude,
        accuracy,
        time: report.time,
    })
}
