mod gpsd;
mod source;
mod watcher;

pub use gpsd::GpsdSource;
pub use source::{Fix, FixStream, PositionSource, WatchError};
pub use watcher::watch_positions;
