use crate::domain::Status;

/// Horizontal accuracy below which a fix counts as good, in meters.
const GOOD_ACCURACY_M: f64 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SeaLevelState {
    BelowSeaLevel,
    AtSeaLevel,
    AboveSeaLevel,
}

pub fn sea_level_state(altitude: f64) -> SeaLevelState {
    if altitude < 0.0 {
        SeaLevelState::BelowSeaLevel
    } else if altitude > 0.0 {
        SeaLevelState::AboveSeaLevel
    } else {
        SeaLevelState::AtSeaLevel
    }
}

/// Altitude rounded to whole meters relative to NAP, e.g. `-2 m NAP`.
pub fn format_altitude(altitude: f64) -> String {
    format!("{} m NAP", altitude.round())
}

/// Altitude with one decimal, e.g. `-2.1 m NAP`.
pub fn format_altitude_precise(altitude: f64) -> String {
    format!("{:.1} m NAP", altitude)
}

pub fn accuracy_indicator(accuracy: f64) -> &'static str {
    if accuracy < GOOD_ACCURACY_M { "good" } else { "coarse" }
}

pub fn status_line(status: &Status) -> String {
    match status {
        Status::Idle => "IDLE".to_string(),
        Status::Acquiring => "WAITING FOR GPS".to_string(),
        Status::Fixed => "GPS LOCK".to_string(),
        Status::Failed(reason) => format!("ERROR: {}", reason),
    }
}
