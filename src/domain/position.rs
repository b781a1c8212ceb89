/// A resolved geographic position. Replaced wholesale on every update, never merged.
#[derive(Clone, Debug, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    /// Meters relative to NAP. `None` until the elevation resolver has filled it in.
    pub altitude: Option<f64>,
    /// Horizontal accuracy in meters.
    pub accuracy: f64,
}
