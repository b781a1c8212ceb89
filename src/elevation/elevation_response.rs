use serde::Deserialize;

/// Response shape of the primary topographic service: elevations for the
/// requested points, in request order.
#[derive(Debug, Deserialize)]
pub struct PrimaryResponse {
    pub elevation: Vec<f64>,
}

// API: https://open-elevation.com/#general
#[derive(Debug, Deserialize)]
pub struct FallbackResponse {
    pub results: Vec<FallbackResult>,
}

#[derive(Debug, Deserialize)]
pub struct FallbackResult {
    pub elevation: f64,
}
