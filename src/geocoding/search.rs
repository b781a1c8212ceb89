use crate::app_config::Geocoding;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, instrument};

/// Top geocoding match for a free-text query.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaceMatch {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

// The service returns coordinates as strings, not numbers
#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

#[derive(Error, Debug)]
pub enum GeocodingError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("no match found for '{0}'")]
    NoMatch(String),
    #[error("the service returned an unparseable coordinate '{0}'")]
    InvalidCoordinate(String),
}

/// Forward-geocodes a free-text query to its top match. One request, no
/// retries; any failure surfaces as a single user-visible message.
#[instrument(skip(client, config))]
pub async fn search(client: &Client, config: &Geocoding, query: &str) -> Result<PlaceMatch, GeocodingError> {
    let results = client
        .get(config.url())
        .query(&[("q", query), ("format", "json"), ("limit", "1")])
        .send()
        .await?
        .error_for_status()?
        .json::<Vec<SearchResult>>()
        .await?;

    let Some(result) = results.into_iter().next() else {
        return Err(GeocodingError::NoMatch(query.to_string()));
    };

    let latitude = result.lat.parse::<f64>().map_err(|_| GeocodingError::InvalidCoordinate(result.lat.clone()))?;
    let longitude = result.lon.parse::<f64>().map_err(|_| GeocodingError::InvalidCoordinate(result.lon.clone()))?;
    let display_name = result.display_name.unwrap_or_else(|| query.to_string());

    info!("🔍 Resolved '{}' to {:.6}, {:.6}", display_name, latitude, longitude);

    Ok(PlaceMatch {
        latitude,
        longitude,
        display_name,
    })
}
