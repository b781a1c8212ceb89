use crate::app_config::Elevation;
use crate::elevation::elevation_response::{FallbackResponse, PrimaryResponse};
use reqwest::Client;
use thiserror::Error;
use tracing::{instrument, warn};

/// Resolves the elevation in meters for a coordinate pair. Tries the primary
/// service; on any failure performs exactly one lookup against the fallback
/// service; defaults to zero when both fail. No retries, no caching.
#[instrument(skip(client, config))]
pub async fn resolve(client: &Client, config: &Elevation, latitude: f64, longitude: f64) -> f64 {
    match primary(client, config, latitude, longitude).await {
        Ok(elevation) => elevation,
        Err(e) => {
            warn!("⚠️ Primary elevation lookup failed: {}", e);
            match fallback(client, config, latitude, longitude).await {
                Ok(elevation) => elevation,
                Err(e) => {
                    warn!("⚠️ Fallback elevation lookup failed, defaulting to 0: {}", e);
                    0.0
                }
            }
        }
    }
}

async fn primary(client: &Client, config: &Elevation, latitude: f64, longitude: f64) -> Result<f64, ElevationLookupError> {
    let mut request = client
        .get(config.primary_url())
        .query(&[("point", format!("{},{}", latitude, longitude))]);
    if !config.api_key().is_empty() {
        request = request.query(&[("key", config.api_key())]);
    }

    let response = request.send().await?.error_for_status()?.json::<PrimaryResponse>().await?;
    response.elevation.first().copied().ok_or(ElevationLookupError::EmptyResponse)
}

async fn fallback(client: &Client, config: &Elevation, latitude: f64, longitude: f64) -> Result<f64, ElevationLookupError> {
    let response = client
        .get(config.fallback_url())
        .query(&[("locations", format!("{},{}", latitude, longitude))])
        .send()
        .await?
        .error_for_status()?
        .json::<FallbackResponse>()
        .await?;

    response.results.first().map(|result| result.elevation).ok_or(ElevationLookupError::EmptyResponse)
}

#[derive(Error, Debug)]
enum ElevationLookupError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("the service returned no elevation for the requested point")]
    EmptyResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;
    use mockito::Matcher;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn returns_the_primary_elevation_when_the_primary_service_succeeds() {
        let mut server = mockito::Server::new_async().await;
        let primary = server
            .mock("GET", "/v1/elevation")
            .match_query(Matcher::UrlEncoded("point".into(), "52.3676,4.9041".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"elevation":[-2.1]}"#)
            .create_async()
            .await;
        let fallback = server.mock("GET", "/api/v1/lookup").expect(0).create_async().await;

        let config = AppConfigBuilder::new()
            .primary_elevation_url(format!("{}/v1/elevation", server.url()))
            .fallback_elevation_url(format!("{}/api/v1/lookup", server.url()))
            .build();

        let elevation = resolve(&Client::new(), config.elevation(), 52.3676, 4.9041).await;

        primary.assert_async().await;
        fallback.assert_async().await;
        assert_eq!(elevation, -2.1);
    }

    #[tokio::test]
    async fn falls_back_to_the_secondary_service_when_the_primary_fails() {
        let mut server = mockito::Server::new_async().await;
        let primary = server
            .mock("GET", "/v1/elevation")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;
        let fallback = server
            .mock("GET", "/api/v1/lookup")
            .match_query(Matcher::UrlEncoded("locations".into(), "52.3676,4.9041".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("../../tests/resources/open_elevation_response.json"))
            .create_async()
            .await;

        let config = AppConfigBuilder::new()
            .primary_elevation_url(format!("{}/v1/elevation", server.url()))
            .fallback_elevation_url(format!("{}/api/v1/lookup", server.url()))
            .build();

        let elevation = resolve(&Client::new(), config.elevation(), 52.3676, 4.9041).await;

        primary.assert_async().await;
        fallback.assert_async().await;
        assert_eq!(elevation, 12.5);
    }

    #[tokio::test]
    async fn defaults_to_zero_when_both_services_fail() {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/v1/elevation").match_query(Matcher::Any).with_status(500).create_async().await;
        server.mock("GET", "/api/v1/lookup").match_query(Matcher::Any).with_status(503).create_async().await;

        let config = AppConfigBuilder::new()
            .primary_elevation_url(format!("{}/v1/elevation", server.url()))
            .fallback_elevation_url(format!("{}/api/v1/lookup", server.url()))
            .build();

        let elevation = resolve(&Client::new(), config.elevation(), 52.3676, 4.9041).await;

        assert_eq!(elevation, 0.0);
    }

    #[tokio::test]
    async fn a_malformed_primary_body_counts_as_a_primary_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/elevation")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"elevation":"high"}"#)
            .create_async()
            .await;
        let fallback = server
            .mock("GET", "/api/v1/lookup")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("../../tests/resources/open_elevation_response.json"))
            .create_async()
            .await;

        let config = AppConfigBuilder::new()
            .primary_elevation_url(format!("{}/v1/elevation", server.url()))
            .fallback_elevation_url(format!("{}/api/v1/lookup", server.url()))
            .build();

        let elevation = resolve(&Client::new(), config.elevation(), 52.3676, 4.9041).await;

        fallback.assert_async().await;
        assert_eq!(elevation, 12.5);
    }

    #[tokio::test]
    async fn passes_the_api_key_to_the_primary_service_when_configured() {
        let mut server = mockito::Server::new_async().await;
        let primary = server
            .mock("GET", "/v1/elevation")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("point".into(), "52.3676,4.9041".into()),
                Matcher::UrlEncoded("key".into(), "s3cr3t".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"elevation":[-2.1]}"#)
            .create_async()
            .await;

        let config = AppConfigBuilder::new()
            .primary_elevation_url(format!("{}/v1/elevation", server.url()))
            .elevation_api_key("s3cr3t".to_string())
            .build();

        let elevation = resolve(&Client::new(), config.elevation(), 52.3676, 4.9041).await;

        primary.assert_async().await;
        assert_eq!(elevation, -2.1);
    }
}
