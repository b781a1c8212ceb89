use crate::app_config::Analysis;
use crate::domain::{Position, TerrainDescription};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::instrument;

// API: https://ai.google.dev/api/generate-content
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// The strict payload the model must return. Every field is required; a
/// missing or mistyped one fails the whole analysis.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisPayload {
    elevation: f64,
    location_name: String,
    geographical_features: Vec<String>,
    climate_zone: String,
    notable_facts: String,
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("the model returned no candidates")]
    NoCandidate,
    #[error("the model returned a candidate without text")]
    NoText,
    #[error("the model returned a malformed analysis: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

fn prompt(position: &Position) -> String {
    format!(
        "Analyze this specific location in Europe: Latitude {}, Longitude {}, Elevation {} meters. \
         Provide a detailed geographical report including the name of the area, typical terrain features \
         (mountains, polders, valleys), the climate zone, and one interesting topographic fact.",
        position.latitude,
        position.longitude,
        position.altitude.unwrap_or(0.0)
    )
}

fn response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "elevation": { "type": "NUMBER" },
            "locationName": { "type": "STRING" },
            "geographicalFeatures": { "type": "ARRAY", "items": { "type": "STRING" } },
            "climateZone": { "type": "STRING" },
            "notableFacts": { "type": "STRING" }
        },
        "required": ["elevation", "locationName", "geographicalFeatures", "climateZone", "notableFacts"]
    })
}

/// Requests a geographic analysis of the given position. The caller treats a
/// failure as non-fatal: the description stays absent and a new attempt is
/// made once the position changes.
#[instrument(skip(client, config))]
pub async fn analyze(client: &Client, config: &Analysis, position: &Position) -> Result<TerrainDescription, AnalysisError> {
    let request = GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part { text: prompt(position) }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: response_schema(),
        },
    };

    let response = client
        .post(format!("{}/models/{}:generateContent", config.url(), config.model()))
        .json(&request)
        .send()
        .await?
        .error_for_status()?
        .json::<GenerateContentResponse>()
        .await?;

    let text = response
        .candidates
        .into_iter()
        .next()
        .ok_or(AnalysisError::NoCandidate)?
        .content
        .and_then(|content| content.parts.into_iter().next())
        .map(|part| part.text)
        .ok_or(AnalysisError::NoText)?;

    let payload = serde_json::from_str::<AnalysisPayload>(text.trim())?;

    Ok(TerrainDescription {
        elevation: payload.elevation,
        location_name: payload.location_name,
        features: payload.geographical_features,
        climate_zone: payload.climate_zone,
        notable_fact: payload.notable_facts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;
    use pretty_assertions::assert_eq;

    fn position() -> Position {
        Position {
            latitude: 52.3676,
            longitude: 4.9041,
            altitude: Some(-2.1),
            accuracy: 5.0,
        }
    }

    #[test]
    fn the_prompt_interpolates_the_position() {
        let text = prompt(&position());

        assert!(text.contains("Latitude 52.3676"));
        assert!(text.contains("Longitude 4.9041"));
        assert!(text.contains("Elevation -2.1 meters"));
    }

    #[tokio::test]
    async fn maps_a_well_formed_response_to_a_description() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-3-flash-preview:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("../../tests/resources/analysis_response.json"))
            .create_async()
            .await;

        let config = AppConfigBuilder::new().analysis_url(format!("{}/v1beta", server.url())).build();

        let description = analyze(&Client::new(), config.analysis(), &position()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            description,
            TerrainDescription {
                elevation: -2.1,
                location_name: "Amsterdam, Noord-Holland".to_string(),
                features: vec!["polders".to_string(), "canals".to_string(), "reclaimed land".to_string()],
                climate_zone: "Temperate maritime".to_string(),
                notable_fact: "Large parts of Amsterdam lie below sea level on land reclaimed from the Amstel delta.".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn a_payload_with_a_missing_field_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1beta/models/gemini-3-flash-preview:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("../../tests/resources/analysis_response_missing_field.json"))
            .create_async()
            .await;

        let config = AppConfigBuilder::new().analysis_url(format!("{}/v1beta", server.url())).build();

        let result = analyze(&Client::new(), config.analysis(), &position()).await;

        assert!(matches!(result, Err(AnalysisError::MalformedPayload(_))));
    }

    #[tokio::test]
    async fn a_response_without_candidates_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1beta/models/gemini-3-flash-preview:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let config = AppConfigBuilder::new().analysis_url(format!("{}/v1beta", server.url())).build();

        let result = analyze(&Client::new(), config.analysis(), &position()).await;

        assert!(matches!(result, Err(AnalysisError::NoCandidate)));
    }

    #[tokio::test]
    async fn a_candidate_without_text_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1beta/models/gemini-3-flash-preview:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#)
            .create_async()
            .await;

        let config = AppConfigBuilder::new().analysis_url(format!("{}/v1beta", server.url())).build();

        let result = analyze(&Client::new(), config.analysis(), &position()).await;

        assert!(matches!(result, Err(AnalysisError::NoText)));
    }
}
