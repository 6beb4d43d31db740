//! Isoline (reachability polygon) tool definition.
//!
//! Large isolines are computed asynchronously: the provider first answers
//! with a job ticket, and the finished collection is fetched by id once
//! from the batch endpoint, after a short fixed pause.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::domains::tools::GeoTool;
use crate::domains::tools::definitions::common::{require_text, validate_coordinates};
use crate::provider::{GeoError, GeoResult, GeoapifyClient, ProviderResponse, QueryParams};

const ENDPOINT: &str = "/v1/isoline";
const JOB_ENDPOINT: &str = "/v1/batch";

/// What `range` measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum IsolineType {
    /// Range in seconds.
    Time,
    /// Range in metres.
    Distance,
}

impl IsolineType {
    fn as_str(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Distance => "distance",
        }
    }
}

/// One contour or several.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum IsolineRange {
    /// Several contours, e.g. `[600, 1200]`.
    List(Vec<u64>),
    /// A single contour.
    Number(u64),
    /// Pre-formatted value, e.g. `"600,1200"`.
    Text(String),
}

impl IsolineRange {
    /// Render as the provider's comma-separated `range` value.
    fn to_query_value(&self) -> GeoResult<String> {
        match self {
            Self::List(values) if values.is_empty() => {
                Err(GeoError::validation("range must contain at least one value"))
            }
            Self::List(values) => Ok(values
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(",")),
            Self::Number(value) => Ok(value.to_string()),
            Self::Text(text) => {
                require_text("range", text)?;
                Ok(text.trim().to_string())
            }
        }
    }
}

/// Parameters for isoline generation.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GenerateIsolineParams {
    /// Latitude of the origin.
    pub lat: f64,

    /// Longitude of the origin.
    pub lon: f64,

    /// Measure type: 'time' or 'distance'.
    #[serde(rename = "type")]
    pub kind: IsolineType,

    /// Travel mode, e.g. 'drive', 'truck', 'bicycle', 'walk', 'transit'.
    pub mode: String,

    /// Seconds (time) or metres (distance). An array produces multiple contours.
    pub range: IsolineRange,

    /// Features to avoid, e.g. 'tolls|highways|ferries'.
    #[serde(default)]
    pub avoid: Option<String>,

    /// Traffic model, e.g. 'free_flow' or 'approximated'.
    #[serde(default)]
    pub traffic: Option<String>,

    /// Route optimization type, e.g. 'balanced', 'short', 'less_maneuvers'.
    #[serde(default)]
    pub route_type: Option<String>,

    /// Units system, e.g. 'metric' or 'imperial'.
    #[serde(default)]
    pub units: Option<String>,
}

/// Isoline tool - areas reachable within a time or distance budget.
pub struct GenerateIsolineTool;

#[async_trait]
impl GeoTool for GenerateIsolineTool {
    const NAME: &'static str = "generate_isoline";

    const DESCRIPTION: &'static str = "Compute reachability polygons (isochrones/isodistances) by time or distance for a travel mode. \
        Returns a GeoJSON FeatureCollection with one polygon per range value.";

    type Params = GenerateIsolineParams;
    type Output = Value;

    #[instrument(skip_all, fields(kind = params.kind.as_str(), mode = %params.mode))]
    async fn run(client: &GeoapifyClient, params: Self::Params) -> GeoResult<Value> {
        validate_coordinates(params.lat, params.lon)?;
        require_text("mode", &params.mode)?;
        let range = params.range.to_query_value()?;

        let mut query = QueryParams::new()
            .with("lat", params.lat)
            .with("lon", params.lon)
            .with("type", params.kind.as_str())
            .with("mode", &params.mode)
            .with("range", range);
        query.push_opt("avoid", params.avoid.as_deref());
        query.push_opt("traffic", params.traffic.as_deref());
        query.push_opt("route_type", params.route_type.as_deref());
        query.push_opt("units", params.units.as_deref());

        match client.get(ENDPOINT, &query).await? {
            ProviderResponse::JobTicket { id, .. } => {
                debug!("Isoline job {} pending, fetching result", id);
                tokio::time::sleep(client.isoline_retry_delay()).await;
                let follow_up = QueryParams::new().with("id", &id);
                Ok(client.get(JOB_ENDPOINT, &follow_up).await?.into_value())
            }
            response => Ok(response.into_value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::testing::{mock_client, offline_client};
    use httpmock::prelude::*;
    use serde_json::json;

    fn params(value: Value) -> GenerateIsolineParams {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_range_forms() {
        let list = params(json!({"lat": 0, "lon": 0, "type": "time", "mode": "walk", "range": [600, 1200]}));
        assert_eq!(list.range.to_query_value().unwrap(), "600,1200");

        let single = params(json!({"lat": 0, "lon": 0, "type": "distance", "mode": "walk", "range": 900}));
        assert_eq!(single.range.to_query_value().unwrap(), "900");

        let text = params(json!({"lat": 0, "lon": 0, "type": "time", "mode": "walk", "range": "300,600"}));
        assert_eq!(text.range.to_query_value().unwrap(), "300,600");

        assert!(IsolineRange::List(vec![]).to_query_value().is_err());
    }

    #[tokio::test]
    async fn test_direct_collection_is_returned() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(ENDPOINT)
                    .query_param("type", "time")
                    .query_param("mode", "drive")
                    .query_param("range", "600,1200")
                    .query_param("avoid", "tolls")
                    .query_param("units", "metric");
                then.status(200).json_body(json!({
                    "type": "FeatureCollection",
                    "features": [{"type": "Feature"}, {"type": "Feature"}]
                }));
            })
            .await;

        let client = mock_client(server.base_url());
        let output = GenerateIsolineTool::run(
            &client,
            params(json!({
                "lat": 52.52,
                "lon": 13.405,
                "type": "time",
                "mode": "drive",
                "range": [600, 1200],
                "avoid": "tolls",
                "units": "metric"
            })),
        )
        .await
        .unwrap();

        mock.assert_async().await;
        assert_eq!(output["features"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_job_ticket_is_followed_once() {
        let server = MockServer::start_async().await;
        let submit = server
            .mock_async(|when, then| {
                when.method(GET).path(ENDPOINT).query_param("lat", "52.52");
                then.status(200)
                    .json_body(json!({"id": "job-42", "status": "pending"}));
            })
            .await;
        let fetch = server
            .mock_async(|when, then| {
                when.method(GET).path(JOB_ENDPOINT).query_param("id", "job-42");
                then.status(200).json_body(json!({
                    "type": "FeatureCollection",
                    "features": [{"type": "Feature", "properties": {"range": 600}}]
                }));
            })
            .await;

        let client = mock_client(server.base_url());
        let output = GenerateIsolineTool::run(
            &client,
            params(json!({"lat": 52.52, "lon": 13.405, "type": "time", "mode": "walk", "range": 600})),
        )
        .await
        .unwrap();

        submit.assert_async().await;
        fetch.assert_async().await;
        assert_eq!(output["features"][0]["properties"]["range"], 600);
    }

    #[tokio::test]
    async fn test_invalid_origin_rejected() {
        let client = offline_client();
        let err = GenerateIsolineTool::run(
            &client,
            params(json!({"lat": 120.0, "lon": 0, "type": "time", "mode": "walk", "range": 600})),
        )
        .await
        .unwrap_err();
        assert!(err.is_validation());
    }
}
