//! Parent boundaries tool definition.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use super::BoundaryQuery;
use crate::domains::tools::GeoTool;
use crate::provider::{GeoResult, GeoapifyClient, QueryParams};

const ENDPOINT: &str = "/v1/boundaries/part-of";

/// Parameters for parent boundaries.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BoundariesPartOfParams {
    /// Boundary or place id.
    #[serde(default)]
    pub id: Option<String>,

    /// Latitude; used together with `lon` when no id is given.
    #[serde(default)]
    pub lat: Option<f64>,

    /// Longitude; used together with `lat` when no id is given.
    #[serde(default)]
    pub lon: Option<f64>,

    /// Boundary class to query, e.g. 'administrative', 'postal_code', 'political'.
    #[serde(default)]
    pub boundaries: Option<String>,

    /// Return parents only up to this administrative level (e.g. 2 = country, 4 = state).
    #[serde(default)]
    pub sublevel: Option<u32>,

    /// Geometry simplification level for returned boundaries, e.g. 'point', 'geometry_1000'.
    #[serde(default)]
    pub geometry_level: Option<String>,

    /// Response language code.
    #[serde(default)]
    pub language: Option<String>,
}

/// Parent boundaries tool.
pub struct BoundariesPartOfTool;

#[async_trait]
impl GeoTool for BoundariesPartOfTool {
    const NAME: &'static str = "boundaries_part_of";

    const DESCRIPTION: &'static str = "Return parent boundaries (administrative or other) for a place or boundary. \
        Always a GeoJSON FeatureCollection of area polygons.";

    type Params = BoundariesPartOfParams;
    type Output = Value;

    #[instrument(skip_all, fields(id = ?params.id))]
    async fn run(client: &GeoapifyClient, params: Self::Params) -> GeoResult<Value> {
        let mut query = QueryParams::new();
        BoundaryQuery {
            id: params.id.as_deref(),
            lat: params.lat,
            lon: params.lon,
            boundaries: params.boundaries.as_deref(),
            sublevel: params.sublevel,
            geometry_level: params.geometry_level.as_deref(),
            language: params.language.as_deref(),
        }
        .push_into(&mut query)?;

        Ok(client.get(ENDPOINT, &query).await?.into_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::testing::{mock_client, offline_client};
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_geometry_level_sent_as_geometry() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(ENDPOINT)
                    .query_param("lat", "48.2")
                    .query_param("lon", "16.37")
                    .query_param("format", "geojson")
                    .query_param("sublevel", "4")
                    .query_param("geometry", "geometry_1000")
                    .query_param("lang", "de");
                then.status(200)
                    .json_body(json!({"type": "FeatureCollection", "features": []}));
            })
            .await;

        let client = mock_client(server.base_url());
        let params: BoundariesPartOfParams = serde_json::from_value(json!({
            "lat": 48.2,
            "lon": 16.37,
            "sublevel": 4,
            "geometry_level": "geometry_1000",
            "language": "de"
        }))
        .unwrap();
        let output = BoundariesPartOfTool::run(&client, params).await.unwrap();

        mock.assert_async().await;
        assert_eq!(output["type"], "FeatureCollection");
    }

    #[tokio::test]
    async fn test_requires_target() {
        let client = offline_client();
        let params: BoundariesPartOfParams =
            serde_json::from_value(json!({"boundaries": "administrative"})).unwrap();
        let err = BoundariesPartOfTool::run(&client, params).await.unwrap_err();
        assert!(err.is_validation());
    }
}
