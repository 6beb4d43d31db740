//! Geometry combination tool definition.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use crate::domains::tools::GeoTool;
use crate::provider::{GeoError, GeoResult, GeoapifyClient, QueryParams};

const ENDPOINT: &str = "/v1/geometry";

/// Geometric operation applied to stored shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum GeometryOperation {
    Union,
    Intersection,
}

impl std::fmt::Display for GeometryOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Union => "union",
            Self::Intersection => "intersection",
        })
    }
}

/// Parameters for combining geometries.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CombineGeometriesParams {
    /// 'union' or 'intersection'.
    pub operation: GeometryOperation,

    /// Ids of previously generated shapes (e.g. isolines); at least two.
    pub id: Vec<String>,
}

pub struct CombineGeometriesTool;

#[async_trait]
impl GeoTool for CombineGeometriesTool {
    const NAME: &'static str = "combine_geometries";

    const DESCRIPTION: &'static str = "Combine previously generated shapes (e.g. isolines) using union or intersection. \
        Returns a GeoJSON FeatureCollection with the combined geometry.";

    type Params = CombineGeometriesParams;
    type Output = Value;

    #[instrument(skip_all, fields(operation = %params.operation, shapes = params.id.len()))]
    async fn run(client: &GeoapifyClient, params: Self::Params) -> GeoResult<Value> {
        if params.id.len() < 2 {
            return Err(GeoError::validation(
                "id parameter must be an array with at least 2 elements",
            ));
        }

        let query = QueryParams::new()
            .with("operation", params.operation)
            .with("id", params.id.join(","));

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
    async fn test_ids_are_comma_joined() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(ENDPOINT)
                    .query_param("operation", "intersection")
                    .query_param("id", "iso1,iso2,iso3");
                then.status(200)
                    .json_body(json!({"type": "FeatureCollection", "features": []}));
            })
            .await;

        let client = mock_client(server.base_url());
        let params: CombineGeometriesParams = serde_json::from_value(json!({
            "operation": "intersection",
            "id": ["iso1", "iso2", "iso3"]
        }))
        .unwrap();
        CombineGeometriesTool::run(&client, params).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_needs_two_ids() {
        let client = offline_client();
        let params = CombineGeometriesParams {
            operation: GeometryOperation::Union,
            id: vec!["iso1".to_string()],
        };
        let err = CombineGeometriesTool::run(&client, params).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_unknown_operation_rejected() {
        let result = serde_json::from_value::<CombineGeometriesParams>(json!({
            "operation": "difference",
            "id": ["a", "b"]
        }));
        assert!(result.is_err());
    }
}
