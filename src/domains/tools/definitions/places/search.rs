//! Places (POI) search tool definition.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use crate::domains::tools::GeoTool;
use crate::domains::tools::definitions::common::{push_page, require_text};
use crate::provider::{GeoResult, GeoapifyClient, QueryParams};

const ENDPOINT: &str = "/v2/places";

/// Parameters for places search.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PlacesSearchParams {
    /// Comma-separated category codes, e.g. 'accommodation.hotel,catering.cafe'.
    pub categories: String,

    /// Spatial filter, e.g. 'rect:minLon,minLat,maxLon,maxLat', 'circle:lon,lat,radius_m' or 'place:ID'.
    #[serde(default)]
    pub filter: Option<String>,

    /// Bias results toward a location, e.g. 'proximity:lon,lat'.
    #[serde(default)]
    pub bias: Option<String>,

    /// 1-based page number; 20 results per page.
    #[serde(default)]
    pub page: Option<u32>,

    /// Response language code.
    #[serde(default)]
    pub language: Option<String>,

    /// Extra conditions, e.g. 'internet_access,wheelchair'.
    #[serde(default)]
    pub conditions: Option<String>,
}

/// Places search tool - POIs by category within an area.
pub struct PlacesSearchTool;

#[async_trait]
impl GeoTool for PlacesSearchTool {
    const NAME: &'static str = "places_search";

    const DESCRIPTION: &'static str = "Search for places (POIs) by categories with spatial filters, bias, language and pagination. \
        Returns a GeoJSON FeatureCollection of up to 20 places per page.";

    type Params = PlacesSearchParams;
    type Output = Value;

    #[instrument(skip_all, fields(categories = %params.categories, page = ?params.page))]
    async fn run(client: &GeoapifyClient, params: Self::Params) -> GeoResult<Value> {
        require_text("categories", &params.categories)?;

        let mut query = QueryParams::new().with("categories", &params.categories);
        push_page(&mut query, params.page)?;
        query.push("format", "geojson");
        query.push_opt("filter", params.filter.as_deref());
        query.push_opt("bias", params.bias.as_deref());
        query.push_opt("lang", params.language.as_deref());
        query.push_opt("conditions", params.conditions.as_deref());

        Ok(client.get(ENDPOINT, &query).await?.into_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::testing::{mock_client, offline_client};
    use httpmock::prelude::*;
    use serde_json::json;

    fn params(value: Value) -> PlacesSearchParams {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_page_three_offset() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(ENDPOINT)
                    .query_param("categories", "catering.cafe")
                    .query_param("limit", "20")
                    .query_param("offset", "40")
                    .query_param("format", "geojson")
                    .query_param("filter", "circle:13.4,52.5,500");
                then.status(200)
                    .json_body(json!({"type": "FeatureCollection", "features": []}));
            })
            .await;

        let client = mock_client(server.base_url());
        PlacesSearchTool::run(
            &client,
            params(json!({
                "categories": "catering.cafe",
                "filter": "circle:13.4,52.5,500",
                "page": 3
            })),
        )
        .await
        .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_page_is_first_page() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path(ENDPOINT).query_param("offset", "0");
                then.status(200)
                    .json_body(json!({"type": "FeatureCollection", "features": []}));
            })
            .await;

        let client = mock_client(server.base_url());
        PlacesSearchTool::run(&client, params(json!({"categories": "commercial"})))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_invalid_input_rejected() {
        let client = offline_client();
        let empty = PlacesSearchTool::run(&client, params(json!({"categories": ""}))).await;
        assert!(empty.unwrap_err().is_validation());

        let page_zero =
            PlacesSearchTool::run(&client, params(json!({"categories": "commercial", "page": 0})))
                .await;
        assert!(page_zero.unwrap_err().is_validation());
    }
}
