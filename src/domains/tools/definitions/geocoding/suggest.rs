//! Address autocomplete tool definition.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use crate::domains::tools::GeoTool;
use crate::domains::tools::definitions::common::{PAGE_SIZE, require_text};
use crate::provider::{GeoResult, GeoapifyClient, QueryParams};

const ENDPOINT: &str = "/v1/geocode/autocomplete";

/// Parameters for place suggestions.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SuggestPlacesParams {
    /// Partial input, e.g. '1600 Amph...' or 'Eiffel To...'.
    pub text: String,

    /// Preferred response language code.
    #[serde(default)]
    pub language: Option<String>,

    /// Optional filter DSL, e.g. 'countrycode:us'.
    #[serde(default)]
    pub filter: Option<String>,

    /// Optional bias DSL, e.g. 'proximity:lon,lat'.
    #[serde(default)]
    pub bias: Option<String>,
}

pub struct SuggestPlacesTool;

#[async_trait]
impl GeoTool for SuggestPlacesTool {
    const NAME: &'static str = "suggest_places";

    const DESCRIPTION: &'static str = "Suggest addresses and places for partial text input. Returns up to 20 GeoJSON Point features.";

    type Params = SuggestPlacesParams;
    type Output = Value;

    #[instrument(skip_all, fields(text = %params.text))]
    async fn run(client: &GeoapifyClient, params: Self::Params) -> GeoResult<Value> {
        require_text("text", &params.text)?;

        let mut query = QueryParams::new()
            .with("text", &params.text)
            .with("limit", PAGE_SIZE)
            .with("format", "geojson");
        query.push_opt("lang", params.language.as_deref());
        query.push_opt("filter", params.filter.as_deref());
        query.push_opt("bias", params.bias.as_deref());

        Ok(client.get(ENDPOINT, &query).await?.into_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::testing::mock_client;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_forwards_filter_and_bias_verbatim() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(ENDPOINT)
                    .query_param("text", "Eiffel To")
                    .query_param("format", "geojson")
                    .query_param("filter", "countrycode:fr")
                    .query_param("bias", "proximity:2.29,48.85");
                then.status(200)
                    .json_body(json!({"type": "FeatureCollection", "features": []}));
            })
            .await;

        let client = mock_client(server.base_url());
        let params: SuggestPlacesParams = serde_json::from_value(json!({
            "text": "Eiffel To",
            "filter": "countrycode:fr",
            "bias": "proximity:2.29,48.85"
        }))
        .unwrap();
        let output = SuggestPlacesTool::run(&client, params).await.unwrap();

        mock.assert_async().await;
        assert_eq!(output["features"], json!([]));
    }

    #[test]
    fn test_text_is_required() {
        let result = serde_json::from_value::<SuggestPlacesParams>(json!({"language": "en"}));
        assert!(result.is_err());
    }
}
