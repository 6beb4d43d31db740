//! Postcode search tool definition.
//!
//! The provider occasionally wraps a feature's geometry in a second Feature
//! and omits properties; results are repaired so callers always receive a
//! well-formed FeatureCollection.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{debug, instrument};

use super::push_postcode_options;
use crate::domains::tools::GeoTool;
use crate::domains::tools::definitions::common::{GeometryMode, non_blank, validate_coordinates};
use crate::provider::{GeoError, GeoResult, GeoapifyClient, ProviderResponse, QueryParams};

const ENDPOINT: &str = "/v1/postcode/search";

/// Parameters for postcode search.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PostcodeSearchParams {
    /// Postcode to search for.
    #[serde(default)]
    pub postcode: Option<String>,

    /// Latitude; used together with `lon` when no postcode is given.
    #[serde(default)]
    pub lat: Option<f64>,

    /// Longitude; used together with `lat` when no postcode is given.
    #[serde(default)]
    pub lon: Option<f64>,

    /// ISO 3166-1 alpha-2 country code, lowercase.
    #[serde(default)]
    pub country_code: Option<String>,

    /// Centroid points ('point', default) or original postcode polygons ('polygon').
    #[serde(default)]
    pub geometry_mode: Option<GeometryMode>,

    /// Response language code.
    #[serde(default)]
    pub language: Option<String>,

    /// 1-based page number; 20 results per page.
    #[serde(default)]
    pub page: Option<u32>,
}

/// Postcode search tool.
pub struct PostcodeSearchTool;

#[async_trait]
impl GeoTool for PostcodeSearchTool {
    const NAME: &'static str = "postcode_search";

    const DESCRIPTION: &'static str = "Find a postcode by text or by location. Returns up to 20 results as a GeoJSON FeatureCollection.";

    type Params = PostcodeSearchParams;
    type Output = Value;

    #[instrument(skip_all, fields(postcode = ?params.postcode))]
    async fn run(client: &GeoapifyClient, params: Self::Params) -> GeoResult<Value> {
        let postcode = non_blank(params.postcode.as_deref());
        match (postcode, params.lat, params.lon) {
            (_, Some(lat), Some(lon)) => validate_coordinates(lat, lon)?,
            (Some(_), _, _) => {}
            _ => {
                return Err(GeoError::validation(
                    "Either 'postcode' or both 'lat' and 'lon' parameters are required",
                ));
            }
        }

        let mut query = QueryParams::new();
        query.push_opt("postcode", postcode);
        query.push_opt("lat", params.lat);
        query.push_opt("lon", params.lon);
        push_postcode_options(
            &mut query,
            params.country_code.as_deref(),
            params.geometry_mode,
            params.language.as_deref(),
            params.page,
        )?;

        let response = client.get(ENDPOINT, &query).await?;
        let defaults = PostcodeDefaults {
            postcode: postcode.unwrap_or_default(),
            country_code: params.country_code.as_deref().unwrap_or_default(),
        };
        Ok(defaults.normalize(response))
    }
}

/// Values written into features that lack them.
struct PostcodeDefaults<'a> {
    postcode: &'a str,
    country_code: &'a str,
}

impl PostcodeDefaults<'_> {
    /// Turn any response into a repaired FeatureCollection.
    fn normalize(&self, response: ProviderResponse) -> Value {
        match response {
            ProviderResponse::FeatureCollection(mut body) => {
                if let Some(Value::Array(features)) = body.get_mut("features") {
                    features.iter_mut().for_each(|feature| self.repair(feature));
                }
                Value::Object(body)
            }
            ProviderResponse::Feature(body) => {
                let mut feature = Value::Object(body);
                self.repair(&mut feature);
                json!({"type": "FeatureCollection", "features": [feature]})
            }
            other => {
                debug!("Unexpected postcode response shape: {:?}", other);
                json!({"type": "FeatureCollection", "features": []})
            }
        }
    }

    fn repair(&self, feature: &mut Value) {
        let Some(feature) = feature.as_object_mut() else {
            return;
        };

        let inner = feature
            .get_mut("geometry")
            .filter(|g| g.get("type").and_then(Value::as_str) == Some("Feature"))
            .and_then(|g| g.as_object_mut())
            .and_then(|g| g.remove("geometry"));
        if let Some(inner) = inner {
            feature.insert("geometry".to_string(), inner);
        }

        let has_properties = feature
            .get("properties")
            .and_then(Value::as_object)
            .is_some_and(|p| !p.is_empty());
        if !has_properties {
            feature.insert("properties".to_string(), Value::Object(Map::new()));
        }

        if let Some(Value::Object(properties)) = feature.get_mut("properties") {
            properties
                .entry("postcode")
                .or_insert_with(|| Value::String(self.postcode.to_string()));
            properties
                .entry("country_code")
                .or_insert_with(|| Value::String(self.country_code.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::testing::{mock_client, offline_client};
    use httpmock::prelude::*;

    const DEFAULTS: PostcodeDefaults<'static> = PostcodeDefaults {
        postcode: "10117",
        country_code: "de",
    };

    #[test]
    fn test_nested_feature_geometry_unwrapped() {
        let response = ProviderResponse::from(json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [13.39, 52.51]}
                },
                "properties": {"postcode": "10117", "country_code": "de", "city": "Berlin"}
            }]
        }));

        let output = DEFAULTS.normalize(response);
        let feature = &output["features"][0];
        assert_eq!(
            feature["geometry"],
            json!({"type": "Point", "coordinates": [13.39, 52.51]})
        );
        assert_eq!(feature["properties"]["city"], "Berlin");
    }

    #[test]
    fn test_missing_properties_filled() {
        let response = ProviderResponse::from(json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": null, "properties": null},
                {"type": "Feature", "geometry": null, "properties": {"postcode": "10115"}}
            ]
        }));

        let output = DEFAULTS.normalize(response);
        assert_eq!(
            output["features"][0]["properties"],
            json!({"postcode": "10117", "country_code": "de"})
        );
        assert_eq!(output["features"][1]["properties"]["postcode"], "10115");
        assert_eq!(output["features"][1]["properties"]["country_code"], "de");
    }

    #[test]
    fn test_bare_feature_wrapped() {
        let response = ProviderResponse::from(json!({
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
            "properties": {}
        }));

        let defaults = PostcodeDefaults {
            postcode: "",
            country_code: "",
        };
        let output = defaults.normalize(response);
        assert_eq!(output["type"], "FeatureCollection");
        assert_eq!(output["features"].as_array().unwrap().len(), 1);
        assert_eq!(output["features"][0]["properties"]["postcode"], "");
    }

    #[test]
    fn test_unknown_shape_is_empty_collection() {
        let output = DEFAULTS.normalize(ProviderResponse::from(json!(["unexpected"])));
        assert_eq!(output, json!({"type": "FeatureCollection", "features": []}));
    }

    #[tokio::test]
    async fn test_search_by_postcode_query() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(ENDPOINT)
                    .query_param("postcode", "75001")
                    .query_param("countrycode", "fr")
                    .query_param("geometry", "original")
                    .query_param("limit", "20")
                    .query_param("offset", "20")
                    .query_param("format", "geojson");
                then.status(200).json_body(json!({
                    "type": "FeatureCollection",
                    "features": [{"type": "Feature", "geometry": null, "properties": {}}]
                }));
            })
            .await;

        let client = mock_client(server.base_url());
        let params: PostcodeSearchParams = serde_json::from_value(json!({
            "postcode": "75001",
            "country_code": "fr",
            "geometry_mode": "polygon",
            "page": 2
        }))
        .unwrap();
        let output = PostcodeSearchTool::run(&client, params).await.unwrap();

        mock.assert_async().await;
        assert_eq!(output["features"][0]["properties"]["postcode"], "75001");
        assert_eq!(output["features"][0]["properties"]["country_code"], "fr");
    }

    #[tokio::test]
    async fn test_requires_postcode_or_location() {
        let client = offline_client();
        let params: PostcodeSearchParams =
            serde_json::from_value(json!({"lat": 48.85, "country_code": "fr"})).unwrap();
        let err = PostcodeSearchTool::run(&client, params).await.unwrap_err();
        assert!(err.is_validation());
    }
}
