//! Reverse geocoding tool definition.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use crate::domains::tools::GeoTool;
use crate::domains::tools::definitions::common::{PAGE_SIZE, validate_coordinates};
use crate::provider::{GeoResult, GeoapifyClient, QueryParams};

const ENDPOINT: &str = "/v1/geocode/reverse";

/// Parameters for reverse geocoding.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ReverseGeocodingParams {
    /// Latitude (-90 to 90).
    pub lat: f64,

    /// Longitude (-180 to 180).
    pub lon: f64,

    /// Preferred response language code, e.g. 'en', 'de', 'fr'.
    #[serde(default)]
    pub language: Option<String>,
}

/// Reverse geocoding tool - coordinates to the nearest addresses.
pub struct ReverseGeocodingTool;

#[async_trait]
impl GeoTool for ReverseGeocodingTool {
    const NAME: &'static str = "reverse_geocoding";

    const DESCRIPTION: &'static str = "Convert coordinates to the nearest address/place. Returns up to 20 results as a GeoJSON FeatureCollection.";

    type Params = ReverseGeocodingParams;
    type Output = Value;

    #[instrument(skip_all, fields(lat = params.lat, lon = params.lon))]
    async fn run(client: &GeoapifyClient, params: Self::Params) -> GeoResult<Value> {
        validate_coordinates(params.lat, params.lon)?;

        let mut query = QueryParams::new()
            .with("lat", params.lat)
            .with("lon", params.lon)
            .with("limit", PAGE_SIZE)
            .with("format", "geojson");
        query.push_opt("lang", params.language.as_deref());

        Ok(client.get(ENDPOINT, &query).await?.into_value())
    }
}
