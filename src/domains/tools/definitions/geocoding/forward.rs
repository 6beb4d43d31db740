//! Forward geocoding tool definition.
//!
//! Turns a free-text address into coordinates, reshaped into a flat list of
//! address records.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::domains::tools::GeoTool;
use crate::domains::tools::definitions::common::{PAGE_SIZE, require_text};
use crate::provider::{GeoResult, GeoapifyClient, ProviderResponse, QueryParams};

const ENDPOINT: &str = "/v1/geocode/search";

/// Address components copied when the provider supplies them.
const ADDRESS_FIELDS: [&str; 7] = [
    "country",
    "state",
    "county",
    "city",
    "postcode",
    "street",
    "housenumber",
];

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for forward geocoding.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ForwardGeocodingParams {
    /// Full address or place in free text, e.g. '1600 Amphitheatre Pkwy, Mountain View, CA' or 'Eiffel Tower Paris'.
    pub text: String,

    /// Preferred response language code, e.g. 'en', 'de', 'fr'.
    #[serde(default)]
    pub language: Option<String>,

    /// Optional filter DSL, e.g. 'rect:minLon,minLat,maxLon,maxLat' or 'countrycode:us'.
    #[serde(default)]
    pub filter: Option<String>,

    /// Optional bias DSL, e.g. 'proximity:lon,lat' or 'countrycode:us'.
    #[serde(default)]
    pub bias: Option<String>,
}

// ============================================================================
// Output
// ============================================================================

/// Simplified geocoding answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeocodeResults {
    pub results: Vec<GeocodeResult>,
}

/// One matched address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodeResult {
    pub formatted: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Whichever of country, state, county, city, postcode, street and
    /// housenumber the provider returned.
    #[serde(flatten)]
    pub address: Map<String, Value>,
}

impl GeocodeResult {
    fn new(source: &Value, lat: Option<f64>, lon: Option<f64>) -> Self {
        let address = ADDRESS_FIELDS
            .iter()
            .filter_map(|&field| source.get(field).map(|v| (field.to_string(), v.clone())))
            .collect();

        Self {
            formatted: source
                .get("formatted")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            lat,
            lon,
            address,
        }
    }

    /// Record from a GeoJSON feature; coordinates come from the geometry.
    fn from_feature(feature: &Value) -> Self {
        let empty = Value::Object(Map::new());
        let properties = feature.get("properties").unwrap_or(&empty);
        let coordinates = feature
            .pointer("/geometry/coordinates")
            .and_then(Value::as_array)
            .filter(|c| c.len() >= 2);

        let (lat, lon) = match coordinates {
            Some(c) => (c[1].as_f64(), c[0].as_f64()),
            None => (None, None),
        };
        Self::new(properties, lat, lon)
    }

    /// Record from a `format=json` result object.
    fn from_result(result: &Value) -> Self {
        Self::new(
            result,
            result.get("lat").and_then(Value::as_f64),
            result.get("lon").and_then(Value::as_f64),
        )
    }
}

impl From<ProviderResponse> for GeocodeResults {
    fn from(response: ProviderResponse) -> Self {
        let results = match &response {
            ProviderResponse::FeatureCollection(_) => response
                .features()
                .iter()
                .map(GeocodeResult::from_feature)
                .collect(),
            ProviderResponse::Results(body) => body
                .get("results")
                .and_then(Value::as_array)
                .map(|items| items.iter().map(GeocodeResult::from_result).collect())
                .unwrap_or_default(),
            _ => Vec::new(),
        };
        Self { results }
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Forward geocoding tool - address text to coordinates.
pub struct ForwardGeocodingTool;

#[async_trait]
impl GeoTool for ForwardGeocodingTool {
    const NAME: &'static str = "forward_geocoding";

    const DESCRIPTION: &'static str = "Convert a free-text address or place name into geographic coordinates. \
        Returns up to 20 simplified results with the formatted address, lat/lon and address components.";

    type Params = ForwardGeocodingParams;
    type Output = GeocodeResults;

    #[instrument(skip_all, fields(text = %params.text))]
    async fn run(client: &GeoapifyClient, params: Self::Params) -> GeoResult<Self::Output> {
        require_text("text", &params.text)?;

        let mut query = QueryParams::new()
            .with("text", &params.text)
            .with("limit", PAGE_SIZE)
            .with("format", "json");
        query.push_opt("lang", params.language.as_deref());
        query.push_opt("filter", params.filter.as_deref());
        query.push_opt("bias", params.bias.as_deref());

        let results = GeocodeResults::from(client.get(ENDPOINT, &query).await?);
        debug!("Geocoded {} result(s)", results.results.len());
        Ok(results)
    }
}

// ============================================================================
// Tests
// ============================================================================
