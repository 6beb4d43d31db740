//! Place details tool definition.
//!
//! Returns a single GeoJSON Feature with the place's original geometry
//! (Point, Polygon or MultiPolygon).

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, instrument};

use crate::domains::tools::GeoTool;
use crate::domains::tools::definitions::common::push_id_or_coordinates;
use crate::provider::{GeoResult, GeoapifyClient, QueryParams};

const ENDPOINT: &str = "/v2/place-details";

/// Parameters for place details.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PlaceDetailsParams {
    /// Place id from places_search or forward_geocoding.
    #[serde(default)]
    pub id: Option<String>,

    /// Latitude; used together with `lon` when no id is given.
    #[serde(default)]
    pub lat: Option<f64>,

    /// Longitude; used together with `lat` when no id is given.
    #[serde(default)]
    pub lon: Option<f64>,

    /// Response language code.
    #[serde(default)]
    pub language: Option<String>,
}

/// Place details tool - one enriched feature for an id or location.
pub struct PlaceDetailsTool;

#[async_trait]
impl GeoTool for PlaceDetailsTool {
    const NAME: &'static str = "place_details";

    const DESCRIPTION: &'static str = "Get details for a place by id or coordinates. Returns a single GeoJSON Feature with the ORIGINAL geometry.";

    type Params = PlaceDetailsParams;
    type Output = Value;

    #[instrument(skip_all, fields(id = ?params.id))]
    async fn run(client: &GeoapifyClient, params: Self::Params) -> GeoResult<Value> {
        let mut query = QueryParams::new().with("features", "details");
        push_id_or_coordinates(&mut query, params.id.as_deref(), params.lat, params.lon)?;
        query.push_opt("lang", params.language.as_deref());

        let response = client.get(ENDPOINT, &query).await?;
        match response.features().first() {
            Some(feature) => Ok(feature.clone()),
            None => {
                debug!("No place details found");
                Ok(placeholder_feature(params.lat, params.lon))
            }
        }
    }
}

/// Stand-in answer when the provider has no details.
fn placeholder_feature(lat: Option<f64>, lon: Option<f64>) -> Value {
    json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            "coordinates": [lon.unwrap_or(0.0), lat.unwrap_or(0.0)]
        },
        "properties": {"formatted": "No details found"}
    })
}
