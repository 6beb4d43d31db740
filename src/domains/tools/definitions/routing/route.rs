//! Turn-by-turn routing tool definition.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, instrument};

use crate::domains::tools::GeoTool;
use crate::domains::tools::definitions::common::{
    TravelMode, metres_to_km, number_or_zero, seconds_to_min,
};
use crate::provider::{GeoError, GeoResult, GeoapifyClient, QueryParams};

const ENDPOINT: &str = "/v1/routing";

/// Parameters for route calculation.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetRouteParams {
    /// Locations in order (start, via..., destination) as 'lat,lon' strings.
    pub waypoints: Vec<String>,

    /// Travel mode: driving (default), walking, cycling or transit.
    #[serde(default)]
    pub mode: Option<TravelMode>,
}

/// Simplified route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub distance_km: f64,
    pub duration_min: f64,
    pub steps: Vec<RouteStep>,
    pub geometry: Value,
}

/// One navigation instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteStep {
    pub instruction: String,
    pub distance_m: f64,
    pub duration_s: f64,
}

impl RouteSummary {
    /// Answer used when the provider found no route.
    fn empty() -> Self {
        Self {
            distance_km: 0.0,
            duration_min: 0.0,
            steps: Vec::new(),
            geometry: json!({"type": "LineString", "coordinates": []}),
        }
    }

    fn from_feature(feature: &Value) -> Self {
        let missing = Value::Null;
        let properties = feature.get("properties").unwrap_or(&missing);

        let steps = properties
            .get("legs")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|leg| leg.get("steps").and_then(Value::as_array))
            .flatten()
            .map(RouteStep::from_value)
            .collect();

        Self {
            distance_km: metres_to_km(number_or_zero(properties, "distance")),
            duration_min: seconds_to_min(number_or_zero(properties, "time")),
            steps,
            geometry: feature.get("geometry").cloned().unwrap_or_else(|| json!({})),
        }
    }
}

impl RouteStep {
    fn from_value(step: &Value) -> Self {
        Self {
            instruction: step
                .pointer("/instruction/text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            distance_m: number_or_zero(step, "distance"),
            duration_s: number_or_zero(step, "time"),
        }
    }
}

/// Routing tool - distance, duration, steps and geometry between waypoints.
pub struct GetRouteTool;

#[async_trait]
impl GeoTool for GetRouteTool {
    const NAME: &'static str = "get_route";

    const DESCRIPTION: &'static str = "Calculate a route with step-by-step navigation, total distance (km) and travel time (minutes). \
        Waypoints are 'lat,lon' strings in travel order.";

    type Params = GetRouteParams;
    type Output = RouteSummary;

    #[instrument(skip_all, fields(waypoints = params.waypoints.len(), mode = ?params.mode))]
    async fn run(client: &GeoapifyClient, params: Self::Params) -> GeoResult<RouteSummary> {
        if params.waypoints.len() < 2 {
            return Err(GeoError::validation("At least 2 waypoints are required"));
        }

        let query = QueryParams::new()
            .with("waypoints", params.waypoints.join("|"))
            .with("mode", params.mode.unwrap_or_default().provider_mode())
            .with("details", "instruction_text")
            .with("format", "geojson");

        let response = client.get(ENDPOINT, &query).await?;
        match response.features().first() {
            Some(feature) => Ok(RouteSummary::from_feature(feature)),
            None => {
                debug!("No route found");
                Ok(RouteSummary::empty())
            }
        }
    }
}
