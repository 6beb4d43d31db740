//! Map matching tool definition.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use crate::domains::tools::GeoTool;
use crate::domains::tools::definitions::common::require_text;
use crate::provider::{GeoError, GeoResult, GeoapifyClient, QueryParams};

const ENDPOINT: &str = "/v1/mapmatching";

/// Parameters for map matching.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MapMatchingParams {
    /// Travel mode, e.g. 'drive', 'walk', 'bicycle'.
    pub mode: String,

    /// GPS track points, e.g. `{"location": [lon, lat], "timestamp": "..."}`; forwarded unchanged.
    pub waypoints: Vec<Value>,
}

pub struct MapMatchingTool;

#[async_trait]
impl GeoTool for MapMatchingTool {
    const NAME: &'static str = "map_matching";

    const DESCRIPTION: &'static str = "Snap a raw GPS track to the road network. Returns the matched route geometry as GeoJSON.";

    type Params = MapMatchingParams;
    type Output = Value;

    #[instrument(skip_all, fields(mode = %params.mode, points = params.waypoints.len()))]
    async fn run(client: &GeoapifyClient, params: Self::Params) -> GeoResult<Value> {
        require_text("mode", &params.mode)?;
        if params.waypoints.is_empty() {
            return Err(GeoError::validation("waypoints parameter is required"));
        }

        let body = json!({"mode": params.mode, "waypoints": params.waypoints});
        Ok(client
            .post(ENDPOINT, &QueryParams::new(), &body)
            .await?
            .into_value())
    }
}
