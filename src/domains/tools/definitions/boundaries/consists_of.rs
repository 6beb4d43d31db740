//! Child boundaries tool definition.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use super::BoundaryQuery;
use crate::domains::tools::GeoTool;
use crate::domains::tools::definitions::common::push_page;
use crate::provider::{GeoResult, GeoapifyClient, QueryParams};

const ENDPOINT: &str = "/v1/boundaries/consists-of";

/// Parameters for child boundaries.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BoundariesConsistsOfParams {
    /// Parent boundary or place id.
    #[serde(default)]
    pub id: Option<String>,

    /// Latitude; used together with `lon` when no id is given.
    #[serde(default)]
    pub lat: Option<f64>,

    /// Longitude; used together with `lat` when no id is given.
    #[serde(default)]
    pub lon: Option<f64>,

    /// Boundary class for the children.
    #[serde(default)]
    pub boundaries: Option<String>,

    /// Return children at exactly this administrative level.
    #[serde(default)]
    pub sublevel: Option<u32>,

    /// Geometry simplification level for returned boundaries.
    #[serde(default)]
    pub geometry_level: Option<String>,

    /// 1-based page number; 20 results per page.
    #[serde(default)]
    pub page: Option<u32>,

    /// Response language code.
    #[serde(default)]
    pub language: Option<String>,
}

/// Child boundaries tool.
pub struct BoundariesConsistsOfTool;

#[async_trait]
impl GeoTool for BoundariesConsistsOfTool {
    const NAME: &'static str = "boundaries_consists_of";

    const DESCRIPTION: &'static str = "Return child boundaries (subdivisions) for a boundary or place. \
        Always a GeoJSON FeatureCollection of area polygons, 20 per page.";

    type Params = BoundariesConsistsOfParams;
    type Output = Value;

    #[instrument(skip_all, fields(id = ?params.id, page = ?params.page))]
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
        push_page(&mut query, params.page)?;

        Ok(client.get(ENDPOINT, &query).await?.into_value())
    }
}
