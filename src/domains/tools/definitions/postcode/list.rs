//! Postcode list tool definition.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use super::push_postcode_options;
use crate::domains::tools::GeoTool;
use crate::domains::tools::definitions::common::GeometryMode;
use crate::provider::{GeoResult, GeoapifyClient, QueryParams};

const ENDPOINT: &str = "/v1/postcode/list";

/// Parameters for listing postcodes.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PostcodeListParams {
    /// Free-text filter (postcode, place name).
    #[serde(default)]
    pub text: Option<String>,

    /// Spatial filter DSL: 'rect:minLon,minLat,maxLon,maxLat', 'circle:lon,lat,radius_m', 'place:ID' or 'countrycode:xx'.
    #[serde(default)]
    pub filter: Option<String>,

    /// Bias DSL, e.g. 'proximity:lon,lat'.
    #[serde(default)]
    pub bias: Option<String>,

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

pub struct PostcodeListTool;

#[async_trait]
impl GeoTool for PostcodeListTool {
    const NAME: &'static str = "postcode_list";

    const DESCRIPTION: &'static str = "List postcodes within a spatial or text filter. \
        Always returns a GeoJSON FeatureCollection with up to 20 results per page.";

    type Params = PostcodeListParams;
    type Output = Value;

    #[instrument(skip_all, fields(page = ?params.page))]
    async fn run(client: &GeoapifyClient, params: Self::Params) -> GeoResult<Value> {
        let mut query = QueryParams::new();
        query.push_opt("text", params.text.as_deref());
        query.push_opt("filter", params.filter.as_deref());
        query.push_opt("bias", params.bias.as_deref());
        push_postcode_options(
            &mut query,
            params.country_code.as_deref(),
            params.geometry_mode,
            params.language.as_deref(),
            params.page,
        )?;

        Ok(client.get(ENDPOINT, &query).await?.into_value())
    }
}
