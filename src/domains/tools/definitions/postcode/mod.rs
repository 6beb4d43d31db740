//! Postcode tools: search by code or location, and list within an area.

mod list;
mod search;

pub use list::{PostcodeListParams, PostcodeListTool};
pub use search::{PostcodeSearchParams, PostcodeSearchTool};

use crate::domains::tools::definitions::common::{GeometryMode, push_page};
use crate::provider::{GeoResult, QueryParams};

/// Fields shared by both postcode endpoints.
fn push_postcode_options(
    query: &mut QueryParams,
    country_code: Option<&str>,
    geometry_mode: Option<GeometryMode>,
    language: Option<&str>,
    page: Option<u32>,
) -> GeoResult<()> {
    push_page(query, page)?;
    query.push("format", "geojson");
    query.push_opt("countrycode", country_code);
    query.push("geometry", geometry_mode.unwrap_or_default().provider_value());
    query.push_opt("lang", language);
    Ok(())
}
