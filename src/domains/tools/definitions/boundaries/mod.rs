//! Administrative boundary tools: parents (`part-of`) and children
//! (`consists-of`) of a place or boundary.

mod consists_of;
mod part_of;

pub use consists_of::{BoundariesConsistsOfParams, BoundariesConsistsOfTool};
pub use part_of::{BoundariesPartOfParams, BoundariesPartOfTool};

use crate::domains::tools::definitions::common::push_id_or_coordinates;
use crate::provider::{GeoResult, QueryParams};

/// Query fields both boundary endpoints accept.
struct BoundaryQuery<'a> {
    id: Option<&'a str>,
    lat: Option<f64>,
    lon: Option<f64>,
    boundaries: Option<&'a str>,
    sublevel: Option<u32>,
    geometry_level: Option<&'a str>,
    language: Option<&'a str>,
}

impl BoundaryQuery<'_> {
    /// Validate the target and append every supplied field to `query`.
    fn push_into(&self, query: &mut QueryParams) -> GeoResult<()> {
        push_id_or_coordinates(query, self.id, self.lat, self.lon)?;
        query.push("format", "geojson");
        query.push_opt("boundaries", self.boundaries);
        query.push_opt("sublevel", self.sublevel);
        query.push_opt("geometry", self.geometry_level);
        query.push_opt("lang", self.language);
        Ok(())
    }
}
