//! Tool definitions module.
//!
//! One file per tool, grouped by Geoapify API family. Shared validation and
//! mode vocabularies live in `common.rs`.

pub mod boundaries;
pub mod common;
pub mod geocoding;
pub mod ip;
pub mod places;
pub mod postcode;
pub mod routing;

pub use boundaries::{BoundariesConsistsOfTool, BoundariesPartOfTool};
pub use geocoding::{ForwardGeocodingTool, ReverseGeocodingTool, SuggestPlacesTool};
pub use ip::IpToLocationTool;
pub use places::{PlaceDetailsTool, PlacesSearchTool};
pub use postcode::{PostcodeListTool, PostcodeSearchTool};
pub use routing::{
    CombineGeometriesTool, GenerateIsolineTool, GetRouteTool, GetTravelTimesTool, MapMatchingTool,
    RoutePlannerTool,
};
