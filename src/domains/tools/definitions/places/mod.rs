//! Places tools: POI search and place details.

mod details;
mod search;

pub use details::{PlaceDetailsParams, PlaceDetailsTool};
pub use search::{PlacesSearchParams, PlacesSearchTool};
