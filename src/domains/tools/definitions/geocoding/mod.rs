//! Geocoding tools: forward, reverse and autocomplete.

mod forward;
mod reverse;
mod suggest;

pub use forward::{ForwardGeocodingParams, ForwardGeocodingTool, GeocodeResult, GeocodeResults};
pub use reverse::{ReverseGeocodingParams, ReverseGeocodingTool};
pub use suggest::{SuggestPlacesParams, SuggestPlacesTool};
