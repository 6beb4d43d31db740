//! IP geolocation.

mod location;

pub use location::{IpLocation, IpToLocationParams, IpToLocationTool};
