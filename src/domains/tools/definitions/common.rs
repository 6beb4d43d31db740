//! Common utilities shared across Geoapify tools.
//!
//! Pagination, input validation and the travel/geometry mode vocabularies.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::provider::{GeoError, GeoResult, QueryParams};

/// Results per page; also the hard `limit` sent with every list request.
pub const PAGE_SIZE: u32 = 20;

/// Translate a 1-based page number into a provider `offset`.
///
/// `None` means the first page. Page 0 is rejected.
pub fn page_offset(page: Option<u32>) -> GeoResult<u32> {
    match page {
        None => Ok(0),
        Some(0) => Err(GeoError::validation("page must be 1 or greater")),
        Some(page) => (page - 1)
            .checked_mul(PAGE_SIZE)
            .ok_or_else(|| GeoError::validation(format!("page {page} is out of range"))),
    }
}

/// Push `limit` and `offset` for a paginated endpoint.
pub fn push_page(params: &mut QueryParams, page: Option<u32>) -> GeoResult<()> {
    let offset = page_offset(page)?;
    params.push("limit", PAGE_SIZE);
    params.push("offset", offset);
    Ok(())
}

/// Reject missing or whitespace-only text.
pub fn require_text(field: &str, value: &str) -> GeoResult<()> {
    if value.trim().is_empty() {
        return Err(GeoError::validation(format!("{field} parameter is required")));
    }
    Ok(())
}

/// Treat whitespace-only optional text as absent.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Check a WGS84 coordinate pair.
pub fn validate_coordinates(lat: f64, lon: f64) -> GeoResult<()> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(GeoError::validation("Latitude must be between -90 and 90"));
    }
    if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
        return Err(GeoError::validation("Longitude must be between -180 and 180"));
    }
    Ok(())
}

/// Push `id`, `lat` and `lon` for endpoints addressed by id or location.
///
/// Needs a non-blank `id` or both coordinates; any supplied value is sent.
pub fn push_id_or_coordinates(
    params: &mut QueryParams,
    id: Option<&str>,
    lat: Option<f64>,
    lon: Option<f64>,
) -> GeoResult<()> {
    let id = non_blank(id);
    match (id, lat, lon) {
        (_, Some(lat), Some(lon)) => validate_coordinates(lat, lon)?,
        (Some(_), _, _) => {}
        _ => {
            return Err(GeoError::validation(
                "Either 'id' or both 'lat' and 'lon' parameters are required",
            ));
        }
    }

    params.push_opt("id", id);
    params.push_opt("lat", lat);
    params.push_opt("lon", lon);
    Ok(())
}

/// Round to a fixed number of decimal places, halves to even.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Metres to kilometres, two decimals.
pub fn metres_to_km(metres: f64) -> f64 {
    round_to(metres / 1000.0, 2)
}

/// Seconds to minutes, one decimal.
pub fn seconds_to_min(seconds: f64) -> f64 {
    round_to(seconds / 60.0, 1)
}

/// Numeric field of a JSON object, 0 when missing or not a number.
pub fn number_or_zero(object: &Value, key: &str) -> f64 {
    object.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

/// Travel mode as callers name it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Cycling,
    Transit,
    /// Any other value; routed as driving.
    #[serde(other)]
    #[schemars(skip)]
    Unrecognized,
}

/// Travel mode as the routing endpoints name it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderMode {
    Drive,
    Walk,
    Bicycle,
    Transit,
}

impl TravelMode {
    pub fn provider_mode(self) -> ProviderMode {
        match self {
            Self::Driving | Self::Unrecognized => ProviderMode::Drive,
            Self::Walking => ProviderMode::Walk,
            Self::Cycling => ProviderMode::Bicycle,
            Self::Transit => ProviderMode::Transit,
        }
    }
}

impl ProviderMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Drive => "drive",
            Self::Walk => "walk",
            Self::Bicycle => "bicycle",
            Self::Transit => "transit",
        }
    }
}

impl std::fmt::Display for ProviderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Postcode geometry: centroid points or the original polygons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum GeometryMode {
    #[default]
    Point,
    Polygon,
}

impl GeometryMode {
    /// Value of the provider's `geometry` parameter.
    pub fn provider_value(self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Polygon => "original",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_offset() {
        assert_eq!(page_offset(None).unwrap(), 0);
        assert_eq!(page_offset(Some(1)).unwrap(), 0);
        assert_eq!(page_offset(Some(2)).unwrap(), 20);
        assert_eq!(page_offset(Some(5)).unwrap(), 80);
        assert!(page_offset(Some(0)).unwrap_err().is_validation());
        assert!(page_offset(Some(u32::MAX)).is_err());
    }

    #[test]
    fn test_push_page_always_sends_limit() {
        let mut params = QueryParams::new();
        push_page(&mut params, Some(3)).unwrap();
        assert_eq!(params.get("limit"), Some("20"));
        assert_eq!(params.get("offset"), Some("40"));
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(90.0, -180.0).is_ok());
        assert!(validate_coordinates(91.0, 0.0).is_err());
        assert!(validate_coordinates(0.0, 180.5).is_err());
        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
        assert!(validate_coordinates(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_id_or_coordinates() {
        let mut params = QueryParams::new();
        push_id_or_coordinates(&mut params, Some("abc"), None, None).unwrap();
        assert_eq!(params.get("id"), Some("abc"));
        assert_eq!(params.get("lat"), None);

        let mut params = QueryParams::new();
        push_id_or_coordinates(&mut params, None, Some(52.5), Some(13.4)).unwrap();
        assert_eq!(params.get("lat"), Some("52.5"));
        assert_eq!(params.get("lon"), Some("13.4"));

        let mut params = QueryParams::new();
        assert!(push_id_or_coordinates(&mut params, Some("  "), Some(1.0), None).is_err());
        assert!(params.is_empty());
    }

    #[test]
    fn test_rounding() {
        assert_eq!(metres_to_km(1500.0), 1.5);
        assert_eq!(seconds_to_min(125.0), 2.1);
        assert_eq!(metres_to_km(1234.0), 1.23);
    }

    #[test]
    fn test_rounding_halves_to_even() {
        assert_eq!(seconds_to_min(15.0), 0.2);
        assert_eq!(seconds_to_min(45.0), 0.8);
        assert_eq!(metres_to_km(125.0), 0.12);
        assert_eq!(metres_to_km(375.0), 0.38);
    }

    #[test]
    fn test_number_or_zero() {
        let entry = json!({"distance": 1000, "time": "soon"});
        assert_eq!(number_or_zero(&entry, "distance"), 1000.0);
        assert_eq!(number_or_zero(&entry, "time"), 0.0);
        assert_eq!(number_or_zero(&entry, "missing"), 0.0);
    }

    #[test]
    fn test_travel_mode_mapping() {
        let decode = |v: Value| serde_json::from_value::<TravelMode>(v).unwrap();
        assert_eq!(decode(json!("walking")).provider_mode(), ProviderMode::Walk);
        assert_eq!(decode(json!("cycling")).provider_mode(), ProviderMode::Bicycle);
        assert_eq!(decode(json!("transit")).provider_mode(), ProviderMode::Transit);
        assert_eq!(decode(json!("hovercraft")).provider_mode(), ProviderMode::Drive);
        assert_eq!(TravelMode::default().provider_mode().to_string(), "drive");
    }

    #[test]
    fn test_geometry_mode() {
        assert_eq!(GeometryMode::default().provider_value(), "point");
        assert_eq!(GeometryMode::Polygon.provider_value(), "original");
        assert!(serde_json::from_value::<GeometryMode>(json!("square")).is_err());
    }
}
