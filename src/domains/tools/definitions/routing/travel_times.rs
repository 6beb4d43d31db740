//! Travel-time matrix tool definition.
//!
//! Origins and destinations arrive as `"lat,lon"` strings. Entries that do
//! not parse are dropped; the matrix is shaped by the ones that remain.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, instrument};

use crate::domains::tools::GeoTool;
use crate::domains::tools::definitions::common::{
    TravelMode, metres_to_km, number_or_zero, seconds_to_min,
};
use crate::provider::{GeoError, GeoResult, GeoapifyClient, QueryParams};

const ENDPOINT: &str = "/v1/routematrix";

/// Parameters for the travel-time matrix.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetTravelTimesParams {
    /// Starting locations as 'lat,lon' strings.
    pub origins: Vec<String>,

    /// Target locations as 'lat,lon' strings.
    pub destinations: Vec<String>,

    /// Travel mode: driving (default), walking, cycling or transit.
    #[serde(default)]
    pub mode: Option<TravelMode>,
}

/// Origins × destinations matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TravelTimeMatrix {
    pub matrix: Vec<Vec<MatrixCell>>,
}

/// Distance and duration for one origin/destination pair; both `null`
/// when the provider had no route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MatrixCell {
    pub distance_km: Option<f64>,
    pub duration_min: Option<f64>,
}

impl MatrixCell {
    fn from_entry(entry: Option<&Value>) -> Self {
        match entry {
            Some(entry @ Value::Object(fields)) if !fields.is_empty() => Self {
                distance_km: Some(metres_to_km(number_or_zero(entry, "distance"))),
                duration_min: Some(seconds_to_min(number_or_zero(entry, "time"))),
            },
            _ => Self::default(),
        }
    }
}

/// Parse `"lat,lon"` into the provider's `[lon, lat]` order.
fn parse_location(raw: &str) -> Option<[f64; 2]> {
    let (lat, lon) = raw.split_once(',')?;
    if lon.contains(',') {
        return None;
    }
    let lat: f64 = lat.trim().parse().ok()?;
    let lon: f64 = lon.trim().parse().ok()?;
    (lat.is_finite() && lon.is_finite()).then_some([lon, lat])
}

/// Provider location objects for every parseable entry.
fn parse_locations(raw: &[String], label: &str) -> GeoResult<Vec<Value>> {
    if raw.is_empty() {
        return Err(GeoError::validation(format!("At least one {label} is required")));
    }

    let locations: Vec<Value> = raw
        .iter()
        .filter_map(|entry| match parse_location(entry) {
            Some(location) => Some(json!({ "location": location })),
            None => {
                debug!("Dropping unparseable {}: {:?}", label, entry);
                None
            }
        })
        .collect();

    if locations.is_empty() {
        return Err(GeoError::validation(format!("No valid {label}s provided")));
    }
    Ok(locations)
}

/// Shape the provider's `sources_to_targets` into `rows × cols` cells.
///
/// Accepts both a 2D array and a flat row-major one; gaps become empty cells.
fn build_matrix(data: &[Value], rows: usize, cols: usize) -> Vec<Vec<MatrixCell>> {
    let nested = data.first().is_some_and(Value::is_array);

    (0..rows)
        .map(|i| {
            (0..cols)
                .map(|j| {
                    let entry = if nested {
                        data.get(i).and_then(|row| row.get(j))
                    } else {
                        data.get(i * cols + j)
                    };
                    MatrixCell::from_entry(entry)
                })
                .collect()
        })
        .collect()
}

/// Locate the matrix data in an object or bare-array response.
fn matrix_data(response: Value) -> Vec<Value> {
    match response {
        Value::Array(items) => items,
        Value::Object(mut body) => match body.remove("sources_to_targets") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Travel-time matrix tool.
pub struct GetTravelTimesTool;

#[async_trait]
impl GeoTool for GetTravelTimesTool {
    const NAME: &'static str = "get_travel_times";

    const DESCRIPTION: &'static str = "Compare travel distances (km) and durations (minutes) between multiple origins and destinations in a matrix. \
        Locations are 'lat,lon' strings.";

    type Params = GetTravelTimesParams;
    type Output = TravelTimeMatrix;

    #[instrument(skip_all, fields(origins = params.origins.len(), destinations = params.destinations.len()))]
    async fn run(client: &GeoapifyClient, params: Self::Params) -> GeoResult<TravelTimeMatrix> {
        let sources = parse_locations(&params.origins, "origin")?;
        let targets = parse_locations(&params.destinations, "destination")?;
        let (rows, cols) = (sources.len(), targets.len());

        let body = json!({
            "mode": params.mode.unwrap_or_default().provider_mode(),
            "sources": sources,
            "targets": targets,
        });

        let response = client.post(ENDPOINT, &QueryParams::new(), &body).await?;
        let data = matrix_data(response.into_value());

        Ok(TravelTimeMatrix {
            matrix: build_matrix(&data, rows, cols),
        })
    }
}
