//! Routing tools: isolines, geometry operations, routes, travel-time
//! matrices, map matching and route planning.

mod combine;
mod isoline;
mod map_matching;
mod route;
mod route_planner;
mod travel_times;

pub use combine::{CombineGeometriesParams, CombineGeometriesTool, GeometryOperation};
pub use isoline::{GenerateIsolineParams, GenerateIsolineTool, IsolineRange, IsolineType};
pub use map_matching::{MapMatchingParams, MapMatchingTool};
pub use route::{GetRouteParams, GetRouteTool, RouteStep, RouteSummary};
pub use route_planner::{RoutePlannerParams, RoutePlannerTool};
pub use travel_times::{GetTravelTimesParams, GetTravelTimesTool, MatrixCell, TravelTimeMatrix};
