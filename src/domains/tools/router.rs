//! Tool Router - builds the rmcp ToolRouter for STDIO/TCP transport.
//!
//! Every route shares the same gateway; routes are created generically from
//! each tool's [`GeoTool`](super::GeoTool) implementation.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{
    BoundariesConsistsOfTool, BoundariesPartOfTool, CombineGeometriesTool, ForwardGeocodingTool,
    GenerateIsolineTool, GetRouteTool, GetTravelTimesTool, IpToLocationTool, MapMatchingTool,
    PlaceDetailsTool, PlacesSearchTool, PostcodeListTool, PostcodeSearchTool,
    ReverseGeocodingTool, RoutePlannerTool, SuggestPlacesTool,
};
use super::tool::create_route;
use crate::provider::GeoapifyClient;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(client: Arc<GeoapifyClient>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(create_route::<S, ForwardGeocodingTool>(client.clone()))
        .with_route(create_route::<S, ReverseGeocodingTool>(client.clone()))
        .with_route(create_route::<S, SuggestPlacesTool>(client.clone()))
        .with_route(create_route::<S, PlacesSearchTool>(client.clone()))
        .with_route(create_route::<S, PlaceDetailsTool>(client.clone()))
        .with_route(create_route::<S, BoundariesPartOfTool>(client.clone()))
        .with_route(create_route::<S, BoundariesConsistsOfTool>(client.clone()))
        .with_route(create_route::<S, GenerateIsolineTool>(client.clone()))
        .with_route(create_route::<S, CombineGeometriesTool>(client.clone()))
        .with_route(create_route::<S, GetRouteTool>(client.clone()))
        .with_route(create_route::<S, GetTravelTimesTool>(client.clone()))
        .with_route(create_route::<S, MapMatchingTool>(client.clone()))
        .with_route(create_route::<S, RoutePlannerTool>(client.clone()))
        .with_route(create_route::<S, PostcodeSearchTool>(client.clone()))
        .with_route(create_route::<S, PostcodeListTool>(client.clone()))
        .with_route(create_route::<S, IpToLocationTool>(client))
}
