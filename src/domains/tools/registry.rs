//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The list of available tools and their metadata
//! - Dispatch of raw JSON tool calls (used by the HTTP transport)

use std::sync::Arc;

use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;
use tracing::warn;

use super::definitions::{
    BoundariesConsistsOfTool, BoundariesPartOfTool, CombineGeometriesTool, ForwardGeocodingTool,
    GenerateIsolineTool, GetRouteTool, GetTravelTimesTool, IpToLocationTool, MapMatchingTool,
    PlaceDetailsTool, PlacesSearchTool, PostcodeListTool, PostcodeSearchTool,
    ReverseGeocodingTool, RoutePlannerTool, SuggestPlacesTool,
};
use super::error::ToolError;
use super::tool::{GeoTool, call_result_to_json, execute, parse_params, to_tool};
use crate::provider::GeoapifyClient;

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    client: Arc<GeoapifyClient>,
}

impl ToolRegistry {
    /// Create a new tool registry around the shared gateway.
    pub fn new(client: Arc<GeoapifyClient>) -> Self {
        Self { client }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            ForwardGeocodingTool::NAME,
            ReverseGeocodingTool::NAME,
            SuggestPlacesTool::NAME,
            PlacesSearchTool::NAME,
            PlaceDetailsTool::NAME,
            BoundariesPartOfTool::NAME,
            BoundariesConsistsOfTool::NAME,
            GenerateIsolineTool::NAME,
            CombineGeometriesTool::NAME,
            GetRouteTool::NAME,
            GetTravelTimesTool::NAME,
            MapMatchingTool::NAME,
            RoutePlannerTool::NAME,
            PostcodeSearchTool::NAME,
            PostcodeListTool::NAME,
            IpToLocationTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            to_tool::<ForwardGeocodingTool>(),
            to_tool::<ReverseGeocodingTool>(),
            to_tool::<SuggestPlacesTool>(),
            to_tool::<PlacesSearchTool>(),
            to_tool::<PlaceDetailsTool>(),
            to_tool::<BoundariesPartOfTool>(),
            to_tool::<BoundariesConsistsOfTool>(),
            to_tool::<GenerateIsolineTool>(),
            to_tool::<CombineGeometriesTool>(),
            to_tool::<GetRouteTool>(),
            to_tool::<GetTravelTimesTool>(),
            to_tool::<MapMatchingTool>(),
            to_tool::<RoutePlannerTool>(),
            to_tool::<PostcodeSearchTool>(),
            to_tool::<PostcodeListTool>(),
            to_tool::<IpToLocationTool>(),
        ]
    }

    /// Dispatch a tool call by name.
    ///
    /// Returns the MCP result as JSON (`content`, `isError`,
    /// `structuredContent`). Unknown names and undecodable arguments are
    /// errors; failures inside the tool are reported in the result.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<Value, ToolError> {
        let result = match name {
            ForwardGeocodingTool::NAME => self.dispatch::<ForwardGeocodingTool>(arguments).await?,
            ReverseGeocodingTool::NAME => self.dispatch::<ReverseGeocodingTool>(arguments).await?,
            SuggestPlacesTool::NAME => self.dispatch::<SuggestPlacesTool>(arguments).await?,
            PlacesSearchTool::NAME => self.dispatch::<PlacesSearchTool>(arguments).await?,
            PlaceDetailsTool::NAME => self.dispatch::<PlaceDetailsTool>(arguments).await?,
            BoundariesPartOfTool::NAME => self.dispatch::<BoundariesPartOfTool>(arguments).await?,
            BoundariesConsistsOfTool::NAME => {
                self.dispatch::<BoundariesConsistsOfTool>(arguments).await?
            }
            GenerateIsolineTool::NAME => self.dispatch::<GenerateIsolineTool>(arguments).await?,
            CombineGeometriesTool::NAME => {
                self.dispatch::<CombineGeometriesTool>(arguments).await?
            }
            GetRouteTool::NAME => self.dispatch::<GetRouteTool>(arguments).await?,
            GetTravelTimesTool::NAME => self.dispatch::<GetTravelTimesTool>(arguments).await?,
            MapMatchingTool::NAME => self.dispatch::<MapMatchingTool>(arguments).await?,
            RoutePlannerTool::NAME => self.dispatch::<RoutePlannerTool>(arguments).await?,
            PostcodeSearchTool::NAME => self.dispatch::<PostcodeSearchTool>(arguments).await?,
            PostcodeListTool::NAME => self.dispatch::<PostcodeListTool>(arguments).await?,
            IpToLocationTool::NAME => self.dispatch::<IpToLocationTool>(arguments).await?,
            _ => {
                warn!("Unknown tool requested: {}", name);
                return Err(ToolError::not_found(name));
            }
        };

        Ok(call_result_to_json(result))
    }

    async fn dispatch<T: GeoTool>(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let params = parse_params::<T>(arguments)?;
        Ok(execute::<T>(&self.client, params).await)
    }
}
