//! MCP Server implementation and lifecycle management.
//!
//! The server owns the shared Geoapify gateway and the tool router built
//! from it. Tools are defined in `domains/tools/definitions/`, one file per
//! tool; **adding a new tool does NOT require modifying this file.**

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;

use super::config::Config;
use super::error;
use crate::domains::tools::{ToolError, ToolRegistry, build_tool_router};
use crate::provider::GeoapifyClient;

const INSTRUCTIONS: &str = "Geospatial tools backed by the Geoapify API: forward/reverse geocoding, \
     autocomplete, places and place details, administrative boundaries, isolines, \
     routing, travel-time matrices, map matching, route planning, postcodes and \
     IP geolocation. Coordinates are WGS84 latitude/longitude.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct GeoapifyServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Gateway shared by every tool route.
    client: Arc<GeoapifyClient>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl GeoapifyServer {
    /// Create a new server with the given configuration.
    pub fn new(config: Config) -> error::Result<Self> {
        let client = Arc::new(GeoapifyClient::new(&config.provider)?);
        Ok(Self::with_client(config, client))
    }

    /// Create a server around an existing gateway.
    pub fn with_client(config: Config, client: Arc<GeoapifyClient>) -> Self {
        Self {
            tool_router: build_tool_router::<Self>(client.clone()),
            config: Arc::new(config),
            client,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Instructions reported to clients on initialize.
    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        ToolRegistry::get_all_tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        ToolRegistry::new(self.client.clone())
            .call_tool(name, arguments)
            .await
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for GeoapifyServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::testing::offline_client;

    fn test_server() -> GeoapifyServer {
        GeoapifyServer::with_client(Config::default(), Arc::new(offline_client()))
    }

    #[test]
    fn test_list_tools_has_schemas() {
        let tools = test_server().list_tools();
        assert_eq!(tools.len(), 16);
        assert!(tools.iter().all(|t| t["inputSchema"].is_object()));
    }

    #[test]
    fn test_listed_tools_match_router() {
        let server = test_server();
        let listed: Vec<_> = server.list_tools().into_iter().map(|t| t["name"].clone()).collect();
        let routed = server.tool_router.list_all();
        assert_eq!(listed.len(), routed.len());
        for tool in routed {
            assert!(listed.contains(&serde_json::json!(tool.name)));
        }
    }

    #[test]
    fn test_server_info_enables_tools() {
        let info = test_server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
    }

    #[tokio::test]
    async fn test_call_unknown_tool() {
        let result = test_server().call_tool("nope", serde_json::json!({})).await;
        assert!(matches!(result, Err(ToolError::NotFound(_))));
    }

    #[test]
    fn test_new_builds_without_key() {
        let server = GeoapifyServer::new(Config::default()).unwrap();
        assert_eq!(server.name(), "geoapify-mcp-server");
    }
}
