//! Geoapify MCP Server Library
//!
//! Exposes the Geoapify geocoding, places, boundaries, routing, postcode and
//! IP geolocation APIs as Model Context Protocol tools.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the MCP server and transports
//! - **provider**: The Geoapify request gateway (credential injection,
//!   HTTP calls, error normalization, response classification)
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: One MCP tool per Geoapify operation
//!
//! # Example
//!
//! ```rust,no_run
//! use geoapify_mcp_server::core::{Config, GeoapifyServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     config.validate()?;
//!     let server = GeoapifyServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;
pub mod provider;

// Re-export commonly used types for convenience
pub use core::{Config, Error, GeoapifyServer, Result};
pub use provider::{GeoError, GeoapifyClient};
