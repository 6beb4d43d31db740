//! Tools domain module.
//!
//! Every Geoapify operation is exposed as one MCP tool.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `tool.rs` - The [`GeoTool`] trait plus schema, dispatch and result glue
//! - `router.rs` - Dynamic ToolRouter builder for STDIO/TCP transport
//! - `registry.rs` - Central tool registry and JSON dispatch for HTTP
//! - `error.rs` - Dispatch error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` implementing [`GeoTool`]
//! 2. Export it from `definitions/mod.rs`
//! 3. Add a route in `router.rs` and a dispatch arm in `registry.rs`
//!
//! **No need to modify `server.rs`!** The router is built dynamically.

pub mod definitions;
mod error;
mod registry;
pub mod router;
pub mod tool;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
pub use tool::GeoTool;
