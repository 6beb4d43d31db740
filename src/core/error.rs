//! Error types and handling for the MCP server.
//!
//! This module defines the crate-level error used while booting and running
//! the server. Individual tool calls report failures through
//! [`GeoError`](crate::provider::GeoError) instead.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the Geoapify gateway.
    #[error("Provider error: {0}")]
    Provider(#[from] crate::provider::GeoError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
