//! Geoapify request gateway.
//!
//! Every tool reaches the provider through [`GeoapifyClient`], which owns the
//! API credential, the HTTP client and the error normalization. Responses are
//! decoded once into a [`ProviderResponse`] so tools can match on the shape
//! instead of probing raw JSON.
//!
//! - `client.rs` - HTTP gateway (credential injection, GET/POST, errors)
//! - `params.rs` - ordered query-string builder
//! - `response.rs` - tagged union over the provider's response shapes
//! - `error.rs` - the single error type surfaced by every tool

mod client;
mod error;
mod params;
mod response;

pub use client::{DEFAULT_BASE_URL, GeoapifyClient};
pub use error::{GeoError, GeoResult};
pub use params::QueryParams;
pub use response::ProviderResponse;
