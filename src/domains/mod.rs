//! Domains module containing business logic organized by bounded contexts.
//!
//! The server currently exposes a single domain: Geoapify-backed tools.

pub mod tools;
