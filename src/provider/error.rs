//! Error type shared by the gateway and every tool.

use thiserror::Error;

/// Result alias used by the gateway and the tool adapters.
pub type GeoResult<T> = std::result::Result<T, GeoError>;

/// Failures a tool call can end with.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Caller input was missing or out of range. Raised before any network call.
    #[error("Invalid arguments: {0}")]
    Validation(String),

    /// The gateway has no usable configuration (missing API key).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The provider answered with a non-success status.
    #[error("Geoapify API error ({status}): {message}")]
    Provider { status: u16, message: String },

    /// Connection, DNS or timeout failure.
    #[error("Request error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success status whose body was not JSON.
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

impl GeoError {
    /// Create a new validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the caller is at fault (as opposed to the provider or network).
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_message() {
        let err = GeoError::Provider {
            status: 401,
            message: "Invalid apiKey".to_string(),
        };
        assert_eq!(err.to_string(), "Geoapify API error (401): Invalid apiKey");
    }

    #[test]
    fn test_validation_flag() {
        assert!(GeoError::validation("text parameter is required").is_validation());
        assert!(!GeoError::config("missing key").is_validation());
    }
}
