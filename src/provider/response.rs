//! Provider response shapes.

use serde_json::{Map, Value};

/// A decoded provider response.
///
/// Geoapify endpoints answer with GeoJSON collections, single features,
/// plain `results` objects, async job tickets or bare arrays. The gateway
/// classifies the body once; every variant keeps the complete original JSON
/// so tools that pass responses through can recover it with
/// [`into_value`](Self::into_value).
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderResponse {
    /// Object carrying a `features` array.
    FeatureCollection(Map<String, Value>),
    /// Object whose `type` is `"Feature"`.
    Feature(Map<String, Value>),
    /// Object carrying a `results` array (`format=json`).
    Results(Map<String, Value>),
    /// Async operation handle: an `id` and no `features`.
    JobTicket { id: String, body: Map<String, Value> },
    /// Top-level JSON array.
    List(Vec<Value>),
    /// Anything else.
    Other(Value),
}

impl ProviderResponse {
    /// Features of a collection; empty for every other shape.
    pub fn features(&self) -> &[Value] {
        match self {
            Self::FeatureCollection(body) => body
                .get("features")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default(),
            _ => &[],
        }
    }

    /// Give back the JSON exactly as the provider sent it.
    pub fn into_value(self) -> Value {
        match self {
            Self::FeatureCollection(body)
            | Self::Feature(body)
            | Self::Results(body)
            | Self::JobTicket { body, .. } => Value::Object(body),
            Self::List(items) => Value::Array(items),
            Self::Other(value) => value,
        }
    }
}

impl From<Value> for ProviderResponse {
    fn from(value: Value) -> Self {
        let body = match value {
            Value::Object(body) => body,
            Value::Array(items) => return Self::List(items),
            other => return Self::Other(other),
        };

        // GeoJSON features may carry their own `id`; they are never job tickets.
        if body.get("type").and_then(Value::as_str) == Some("Feature") {
            return Self::Feature(body);
        }
        if body.get("features").is_some_and(Value::is_array) {
            return Self::FeatureCollection(body);
        }
        if body.get("results").is_some_and(Value::is_array) {
            return Self::Results(body);
        }
        if !body.contains_key("features") {
            // Only scalar ids can be fetched back; anything else stays `Other`.
            let id = match body.get("id") {
                Some(Value::String(id)) => Some(id.clone()),
                Some(Value::Number(id)) => Some(id.to_string()),
                _ => None,
            };
            if let Some(id) = id {
                return Self::JobTicket { id, body };
            }
        }

        Self::Other(Value::Object(body))
    }
}
