//! Query-string builder.

use std::fmt::Display;

/// Ordered `key=value` pairs for a provider request.
///
/// Values are rendered with `Display` at insertion time, so lists must be
/// joined (`,` or `|`) by the caller before being pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`push`](Self::push).
    pub fn with(mut self, key: &str, value: impl Display) -> Self {
        self.push(key, value);
        self
    }

    /// Append a parameter.
    pub fn push(&mut self, key: &str, value: impl Display) {
        self.pairs.push((key.to_string(), value.to_string()));
    }

    /// Append a parameter only when a value is present.
    pub fn push_opt<T: Display>(&mut self, key: &str, value: Option<T>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_opt_skips_none() {
        let mut params = QueryParams::new().with("limit", 20);
        params.push_opt("lang", None::<&str>);
        params.push_opt("filter", Some("countrycode:us"));

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("limit"), Some("20"));
        assert_eq!(params.get("lang"), None);
        assert_eq!(params.get("filter"), Some("countrycode:us"));
    }

    #[test]
    fn test_float_rendering() {
        let params = QueryParams::new().with("lat", 48.8566).with("lon", 2.0);
        assert_eq!(params.get("lat"), Some("48.8566"));
        assert_eq!(params.get("lon"), Some("2"));
    }
}
