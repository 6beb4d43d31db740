//! HTTP gateway to the Geoapify REST API.

use std::time::Duration;

use reqwest::Method;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::error::{GeoError, GeoResult};
use super::params::QueryParams;
use super::response::ProviderResponse;
use crate::core::config::ProviderConfig;

/// Public Geoapify endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.geoapify.com";

/// Query parameter carrying the credential.
const API_KEY_PARAM: &str = "apiKey";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Shared gateway used by every tool.
///
/// Cheap to clone; the inner `reqwest::Client` is reference counted.
#[derive(Clone)]
pub struct GeoapifyClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    isoline_retry_delay: Duration,
}

impl std::fmt::Debug for GeoapifyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoapifyClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("isoline_retry_delay", &self.isoline_retry_delay)
            .finish()
    }
}

impl GeoapifyClient {
    /// Build a gateway from provider configuration.
    ///
    /// A missing API key is accepted here; every request then fails with
    /// [`GeoError::Config`].
    pub fn new(config: &ProviderConfig) -> GeoResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| GeoError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            isoline_retry_delay: Duration::from_millis(config.isoline_retry_delay_ms),
        })
    }

    /// Pause before fetching an isoline job result.
    pub fn isoline_retry_delay(&self) -> Duration {
        self.isoline_retry_delay
    }

    /// GET `endpoint` with query parameters.
    pub async fn get(&self, endpoint: &str, params: &QueryParams) -> GeoResult<ProviderResponse> {
        self.request(endpoint, params, Method::GET, None).await
    }

    /// POST a JSON body to `endpoint`.
    pub async fn post(
        &self,
        endpoint: &str,
        params: &QueryParams,
        body: &Value,
    ) -> GeoResult<ProviderResponse> {
        self.request(endpoint, params, Method::POST, Some(body)).await
    }

    /// Issue one request and decode the response.
    ///
    /// The credential is added to a copy of `params`, never to the body.
    /// Non-success statuses become [`GeoError::Provider`] carrying the
    /// provider's `message` field, or the raw body when that is missing.
    #[instrument(skip(self, params, body), fields(method = %method))]
    pub async fn request(
        &self,
        endpoint: &str,
        params: &QueryParams,
        method: Method,
        body: Option<&Value>,
    ) -> GeoResult<ProviderResponse> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| GeoError::config("GEOAPIFY_KEY environment variable not set"))?;

        let mut query = params.clone();
        query.push(API_KEY_PARAM, api_key);

        let url = format!("{}{}", self.base_url, endpoint);
        debug!("Sending {} parameter(s) to {}", params.len(), endpoint);

        let mut builder = self.http.request(method, &url).query(query.as_pairs());
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!("Request to {} failed: {}", endpoint, e);
            GeoError::Transport(e)
        })?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = error_message(&text);
            warn!("Geoapify returned {} for {}: {}", status, endpoint, message);
            return Err(GeoError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        debug!("Received {} bytes from {}", text.len(), endpoint);

        let value: Value = serde_json::from_str(&text)
            .map_err(|e| GeoError::InvalidResponse(format!("JSON parse error: {e}")))?;

        Ok(ProviderResponse::from(value))
    }
}

/// Best-effort human readable message from an error body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::testing::{TEST_API_KEY, mock_client, offline_client};
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn test_error_message_prefers_json_message() {
        assert_eq!(
            error_message(r#"{"statusCode":401,"error":"Unauthorized","message":"Invalid apiKey"}"#),
            "Invalid apiKey"
        );
        assert_eq!(error_message(r#"{"error":"oops"}"#), r#"{"error":"oops"}"#);
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = mock_client("http://localhost");
        let debug = format!("{client:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains(TEST_API_KEY));
    }

    #[tokio::test]
    async fn test_missing_key_is_config_error() {
        let config = ProviderConfig {
            api_key: None,
            ..ProviderConfig::default()
        };
        let client = GeoapifyClient::new(&config).unwrap();
        let result = client.get("/v1/ipinfo", &QueryParams::new()).await;
        assert!(matches!(result, Err(GeoError::Config(_))));
    }

    #[tokio::test]
    async fn test_get_injects_api_key() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1/geocode/search")
                    .query_param("text", "Berlin")
                    .query_param("apiKey", TEST_API_KEY);
                then.status(200).json_body(json!({"results": []}));
            })
            .await;

        let client = mock_client(server.base_url());
        let params = QueryParams::new().with("text", "Berlin");
        let response = client.get("/v1/geocode/search", &params).await.unwrap();

        mock.assert_async().await;
        assert!(matches!(response, ProviderResponse::Results(_)));
        // The caller's parameters are left untouched.
        assert_eq!(params.get("apiKey"), None);
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/routematrix")
                    .query_param("apiKey", TEST_API_KEY)
                    .json_body(json!({"mode": "drive"}));
                then.status(200).json_body(json!({"sources_to_targets": []}));
            })
            .await;

        let client = mock_client(server.base_url());
        let response = client
            .post("/v1/routematrix", &QueryParams::new(), &json!({"mode": "drive"}))
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(matches!(response, ProviderResponse::Other(_)));
    }

    #[tokio::test]
    async fn test_error_status_uses_message_field() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/ipinfo");
                then.status(401)
                    .json_body(json!({"statusCode": 401, "message": "Invalid apiKey"}));
            })
            .await;

        let client = mock_client(server.base_url());
        let err = client.get("/v1/ipinfo", &QueryParams::new()).await.unwrap_err();
        match err {
            GeoError::Provider { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid apiKey");
            }
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_status_falls_back_to_text() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/ipinfo");
                then.status(502).body("upstream unavailable");
            })
            .await;

        let client = mock_client(server.base_url());
        let err = client.get("/v1/ipinfo", &QueryParams::new()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Geoapify API error (502): upstream unavailable"
        );
    }

    #[tokio::test]
    async fn test_non_json_success_is_invalid_response() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/ipinfo");
                then.status(200).body("<html></html>");
            })
            .await;

        let client = mock_client(server.base_url());
        let err = client.get("/v1/ipinfo", &QueryParams::new()).await.unwrap_err();
        assert!(matches!(err, GeoError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        let err = offline_client()
            .get("/v1/ipinfo", &QueryParams::new())
            .await
            .unwrap_err();
        assert!(matches!(err, GeoError::Transport(_)));
    }
}
