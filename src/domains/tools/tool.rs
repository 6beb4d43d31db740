//! Shared glue between tool definitions and the MCP surface.
//!
//! A tool only describes itself ([`GeoTool`]): its name, description,
//! parameter type and an async `run` against the gateway. Everything else
//! (schema generation, argument decoding, result wrapping, logging and
//! route creation) lives here so the sixteen definitions stay small.

use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{error, info, warn};

use super::error::ToolError;
use crate::provider::{GeoResult, GeoapifyClient};

/// A Geoapify-backed tool.
#[async_trait]
pub trait GeoTool {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Caller-facing arguments.
    type Params: DeserializeOwned + JsonSchema + Send + 'static;

    /// Reshaped result handed back to the caller.
    type Output: Serialize + Send;

    /// Validate, call the provider and reshape.
    async fn run(client: &GeoapifyClient, params: Self::Params) -> GeoResult<Self::Output>;
}

/// Create a Tool model (metadata) for `T`.
pub fn to_tool<T: GeoTool>() -> Tool {
    Tool {
        name: T::NAME.into(),
        description: Some(T::DESCRIPTION.into()),
        input_schema: cached_schema_for_type::<T::Params>(),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

/// Decode raw arguments into `T::Params`.
pub fn parse_params<T: GeoTool>(arguments: Value) -> Result<T::Params, ToolError> {
    serde_json::from_value(arguments)
        .map_err(|e| ToolError::invalid_arguments(format!("{}: {}", T::NAME, e)))
}

/// Run `T` and wrap the outcome as a tool result.
///
/// Gateway failures never become protocol errors; they come back as
/// `isError: true` results carrying the error text.
pub async fn execute<T: GeoTool>(client: &GeoapifyClient, params: T::Params) -> CallToolResult {
    info!("{} tool called", T::NAME);

    match T::run(client, params).await {
        Ok(output) => json_result(&output),
        Err(e) => {
            if e.is_validation() {
                warn!("{} rejected arguments: {}", T::NAME, e);
            } else {
                error!("{} failed: {}", T::NAME, e);
            }
            error_result(&e.to_string())
        }
    }
}

/// Create a ToolRoute for STDIO/TCP transport.
pub fn create_route<S, T>(client: Arc<GeoapifyClient>) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
    T: GeoTool + 'static,
{
    ToolRoute::new_dyn(to_tool::<T>(), move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().unwrap_or_default();
        let client = client.clone();
        async move {
            let params = parse_params::<T>(Value::Object(args))
                .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
            Ok(execute::<T>(&client, params).await)
        }
        .boxed()
    })
}

/// Success result: compact JSON text plus the same value as structured content.
pub fn json_result<O: Serialize>(output: &O) -> CallToolResult {
    match serde_json::to_value(output) {
        Ok(structured) => CallToolResult {
            content: vec![Content::text(structured.to_string())],
            structured_content: Some(structured),
            is_error: Some(false),
            meta: None,
        },
        Err(e) => {
            error!("Failed to serialize tool output: {}", e);
            error_result(&format!("Failed to serialize tool output: {e}"))
        }
    }
}

/// Error result with a text message.
pub fn error_result(message: &str) -> CallToolResult {
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Render a tool result the way the HTTP transport returns it.
pub fn call_result_to_json(result: CallToolResult) -> Value {
    let mut response = serde_json::json!({
        "content": result.content,
        "isError": result.is_error.unwrap_or(false)
    });

    if let (Some(structured), Some(object)) = (result.structured_content, response.as_object_mut())
    {
        object.insert("structuredContent".to_string(), structured);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::GeoError;
    use crate::provider::testing::offline_client;
    use serde::Deserialize;

    #[derive(Deserialize, JsonSchema)]
    struct EchoParams {
        word: String,
    }

    struct EchoTool;

    #[async_trait]
    impl GeoTool for EchoTool {
        const NAME: &'static str = "echo";
        const DESCRIPTION: &'static str = "Echo a word";
        type Params = EchoParams;
        type Output = Value;

        async fn run(_client: &GeoapifyClient, params: EchoParams) -> GeoResult<Value> {
            if params.word.is_empty() {
                return Err(GeoError::validation("word must not be empty"));
            }
            Ok(serde_json::json!({ "word": params.word }))
        }
    }

    #[test]
    fn test_to_tool_metadata() {
        let tool = to_tool::<EchoTool>();
        assert_eq!(tool.name, "echo");
        assert_eq!(tool.description.as_deref(), Some("Echo a word"));
        assert!(tool.input_schema.contains_key("properties"));
    }

    #[test]
    fn test_parse_params_reports_tool_name() {
        let err = parse_params::<EchoTool>(serde_json::json!({})).err().unwrap();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
        assert!(err.to_string().contains("echo"));
    }

    #[tokio::test]
    async fn test_execute_success_has_structured_content() {
        let client = offline_client();
        let params = EchoParams {
            word: "hi".to_string(),
        };
        let result = execute::<EchoTool>(&client, params).await;

        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.structured_content.unwrap()["word"], "hi");
    }

    #[tokio::test]
    async fn test_execute_failure_is_error_result() {
        let client = offline_client();
        let params = EchoParams {
            word: String::new(),
        };
        let json = call_result_to_json(execute::<EchoTool>(&client, params).await);

        assert_eq!(json["isError"], true);
        assert!(json.get("structuredContent").is_none());
        assert!(json["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("word must not be empty"));
    }
}
