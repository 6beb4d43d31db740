//! Route planner (vehicle routing problem) tool definition.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::instrument;

use crate::domains::tools::GeoTool;
use crate::domains::tools::definitions::common::require_text;
use crate::provider::{GeoResult, GeoapifyClient, QueryParams};

const ENDPOINT: &str = "/v1/routeplanner";

/// Parameters for route planning.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RoutePlannerParams {
    /// Travel mode, e.g. 'drive', 'truck', 'walk'.
    pub mode: String,

    /// Agents (vehicles/workers) with start locations, capacities and time windows.
    #[serde(default)]
    pub agents: Option<Vec<Value>>,

    /// Jobs (visits) to distribute between the agents.
    #[serde(default)]
    pub jobs: Option<Vec<Value>>,
}

pub struct RoutePlannerTool;

#[async_trait]
impl GeoTool for RoutePlannerTool {
    const NAME: &'static str = "route_planner";

    const DESCRIPTION: &'static str = "Optimize routes for multiple agents and jobs (vehicle routing problem). \
        Returns the planned routes as GeoJSON.";

    type Params = RoutePlannerParams;
    type Output = Value;

    #[instrument(skip_all, fields(mode = %params.mode))]
    async fn run(client: &GeoapifyClient, params: Self::Params) -> GeoResult<Value> {
        require_text("mode", &params.mode)?;

        let mut body = Map::new();
        body.insert("mode".to_string(), Value::String(params.mode));
        if let Some(agents) = params.agents {
            body.insert("agents".to_string(), Value::Array(agents));
        }
        if let Some(jobs) = params.jobs {
            body.insert("jobs".to_string(), Value::Array(jobs));
        }

        Ok(client
            .post(ENDPOINT, &QueryParams::new(), &Value::Object(body))
            .await?
            .into_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::testing::{mock_client, offline_client};
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_omits_absent_sections() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(ENDPOINT)
                    .json_body(json!({"mode": "truck", "agents": [{"start_location": [10.0, 50.0]}]}));
                then.status(200).json_body(json!({"type": "FeatureCollection", "features": []}));
            })
            .await;

        let client = mock_client(server.base_url());
        let params = RoutePlannerParams {
            mode: "truck".to_string(),
            agents: Some(vec![json!({"start_location": [10.0, 50.0]})]),
            jobs: None,
        };
        RoutePlannerTool::run(&client, params).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_mode_required() {
        let client = offline_client();
        let params = RoutePlannerParams {
            mode: " ".to_string(),
            agents: None,
            jobs: None,
        };
        assert!(RoutePlannerTool::run(&client, params).await.unwrap_err().is_validation());
    }
}
