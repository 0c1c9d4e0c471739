//! Connector tools. Both also ship in the default toolset.

use crate::service::{HarnessService, ScopeArgs, Service, map_harness_error};
use futures::future::BoxFuture;
use harness_config::HarnessConfig;
use harness_tools_core::{Tool, ToolContext, ToolError, ToolRegistry, Toolset};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

pub const NAME: &str = "connectors";
pub const DESCRIPTION: &str = "Connector catalogue and connector details";

/// Input for get_connector_details tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetConnectorInput {
    /// Connector identifier
    pub connector_id: String,
    #[serde(flatten)]
    pub scope: ScopeArgs,
}

#[derive(Clone)]
pub struct GetConnectorDetailsTool {
    svc: Service,
}

impl GetConnectorDetailsTool {
    pub fn new(svc: Service) -> Self {
        Self { svc }
    }
}

impl Tool for GetConnectorDetailsTool {
    type Input = GetConnectorInput;
    type Output = Value;
    const NAME: &'static str = "get_connector_details";
    const DESCRIPTION: &'static str =
        "Get a connector's configuration and last connectivity check";

    fn call(
        &self,
        input: Self::Input,
        _ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let svc = Arc::clone(&self.svc);
        Box::pin(async move {
            let scope = svc.scope(&input.scope);
            svc.client()
                .connectors()
                .get(&scope, &input.connector_id)
                .await
                .map_err(map_harness_error)
        })
    }
}

/// Input for list_connector_catalogue tool. Takes no arguments.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ConnectorCatalogueInput {}

#[derive(Clone)]
pub struct ListConnectorCatalogueTool {
    svc: Service,
}

impl ListConnectorCatalogueTool {
    pub fn new(svc: Service) -> Self {
        Self { svc }
    }
}

impl Tool for ListConnectorCatalogueTool {
    type Input = ConnectorCatalogueInput;
    type Output = Value;
    const NAME: &'static str = "list_connector_catalogue";
    const DESCRIPTION: &'static str = "List the connector types available in the account";

    fn call(
        &self,
        _input: Self::Input,
        _ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let svc = Arc::clone(&self.svc);
        Box::pin(async move {
            svc.client()
                .connectors()
                .catalogue()
                .await
                .map_err(map_harness_error)
        })
    }
}

pub fn toolset(svc: &Service) -> Toolset {
    Toolset::new(NAME, DESCRIPTION).with_read_tools(
        ToolRegistry::builder()
            .register(ListConnectorCatalogueTool::new(Arc::clone(svc)))
            .register(GetConnectorDetailsTool::new(Arc::clone(svc)))
            .finish(),
    )
}

pub fn register(cfg: &HarnessConfig) -> anyhow::Result<Toolset> {
    Ok(toolset(&HarnessService::from_config(cfg)?))
}
