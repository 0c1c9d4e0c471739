//! Secret metadata. Values are never returned by the Harness API.

use crate::service::{HarnessService, PageArgs, ScopeArgs, Service, map_harness_error};
use futures::future::BoxFuture;
use harness_config::HarnessConfig;
use harness_tools_core::{Tool, ToolContext, ToolError, ToolRegistry, Toolset};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

pub const NAME: &str = "secrets";
pub const DESCRIPTION: &str = "Secret metadata in the secret manager";

/// Input for list_secrets tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListSecretsInput {
    #[serde(flatten)]
    pub scope: ScopeArgs,
    #[serde(flatten)]
    pub paging: PageArgs,
    /// Filter by name or identifier
    #[serde(default)]
    pub search_term: Option<String>,
}

#[derive(Clone)]
pub struct ListSecretsTool {
    svc: Service,
}

impl Tool for ListSecretsTool {
    type Input = ListSecretsInput;
    type Output = Value;
    const NAME: &'static str = "list_secrets";
    const DESCRIPTION: &'static str = "List secrets (metadata only) in a scope";

    fn call(
        &self,
        input: Self::Input,
        _ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let svc = Arc::clone(&self.svc);
        Box::pin(async move {
            let scope = svc.scope(&input.scope);
            svc.client()
                .secrets()
                .list(
                    &scope,
                    input.search_term.as_deref(),
                    input.paging.page(),
                    input.paging.size(),
                )
                .await
                .map_err(map_harness_error)
        })
    }
}

/// Input for get_secret tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetSecretInput {
    /// Secret identifier
    pub secret_id: String,
    #[serde(flatten)]
    pub scope: ScopeArgs,
}

#[derive(Clone)]
pub struct GetSecretTool {
    svc: Service,
}

impl Tool for GetSecretTool {
    type Input = GetSecretInput;
    type Output = Value;
    const NAME: &'static str = "get_secret";
    const DESCRIPTION: &'static str = "Get one secret's metadata";

    fn call(
        &self,
        input: Self::Input,
        _ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let svc = Arc::clone(&self.svc);
        Box::pin(async move {
            let scope = svc.scope(&input.scope);
            svc.client()
                .secrets()
                .get(&scope, &input.secret_id)
                .await
                .map_err(map_harness_error)
        })
    }
}

pub fn toolset(svc: &Service) -> Toolset {
    Toolset::new(NAME, DESCRIPTION).with_read_tools(
        ToolRegistry::builder()
            .register(ListSecretsTool {
                svc: Arc::clone(svc),
            })
            .register(GetSecretTool {
                svc: Arc::clone(svc),
            })
            .finish(),
    )
}

pub fn register(cfg: &HarnessConfig) -> anyhow::Result<Toolset> {
    Ok(toolset(&HarnessService::from_config(cfg)?))
}
