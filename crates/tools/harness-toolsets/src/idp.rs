//! Internal Developer Portal catalog.

use crate::service::{HarnessService, PageArgs, ScopeArgs, Service, map_harness_error};
use futures::future::BoxFuture;
use harness_config::HarnessConfig;
use harness_tools_core::{Tool, ToolContext, ToolError, ToolRegistry, Toolset};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

pub const NAME: &str = "idp";
pub const DESCRIPTION: &str = "Software catalog entities in the developer portal";

const DEFAULT_NAMESPACE: &str = "default";

/// Input for idp_list_entities tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListEntitiesInput {
    /// Entity kind, e.g. component, api or system
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub scope: ScopeArgs,
    #[serde(flatten)]
    pub paging: PageArgs,
}

#[derive(Clone)]
pub struct IdpListEntitiesTool {
    svc: Service,
}

impl Tool for IdpListEntitiesTool {
    type Input = ListEntitiesInput;
    type Output = Value;
    const NAME: &'static str = "idp_list_entities";
    const DESCRIPTION: &'static str = "List catalog entities, optionally of one kind";

    fn call(
        &self,
        input: Self::Input,
        _ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let svc = Arc::clone(&self.svc);
        Box::pin(async move {
            let scope = svc.scope(&input.scope);
            svc.client()
                .idp()
                .list_entities(
                    &scope,
                    input.kind.as_deref(),
                    input.paging.page(),
                    input.paging.size(),
                )
                .await
                .map_err(map_harness_error)
        })
    }
}

/// Input for idp_get_entity tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetEntityInput {
    /// Entity kind
    pub kind: String,
    /// Entity name
    pub name: String,
    /// Catalog namespace (default "default")
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(flatten)]
    pub scope: ScopeArgs,
}

#[derive(Clone)]
pub struct IdpGetEntityTool {
    svc: Service,
}

impl Tool for IdpGetEntityTool {
    type Input = GetEntityInput;
    type Output = Value;
    const NAME: &'static str = "idp_get_entity";
    const DESCRIPTION: &'static str = "Get one catalog entity by kind and name";

    fn call(
        &self,
        input: Self::Input,
        _ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let svc = Arc::clone(&self.svc);
        Box::pin(async move {
            let scope = svc.scope(&input.scope);
            let namespace = input.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE);
            svc.client()
                .idp()
                .get_entity(&scope, &input.kind, namespace, &input.name)
                .await
                .map_err(map_harness_error)
        })
    }
}

pub fn toolset(svc: &Service) -> Toolset {
    Toolset::new(NAME, DESCRIPTION).with_read_tools(
        ToolRegistry::builder()
            .register(IdpListEntitiesTool {
                svc: Arc::clone(svc),
            })
            .register(IdpGetEntityTool {
                svc: Arc::clone(svc),
            })
            .finish(),
    )
}

pub fn register(cfg: &HarnessConfig) -> anyhow::Result<Toolset> {
    Ok(toolset(&HarnessService::from_config(cfg)?))
}
