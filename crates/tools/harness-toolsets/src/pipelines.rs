//! Pipelines and executions.

use crate::service::{HarnessService, PageArgs, ScopeArgs, Service, map_harness_error};
use futures::future::BoxFuture;
use harness_client::resources::pipelines::PipelineListOptions;
use harness_config::HarnessConfig;
use harness_tools_core::{Tool, ToolContext, ToolError, ToolRegistry, Toolset};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

pub const NAME: &str = "pipelines";
pub const DESCRIPTION: &str = "Harness pipelines and their executions";

// ============================================================================
// list_pipelines
// ============================================================================

/// Input for list_pipelines tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListPipelinesInput {
    #[serde(flatten)]
    pub scope: ScopeArgs,
    #[serde(flatten)]
    pub paging: PageArgs,
    /// Filter by name or identifier
    #[serde(default)]
    pub search_term: Option<String>,
}

#[derive(Clone)]
pub struct ListPipelinesTool {
    svc: Service,
}

impl ListPipelinesTool {
    pub fn new(svc: Service) -> Self {
        Self { svc }
    }
}

impl Tool for ListPipelinesTool {
    type Input = ListPipelinesInput;
    type Output = Value;
    const NAME: &'static str = "list_pipelines";
    const DESCRIPTION: &'static str = "List pipelines in a Harness project";

    fn call(
        &self,
        input: Self::Input,
        _ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let svc = Arc::clone(&self.svc);
        Box::pin(async move {
            let scope = svc.scope(&input.scope);
            let opts = PipelineListOptions {
                page: input.paging.page(),
                size: input.paging.size(),
                search_term: input.search_term,
            };
            svc.client()
                .pipelines()
                .list(&scope, &opts)
                .await
                .map_err(map_harness_error)
        })
    }
}

// ============================================================================
// get_pipeline
// ============================================================================

/// Input for get_pipeline tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetPipelineInput {
    /// Pipeline identifier
    pub pipeline_id: String,
    #[serde(flatten)]
    pub scope: ScopeArgs,
}

#[derive(Clone)]
pub struct GetPipelineTool {
    svc: Service,
}

impl GetPipelineTool {
    pub fn new(svc: Service) -> Self {
        Self { svc }
    }
}

impl Tool for GetPipelineTool {
    type Input = GetPipelineInput;
    type Output = Value;
    const NAME: &'static str = "get_pipeline";
    const DESCRIPTION: &'static str = "Get a pipeline, including its YAML definition";

    fn call(
        &self,
        input: Self::Input,
        _ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let svc = Arc::clone(&self.svc);
        Box::pin(async move {
            let scope = svc.scope(&input.scope);
            svc.client()
                .pipelines()
                .get(&scope, &input.pipeline_id)
                .await
                .map_err(map_harness_error)
        })
    }
}

// ============================================================================
// list_executions
// ============================================================================

/// Input for list_executions tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListExecutionsInput {
    /// Only executions of this pipeline
    #[serde(default)]
    pub pipeline_id: Option<String>,
    #[serde(flatten)]
    pub scope: ScopeArgs,
    #[serde(flatten)]
    pub paging: PageArgs,
}

#[derive(Clone)]
pub struct ListExecutionsTool {
    svc: Service,
}

impl ListExecutionsTool {
    pub fn new(svc: Service) -> Self {
        Self { svc }
    }
}

impl Tool for ListExecutionsTool {
    type Input = ListExecutionsInput;
    type Output = Value;
    const NAME: &'static str = "list_executions";
    const DESCRIPTION: &'static str = "List pipeline executions, newest first";

    fn call(
        &self,
        input: Self::Input,
        _ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let svc = Arc::clone(&self.svc);
        Box::pin(async move {
            let scope = svc.scope(&input.scope);
            svc.client()
                .pipelines()
                .list_executions(
                    &scope,
                    input.pipeline_id.as_deref(),
                    input.paging.page(),
                    input.paging.size(),
                )
                .await
                .map_err(map_harness_error)
        })
    }
}

// ============================================================================
// get_execution
// ============================================================================

/// Input for get_execution tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetExecutionInput {
    /// Plan execution identifier
    pub execution_id: String,
    #[serde(flatten)]
    pub scope: ScopeArgs,
}

#[derive(Clone)]
pub struct GetExecutionTool {
    svc: Service,
}

impl GetExecutionTool {
    pub fn new(svc: Service) -> Self {
        Self { svc }
    }
}

impl Tool for GetExecutionTool {
    type Input = GetExecutionInput;
    type Output = Value;
    const NAME: &'static str = "get_execution";
    const DESCRIPTION: &'static str = "Get the status and stage graph of a pipeline execution";

    fn call(
        &self,
        input: Self::Input,
        _ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let svc = Arc::clone(&self.svc);
        Box::pin(async move {
            let scope = svc.scope(&input.scope);
            svc.client()
                .pipelines()
                .get_execution(&scope, &input.execution_id)
                .await
                .map_err(map_harness_error)
        })
    }
}

// ============================================================================
// fetch_execution_url
// ============================================================================

/// Input for fetch_execution_url tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FetchExecutionUrlInput {
    /// Pipeline identifier
    pub pipeline_id: String,
    /// Plan execution identifier
    pub execution_id: String,
    #[serde(flatten)]
    pub scope: ScopeArgs,
}

#[derive(Clone)]
pub struct FetchExecutionUrlTool {
    svc: Service,
}

impl FetchExecutionUrlTool {
    pub fn new(svc: Service) -> Self {
        Self { svc }
    }
}

impl Tool for FetchExecutionUrlTool {
    type Input = FetchExecutionUrlInput;
    type Output = Value;
    const NAME: &'static str = "fetch_execution_url";
    const DESCRIPTION: &'static str = "Build the Harness UI link for a pipeline execution";

    fn call(
        &self,
        input: Self::Input,
        _ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let result = execution_url(&self.svc, &input).map(|url| json!({ "url": url }));
        Box::pin(async move { result })
    }
}

fn execution_url(svc: &HarnessService, input: &FetchExecutionUrlInput) -> Result<String, ToolError> {
    let account = svc
        .account_id()
        .ok_or_else(|| ToolError::invalid_input("account id is not configured"))?;
    let scope = svc.scope(&input.scope);
    let (Some(org), Some(project)) = (scope.org_id, scope.project_id) else {
        return Err(ToolError::invalid_input(
            "org_id and project_id are required (no defaults configured)",
        ));
    };
    let ui_base = svc.base_url().trim_end_matches('/').trim_end_matches("/gateway");
    Ok(format!(
        "{ui_base}/ng/account/{account}/all/orgs/{org}/projects/{project}/pipelines/{}/executions/{}/pipeline",
        input.pipeline_id, input.execution_id
    ))
}

/// Read-only pipeline tools over one shared client.
pub fn toolset(svc: &Service) -> Toolset {
    Toolset::new(NAME, DESCRIPTION).with_read_tools(
        ToolRegistry::builder()
            .register(ListPipelinesTool::new(Arc::clone(svc)))
            .register(GetPipelineTool::new(Arc::clone(svc)))
            .register(ListExecutionsTool::new(Arc::clone(svc)))
            .register(GetExecutionTool::new(Arc::clone(svc)))
            .register(FetchExecutionUrlTool::new(Arc::clone(svc)))
            .finish(),
    )
}

pub fn register(cfg: &HarnessConfig) -> anyhow::Result<Toolset> {
    Ok(toolset(&HarnessService::from_config(cfg)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use harness_client::{ClientConfig, Scope};

    fn svc(base: &str, org: Option<&str>) -> Service {
        HarnessService::new(
            ClientConfig::new()
                .with_api_base(base)
                .with_api_key("k")
                .with_account_id("acct"),
            Scope {
                org_id: org.map(str::to_string),
                project_id: Some("proj".into()),
            },
        )
        .unwrap()
    }

    fn input(org: Option<&str>) -> FetchExecutionUrlInput {
        FetchExecutionUrlInput {
            pipeline_id: "build".into(),
            execution_id: "exec1".into(),
            scope: ScopeArgs {
                org_id: org.map(str::to_string),
                project_id: None,
            },
        }
    }

    #[test]
    fn execution_url_strips_gateway() {
        let url = execution_url(&svc("https://app.harness.io/gateway", Some("default")), &input(None))
            .unwrap();
        assert_eq!(
            url,
            "https://app.harness.io/ng/account/acct/all/orgs/default/projects/proj/pipelines/build/executions/exec1/pipeline"
        );
    }

    #[test]
    fn execution_url_requires_scope() {
        let err = execution_url(&svc("https://h.io", None), &input(None)).unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput(_)));
        assert!(execution_url(&svc("https://h.io", None), &input(Some("o"))).is_ok());
    }

    #[test]
    fn toolset_has_only_read_tools() {
        let ts = toolset(&svc("https://h.io", None));
        assert_eq!(ts.name(), NAME);
        assert_eq!(ts.read_tools().len(), 5);
        assert!(ts.write_tools().is_empty());
    }
}
