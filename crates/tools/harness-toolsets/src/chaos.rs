//! Chaos Engineering experiments.
//!
//! Running an experiment changes the target environment, so
//! `chaos_run_experiment` is a write tool and is hidden in read-only mode.

use crate::service::{HarnessService, PageArgs, ScopeArgs, Service, map_harness_error};
use futures::future::BoxFuture;
use harness_config::HarnessConfig;
use harness_tools_core::{Tool, ToolContext, ToolError, ToolRegistry, Toolset};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

pub const NAME: &str = "chaos";
pub const DESCRIPTION: &str = "Chaos experiments: list, inspect and run";

/// Input for chaos_list_experiments tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListExperimentsInput {
    #[serde(flatten)]
    pub scope: ScopeArgs,
    #[serde(flatten)]
    pub paging: PageArgs,
}

#[derive(Clone)]
pub struct ChaosListExperimentsTool {
    svc: Service,
}

impl Tool for ChaosListExperimentsTool {
    type Input = ListExperimentsInput;
    type Output = Value;
    const NAME: &'static str = "chaos_list_experiments";
    const DESCRIPTION: &'static str = "List chaos experiments in a project";

    fn call(
        &self,
        input: Self::Input,
        _ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let svc = Arc::clone(&self.svc);
        Box::pin(async move {
            let scope = svc.scope(&input.scope);
            svc.client()
                .chaos()
                .list_experiments(&scope, input.paging.page(), input.paging.size())
                .await
                .map_err(map_harness_error)
        })
    }
}

/// Input for the single-experiment chaos tools.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ExperimentInput {
    /// Experiment identifier
    pub experiment_id: String,
    #[serde(flatten)]
    pub scope: ScopeArgs,
}

#[derive(Clone)]
pub struct ChaosGetExperimentTool {
    svc: Service,
}

impl Tool for ChaosGetExperimentTool {
    type Input = ExperimentInput;
    type Output = Value;
    const NAME: &'static str = "chaos_get_experiment";
    const DESCRIPTION: &'static str = "Get a chaos experiment and its recent runs";

    fn call(
        &self,
        input: Self::Input,
        _ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let svc = Arc::clone(&self.svc);
        Box::pin(async move {
            let scope = svc.scope(&input.scope);
            svc.client()
                .chaos()
                .get_experiment(&scope, &input.experiment_id)
                .await
                .map_err(map_harness_error)
        })
    }
}

#[derive(Clone)]
pub struct ChaosRunExperimentTool {
    svc: Service,
}

impl Tool for ChaosRunExperimentTool {
    type Input = ExperimentInput;
    type Output = Value;
    const NAME: &'static str = "chaos_run_experiment";
    const DESCRIPTION: &'static str = "Start a run of a chaos experiment";

    fn call(
        &self,
        input: Self::Input,
        _ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let svc = Arc::clone(&self.svc);
        Box::pin(async move {
            let scope = svc.scope(&input.scope);
            info!(experiment = %input.experiment_id, "starting chaos experiment");
            svc.client()
                .chaos()
                .run_experiment(&scope, &input.experiment_id)
                .await
                .map_err(map_harness_error)
        })
    }
}

pub fn toolset(svc: &Service) -> Toolset {
    Toolset::new(NAME, DESCRIPTION)
        .with_read_tools(
            ToolRegistry::builder()
                .register(ChaosListExperimentsTool {
                    svc: Arc::clone(svc),
                })
                .register(ChaosGetExperimentTool {
                    svc: Arc::clone(svc),
                })
                .finish(),
        )
        .with_write_tools(
            ToolRegistry::builder()
                .register(ChaosRunExperimentTool {
                    svc: Arc::clone(svc),
                })
                .finish(),
        )
}

pub fn register(cfg: &HarnessConfig) -> anyhow::Result<Toolset> {
    Ok(toolset(&HarnessService::from_config(cfg)?))
}
