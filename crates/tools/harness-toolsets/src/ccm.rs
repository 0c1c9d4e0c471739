//! Cloud Cost Management.

use crate::service::{HarnessService, PageArgs, Service, map_harness_error};
use futures::future::BoxFuture;
use harness_config::HarnessConfig;
use harness_tools_core::{Tool, ToolContext, ToolError, ToolRegistry, Toolset};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

pub const NAME: &str = "ccm";
pub const DESCRIPTION: &str = "Cloud cost overview and perspectives";

const GROUP_BY_VALUES: &[&str] = &["DAY", "WEEK", "MONTH"];

/// Input for ccm_get_overview tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CcmOverviewInput {
    /// Window start, epoch milliseconds
    pub start_time: i64,
    /// Window end, epoch milliseconds
    pub end_time: i64,
    /// Bucket size: DAY, WEEK or MONTH (default DAY)
    #[serde(default)]
    pub group_by: Option<String>,
}

#[derive(Clone)]
pub struct CcmGetOverviewTool {
    svc: Service,
}

impl Tool for CcmGetOverviewTool {
    type Input = CcmOverviewInput;
    type Output = Value;
    const NAME: &'static str = "ccm_get_overview";
    const DESCRIPTION: &'static str = "Get total cloud cost and trend for a time window";

    fn call(
        &self,
        input: Self::Input,
        _ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let svc = Arc::clone(&self.svc);
        Box::pin(async move {
            if input.start_time > input.end_time {
                return Err(ToolError::invalid_input("start_time is after end_time"));
            }
            let group_by = input
                .group_by
                .map_or_else(|| "DAY".to_string(), |g| g.to_ascii_uppercase());
            if !GROUP_BY_VALUES.contains(&group_by.as_str()) {
                return Err(ToolError::invalid_input(format!(
                    "group_by must be one of {}",
                    GROUP_BY_VALUES.join(", ")
                )));
            }
            svc.client()
                .ccm()
                .overview(input.start_time, input.end_time, &group_by)
                .await
                .map_err(map_harness_error)
        })
    }
}

/// Input for ccm_list_perspectives tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListPerspectivesInput {
    /// Filter by perspective name
    #[serde(default)]
    pub search_key: Option<String>,
    #[serde(flatten)]
    pub paging: PageArgs,
}

#[derive(Clone)]
pub struct CcmListPerspectivesTool {
    svc: Service,
}

impl Tool for CcmListPerspectivesTool {
    type Input = ListPerspectivesInput;
    type Output = Value;
    const NAME: &'static str = "ccm_list_perspectives";
    const DESCRIPTION: &'static str = "List cost perspectives in the account";

    fn call(
        &self,
        input: Self::Input,
        _ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let svc = Arc::clone(&self.svc);
        Box::pin(async move {
            svc.client()
                .ccm()
                .list_perspectives(
                    input.search_key.as_deref(),
                    input.paging.page(),
                    input.paging.size(),
                )
                .await
                .map_err(map_harness_error)
        })
    }
}

/// Input for ccm_get_perspective tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetPerspectiveInput {
    /// Perspective identifier
    pub perspective_id: String,
}

#[derive(Clone)]
pub struct CcmGetPerspectiveTool {
    svc: Service,
}

impl Tool for CcmGetPerspectiveTool {
    type Input = GetPerspectiveInput;
    type Output = Value;
    const NAME: &'static str = "ccm_get_perspective";
    const DESCRIPTION: &'static str = "Get one cost perspective";

    fn call(
        &self,
        input: Self::Input,
        _ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let svc = Arc::clone(&self.svc);
        Box::pin(async move {
            svc.client()
                .ccm()
                .get_perspective(&input.perspective_id)
                .await
                .map_err(map_harness_error)
        })
    }
}

pub fn toolset(svc: &Service) -> Toolset {
    Toolset::new(NAME, DESCRIPTION).with_read_tools(
        ToolRegistry::builder()
            .register(CcmGetOverviewTool {
                svc: Arc::clone(svc),
            })
            .register(CcmListPerspectivesTool {
                svc: Arc::clone(svc),
            })
            .register(CcmGetPerspectiveTool {
                svc: Arc::clone(svc),
            })
            .finish(),
    )
}

pub fn register(cfg: &HarnessConfig) -> anyhow::Result<Toolset> {
    Ok(toolset(&HarnessService::from_config(cfg)?))
}
