//! Audit trail queries.

use crate::service::{HarnessService, PageArgs, ScopeArgs, Service, map_harness_error};
use futures::future::BoxFuture;
use harness_client::resources::audit::AuditFilter;
use harness_config::HarnessConfig;
use harness_tools_core::{Tool, ToolContext, ToolError, ToolRegistry, Toolset};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

pub const NAME: &str = "audit";
pub const DESCRIPTION: &str = "Audit trail of user activity";

/// Input for list_user_audit_trail tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListAuditTrailInput {
    /// Only events by this user (email or identifier)
    #[serde(default)]
    pub user_id: Option<String>,
    /// Window start, epoch milliseconds
    #[serde(default)]
    pub start_time: Option<i64>,
    /// Window end, epoch milliseconds
    #[serde(default)]
    pub end_time: Option<i64>,
    #[serde(flatten)]
    pub scope: ScopeArgs,
    #[serde(flatten)]
    pub paging: PageArgs,
}

#[derive(Clone)]
pub struct ListUserAuditTrailTool {
    svc: Service,
}

impl Tool for ListUserAuditTrailTool {
    type Input = ListAuditTrailInput;
    type Output = Value;
    const NAME: &'static str = "list_user_audit_trail";
    const DESCRIPTION: &'static str = "List audit events, optionally for one user and time window";

    fn call(
        &self,
        input: Self::Input,
        _ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let svc = Arc::clone(&self.svc);
        Box::pin(async move {
            if let (Some(start), Some(end)) = (input.start_time, input.end_time)
                && start > end
            {
                return Err(ToolError::invalid_input("start_time is after end_time"));
            }
            let scope = svc.scope(&input.scope);
            let filter = AuditFilter {
                user_id: input.user_id,
                start_time: input.start_time,
                end_time: input.end_time,
            };
            svc.client()
                .audit()
                .list(&scope, &filter, input.paging.page(), input.paging.size())
                .await
                .map_err(map_harness_error)
        })
    }
}

pub fn toolset(svc: &Service) -> Toolset {
    Toolset::new(NAME, DESCRIPTION).with_read_tools(
        ToolRegistry::builder()
            .register(ListUserAuditTrailTool {
                svc: Arc::clone(svc),
            })
            .finish(),
    )
}

pub fn register(cfg: &HarnessConfig) -> anyhow::Result<Toolset> {
    Ok(toolset(&HarnessService::from_config(cfg)?))
}
