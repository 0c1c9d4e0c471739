//! The default toolset, served when no toolsets are configured or licensing
//! cannot be decided. Its tools are all CORE, so it is never license gated.

use crate::connectors::{GetConnectorDetailsTool, ListConnectorCatalogueTool};
use crate::pipelines::{GetPipelineTool, ListPipelinesTool};
use crate::service::{HarnessService, Service};
use harness_config::HarnessConfig;
use harness_tools_core::{ToolRegistry, Toolset};
use std::sync::Arc;

pub const NAME: &str = "default";
pub const DESCRIPTION: &str = "Essential pipeline and connector tools";

pub fn toolset(svc: &Service) -> Toolset {
    Toolset::new(NAME, DESCRIPTION).with_read_tools(
        ToolRegistry::builder()
            .register(GetPipelineTool::new(Arc::clone(svc)))
            .register(ListPipelinesTool::new(Arc::clone(svc)))
            .register(GetConnectorDetailsTool::new(Arc::clone(svc)))
            .register(ListConnectorCatalogueTool::new(Arc::clone(svc)))
            .finish(),
    )
}

pub fn register(cfg: &HarnessConfig) -> anyhow::Result<Toolset> {
    Ok(toolset(&HarnessService::from_config(cfg)?))
}
