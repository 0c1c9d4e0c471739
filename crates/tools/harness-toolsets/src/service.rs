//! Shared Harness client handle used by every tool in a toolset.

use anyhow::Context;
use harness_client::{Client, ClientConfig, HarnessError, HttpKind, Scope};
use harness_config::HarnessConfig;
use harness_tools_core::ToolError;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;

/// Default page size when a tool call does not give one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Largest page size a tool will request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Client plus the scope defaults from configuration.
pub struct HarnessService {
    client: Client<ClientConfig>,
    defaults: Scope,
    base_url: String,
    account_id: Option<String>,
}

/// Handle shared by the tools of a toolset.
pub type Service = Arc<HarnessService>;

impl HarnessService {
    pub fn new(client_config: ClientConfig, defaults: Scope) -> anyhow::Result<Service> {
        let base_url = client_config.api_base().to_string();
        let account_id = client_config.account_id().map(str::to_string);
        let client = Client::with_config(client_config).context("building Harness HTTP client")?;
        Ok(Arc::new(Self {
            client,
            defaults,
            base_url,
            account_id,
        }))
    }

    pub fn from_config(cfg: &HarnessConfig) -> anyhow::Result<Service> {
        let defaults = Scope {
            org_id: cfg.server.default_org_id.clone(),
            project_id: cfg.server.default_project_id.clone(),
        };
        Self::new(cfg.client_config(), defaults)
    }

    pub fn client(&self) -> &Client<ClientConfig> {
        &self.client
    }

    /// Resolve the scope for a call, filling gaps from configuration.
    pub fn scope(&self, args: &ScopeArgs) -> Scope {
        Scope::resolve(args.org_id.clone(), args.project_id.clone(), &self.defaults)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }
}

/// Organization and project for a call. Both fall back to the configured defaults.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ScopeArgs {
    /// Organization identifier (defaults to the configured org)
    #[serde(default)]
    pub org_id: Option<String>,
    /// Project identifier (defaults to the configured project)
    #[serde(default)]
    pub project_id: Option<String>,
}

/// Page index and size for list calls.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct PageArgs {
    /// Zero-based page index (default 0)
    #[serde(default)]
    pub page: Option<u32>,
    /// Page size (default 20, max 100)
    #[serde(default)]
    pub size: Option<u32>,
}

impl PageArgs {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(0)
    }

    pub fn size(&self) -> u32 {
        self.size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }
}

/// Map a client error onto the tool error the MCP layer reports.
pub fn map_harness_error(e: HarnessError) -> ToolError {
    let msg = e.to_string();
    match e.kind() {
        HttpKind::Unauthorized | HttpKind::Forbidden => ToolError::Permission(msg),
        HttpKind::NotFound => ToolError::NotFound(msg),
        HttpKind::ClientError => ToolError::InvalidInput(msg),
        HttpKind::RateLimited
        | HttpKind::ServerError
        | HttpKind::Timeout
        | HttpKind::Network => ToolError::External(msg),
        HttpKind::Unknown => match e {
            HarnessError::Config(_) | HarnessError::Serde(_) => ToolError::Internal(msg),
            _ => ToolError::External(msg),
        },
    }
}
