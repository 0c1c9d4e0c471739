//! Configuration types for the Harness MCP server.
//!
//! The root type is [`HarnessConfig`]. Every struct uses `#[serde(default)]`
//! so partial files deserialize cleanly.

use harness_client::ClientConfig;
use schemars::JsonSchema;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Default Harness gateway URL.
pub const DEFAULT_BASE_URL: &str = "https://app.harness.io/gateway";

/// Root configuration, loaded from `harness-mcp.json` files.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct HarnessConfig {
    /// Optional JSON Schema URL for IDE autocomplete support.
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Connection, scope and toolset selection.
    pub server: ServerConfig,

    /// License gating of toolsets.
    pub license: LicenseConfig,

    /// How tool results are rendered.
    pub output: OutputConfig,

    /// Logging and diagnostics.
    pub logging: LoggingConfig,
}

/// Connection, scope and toolset selection.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the Harness gateway.
    pub base_url: String,

    /// Account identifier. Derived from a `pat.`/`sat.` API key when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    /// Organization used when a tool call does not name one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_org_id: Option<String>,

    /// Project used when a tool call does not name one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_project_id: Option<String>,

    /// Toolsets to enable. Empty means the default toolset only; `"all"`
    /// enables every toolset.
    pub toolsets: Vec<String>,

    /// Serve only tools that do not modify state.
    pub read_only: bool,

    /// API key (env-only, never serialized to config files).
    #[serde(skip)]
    #[schemars(skip)]
    pub api_key: Option<SecretString>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            account_id: None,
            default_org_id: None,
            default_project_id: None,
            toolsets: Vec::new(),
            read_only: false,
            api_key: None,
        }
    }
}

/// License gating of toolsets.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LicenseConfig {
    /// Check module licenses before enabling toolsets. When disabled every
    /// known toolset is treated as licensed.
    pub enabled: bool,
}

impl Default for LicenseConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// How tool results are returned to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Text content only.
    #[default]
    Text,
    /// Text content plus structured JSON content.
    Structured,
}

/// Text rendering style for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OutputStyle {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// One row per record.
    Table,
}

/// Rendering of tool results.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Result transport mode.
    pub mode: OutputMode,

    /// Text rendering style.
    pub style: OutputStyle,

    /// Wrap text output in markdown.
    pub markdown: bool,

    /// Cap on rows shown in table output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
}

/// Logging and diagnostics configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,

    /// Whether to enable JSON-formatted logs.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
        }
    }
}

impl HarnessConfig {
    /// Client settings for talking to the configured Harness account.
    ///
    /// Built only from this config; environment overrides are applied by the
    /// loader, not here.
    pub fn client_config(&self) -> ClientConfig {
        let mut cfg = ClientConfig::from_parts().with_api_base(&self.server.base_url);
        if let Some(key) = &self.server.api_key {
            cfg = cfg.with_api_key_secret(key.clone());
        }
        if let Some(account) = &self.server.account_id {
            cfg = cfg.with_account_id(account);
        }
        cfg
    }
}
