//! MCP server handler backed by a [`ToolRegistry`].

use harness_tools_core::{ToolContext, ToolRegistry, fmt::TextOptions};
use rmcp::model as m;
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// How tool results are returned to the client.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Text content only, rendered with the server's [`TextOptions`]. Default.
    #[default]
    Text,
    /// Text content plus `structured_content` for object results, and
    /// `output_schema` in `list_tools` where a tool declares one.
    Structured,
}

/// MCP server handler over a fixed [`ToolRegistry`].
///
/// The registry is built once at startup (after license gating) and never
/// changes, so every tool it holds is listed and callable.
///
/// ```ignore
/// use harness_tools_mcp::{OutputMode, RegistryServer, ServiceExt, stdio};
///
/// let server = RegistryServer::new(Arc::new(group.registry()))
///     .with_output_mode(OutputMode::Structured)
///     .with_text_options(TextOptions::new().with_max_items(Some(50)));
/// server.serve(stdio()).await?.waiting().await?;
/// ```
pub struct RegistryServer {
    registry: Arc<ToolRegistry>,
    output_mode: OutputMode,
    text_options: TextOptions,
    name: String,
    version: String,
    instructions: Option<String>,
}

impl RegistryServer {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            output_mode: OutputMode::default(),
            text_options: TextOptions::default(),
            name: "harness-mcp".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            instructions: None,
        }
    }

    #[must_use]
    pub fn with_output_mode(mut self, mode: OutputMode) -> Self {
        self.output_mode = mode;
        self
    }

    /// Text rendering applied to every tool result.
    #[must_use]
    pub fn with_text_options(mut self, opts: TextOptions) -> Self {
        self.text_options = opts;
        self
    }

    #[must_use]
    pub fn with_info(mut self, name: &str, version: &str) -> Self {
        self.name = name.to_string();
        self.version = version.to_string();
        self
    }

    /// Free-form guidance sent to the client at initialization.
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    pub fn text_options(&self) -> &TextOptions {
        &self.text_options
    }

    /// Names of every served tool, sorted.
    pub fn tool_names(&self) -> Vec<String> {
        self.registry.list_names()
    }

    /// MCP definitions of every served tool, sorted by name.
    pub fn tool_definitions(&self) -> Vec<m::Tool> {
        let structured = self.output_mode == OutputMode::Structured;
        self.registry
            .iter_erased()
            .into_iter()
            .map(|erased| {
                let input_schema = erased
                    .input_schema()
                    .as_value()
                    .as_object()
                    .cloned()
                    .unwrap_or_default();
                let output_schema = if structured {
                    erased
                        .output_schema()
                        .and_then(|s| s.as_value().as_object().cloned())
                        .map(Arc::new)
                } else {
                    None
                };
                m::Tool {
                    name: erased.name().into(),
                    title: Some(erased.name().to_string()),
                    description: Some(erased.description().into()),
                    input_schema: Arc::new(input_schema),
                    annotations: None,
                    output_schema,
                    icons: None,
                    meta: None,
                }
            })
            .collect()
    }

    /// Run one tool call. Tool failures come back as error results, not protocol errors.
    pub async fn call(&self, name: &str, arguments: Option<m::JsonObject>) -> m::CallToolResult {
        let args = Value::Object(arguments.unwrap_or_default());
        let ctx = ToolContext::for_tool(name);

        match self
            .registry
            .dispatch_json_formatted(name, args, &ctx, &self.text_options)
            .await
        {
            Ok(res) => {
                debug!(tool = name, "tool call succeeded");
                let structured_content = match (self.output_mode, res.data) {
                    (OutputMode::Structured, data @ Value::Object(_)) => Some(data),
                    _ => None,
                };
                m::CallToolResult {
                    content: vec![m::Content::text(res.text)],
                    structured_content,
                    is_error: Some(false),
                    meta: None,
                }
            }
            Err(e) => {
                warn!(tool = name, kind = e.kind(), error = %e, "tool call failed");
                m::CallToolResult::error(vec![m::Content::text(e.to_string())])
            }
        }
    }
}

#[expect(
    clippy::manual_async_fn,
    reason = "trait signature uses `impl Future` return types"
)]
impl ServerHandler for RegistryServer {
    fn initialize(
        &self,
        _params: m::InitializeRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::InitializeResult, m::ErrorData>> + Send + '_
    {
        async move {
            Ok(m::InitializeResult {
                server_info: m::Implementation {
                    name: self.name.clone(),
                    title: Some(self.name.clone()),
                    version: self.version.clone(),
                    website_url: None,
                    icons: None,
                },
                capabilities: m::ServerCapabilities::builder().enable_tools().build(),
                instructions: self.instructions.clone(),
                ..Default::default()
            })
        }
    }

    fn list_tools(
        &self,
        _req: Option<m::PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::ListToolsResult, m::ErrorData>> + Send + '_
    {
        async move {
            Ok(m::ListToolsResult {
                tools: self.tool_definitions(),
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn call_tool(
        &self,
        req: m::CallToolRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::CallToolResult, m::ErrorData>> + Send + '_
    {
        async move { Ok(self.call(&req.name, req.arguments).await) }
    }

    fn ping(
        &self,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<(), m::ErrorData>> + Send + '_ {
        async { Ok(()) }
    }

    fn set_level(
        &self,
        _req: m::SetLevelRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<(), m::ErrorData>> + Send + '_ {
        async { Ok(()) }
    }

    fn list_prompts(
        &self,
        _req: Option<m::PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::ListPromptsResult, m::ErrorData>> + Send + '_
    {
        async {
            Ok(m::ListPromptsResult {
                prompts: vec![],
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn list_resources(
        &self,
        _req: Option<m::PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::ListResourcesResult, m::ErrorData>> + Send + '_
    {
        async {
            Ok(m::ListResourcesResult {
                resources: vec![],
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn list_resource_templates(
        &self,
        _req: Option<m::PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::ListResourceTemplatesResult, m::ErrorData>>
    + Send
    + '_ {
        async {
            Ok(m::ListResourceTemplatesResult {
                resource_templates: vec![],
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn read_resource(
        &self,
        _req: m::ReadResourceRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::ReadResourceResult, m::ErrorData>> + Send + '_
    {
        async {
            Err(m::ErrorData::invalid_request(
                "Method not implemented",
                None,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let server = RegistryServer::new(Arc::new(ToolRegistry::default()));
        assert_eq!(server.output_mode(), OutputMode::Text);
        assert_eq!(server.name(), "harness-mcp");
        assert!(server.tool_names().is_empty());
        assert!(server.tool_definitions().is_empty());
    }

    #[test]
    fn info_and_text_options() {
        let server = RegistryServer::new(Arc::new(ToolRegistry::default()))
            .with_info("my-server", "1.0.0")
            .with_text_options(TextOptions::new().with_max_items(Some(3)));
        assert_eq!(server.name(), "my-server");
        assert_eq!(server.version(), "1.0.0");
        assert_eq!(server.text_options().max_items, Some(3));
    }

    #[tokio::test]
    async fn unknown_tool_is_error_result() {
        let server = RegistryServer::new(Arc::new(ToolRegistry::default()));
        let res = server.call("get_nothing", None).await;
        assert_eq!(res.is_error, Some(true));
    }
}
