//! Core tool trait.

use crate::context::ToolContext;
use crate::error::ToolError;
use futures::future::BoxFuture;

/// A callable tool exposed over MCP.
///
/// Input and output types carry their serde/schemars bounds at registration
/// time (see [`crate::ToolRegistryBuilder::register`]), not on the trait, so
/// a tool can still be called natively in tests without going through JSON.
///
/// # Example
///
/// ```ignore
/// use harness_tools_core::{Tool, ToolContext, ToolError};
/// use futures::future::BoxFuture;
///
/// #[derive(Clone)]
/// struct GetVersionTool;
///
/// impl Tool for GetVersionTool {
///     type Input = ();
///     type Output = String;
///     const NAME: &'static str = "get_version";
///     const DESCRIPTION: &'static str = "Return the server version";
///
///     fn call(&self, _input: (), _ctx: &ToolContext)
///         -> BoxFuture<'static, Result<String, ToolError>>
///     {
///         Box::pin(async { Ok(env!("CARGO_PKG_VERSION").to_string()) })
///     }
/// }
/// ```
pub trait Tool: Send + Sync + 'static {
    /// Input type for the tool.
    type Input: Send + 'static;

    /// Output type for the tool.
    type Output: Send + 'static;

    /// Unique name identifying the tool. Must satisfy the `mcplint` naming rules.
    const NAME: &'static str;

    /// Human-readable description of what the tool does.
    const DESCRIPTION: &'static str;

    /// Execute the tool with the given input and context.
    fn call(
        &self,
        input: Self::Input,
        ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>>;
}
