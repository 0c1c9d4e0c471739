//! Tool execution context.

/// Context passed to tool executions.
///
/// Carries the name the tool was invoked under so tool bodies can attach it
/// to their log lines without threading it through every input type.
#[derive(Clone, Default, Debug)]
pub struct ToolContext {
    tool_name: Option<String>,
}

impl ToolContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context for a call to `name`.
    pub fn for_tool(name: impl Into<String>) -> Self {
        Self {
            tool_name: Some(name.into()),
        }
    }

    /// Name of the tool being invoked, if known.
    pub fn tool_name(&self) -> Option<&str> {
        self.tool_name.as_deref()
    }
}
