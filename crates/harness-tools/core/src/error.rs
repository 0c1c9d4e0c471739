//! Error returned by a tool call.

use thiserror::Error;

/// Failure of a single tool call, surfaced to the MCP client as an error result.
#[derive(Error, Debug)]
pub enum ToolError {
    /// Arguments were missing, malformed or rejected by the Harness API.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Failure inside the server itself.
    #[error("internal error: {0}")]
    Internal(String),

    /// Harness returned a server error or could not be reached.
    #[error("harness API error: {0}")]
    External(String),

    /// The API key lacks access to the resource.
    #[error("permission denied: {0}")]
    Permission(String),

    #[error("not found: {0}")]
    NotFound(String),
}

impl ToolError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Short label for log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::Internal(_) => "internal",
            Self::External(_) => "external",
            Self::Permission(_) => "permission",
            Self::NotFound(_) => "not_found",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_kind() {
        let err = ToolError::invalid_input("start_time is after end_time");
        assert_eq!(err.to_string(), "invalid input: start_time is after end_time");
        assert_eq!(err.kind(), "invalid_input");
        assert_eq!(
            ToolError::External("503".into()).to_string(),
            "harness API error: 503"
        );
    }
}
