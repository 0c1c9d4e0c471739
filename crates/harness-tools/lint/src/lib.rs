//! Naming-convention linter for MCP tool names.
//!
//! Every tool exposed by the server must have a name that:
//! 1. is non-empty,
//! 2. is at most [`MAX_TOOL_NAME_LEN`] bytes long,
//! 3. is snake_case (`^[a-z][a-z0-9_]*$`),
//! 4. starts with a verb from [`ALLOWED_VERBS`], or follows the
//!    `module_verb_...` pattern where the second segment is a verb.
//!
//! Checks run in that order and stop at the first failure.
//!
//! # Example
//!
//! ```
//! use mcplint::{validate_tool_name, validate_tools};
//!
//! assert!(validate_tool_name("get_pipeline").is_ok());
//! assert!(validate_tool_name("ccm_get_costs").is_ok());
//! assert!(validate_tool_name("pipeline_details").is_err());
//!
//! let errors = validate_tools(["list_pipelines", "getPipeline", ""]);
//! assert_eq!(errors.len(), 2);
//! ```

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Maximum tool name length accepted by MCP clients.
pub const MAX_TOOL_NAME_LEN: usize = 64;

/// Verbs a tool name may start with (or carry as its second segment).
pub const ALLOWED_VERBS: &[&str] = &[
    "get", "list", "create", "update", "delete", "fetch", "search", "run", "execute", "trigger",
    "enable", "disable", "add", "set", "check", "download", "upload",
];

#[expect(clippy::unwrap_used, reason = "pattern is a compile-time constant")]
static SNAKE_CASE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").unwrap());

/// A single naming-rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolNameError {
    /// The name is the empty string.
    #[error("tool name cannot be empty")]
    Empty,

    /// The name is longer than [`MAX_TOOL_NAME_LEN`].
    #[error("tool name '{name}' is too long: {len} bytes (maximum is {max})")]
    TooLong {
        name: String,
        len: usize,
        max: usize,
    },

    /// The name is not snake_case.
    #[error(
        "tool name '{name}' must be snake_case: start with a lowercase letter, \
         followed only by lowercase letters, digits or underscores"
    )]
    NotSnakeCase { name: String },

    /// Neither the first nor the second segment is an allowed verb.
    #[error(
        "tool name '{name}' must start with a verb ({verbs}) \
         or follow the module-prefixed pattern module_verb_..."
    )]
    MissingVerb { name: String, verbs: String },
}

impl ToolNameError {
    /// The offending tool name (empty for [`ToolNameError::Empty`]).
    pub fn name(&self) -> &str {
        match self {
            Self::Empty => "",
            Self::TooLong { name, .. }
            | Self::NotSnakeCase { name }
            | Self::MissingVerb { name, .. } => name,
        }
    }
}

/// Check one tool name against the naming contract.
pub fn validate_tool_name(name: &str) -> Result<(), ToolNameError> {
    if name.is_empty() {
        return Err(ToolNameError::Empty);
    }

    let len = name.len();
    if len > MAX_TOOL_NAME_LEN {
        return Err(ToolNameError::TooLong {
            name: name.to_string(),
            len,
            max: MAX_TOOL_NAME_LEN,
        });
    }

    if !SNAKE_CASE.is_match(name) {
        return Err(ToolNameError::NotSnakeCase {
            name: name.to_string(),
        });
    }

    if !has_verb_prefix(name) {
        return Err(ToolNameError::MissingVerb {
            name: name.to_string(),
            verbs: ALLOWED_VERBS.join(", "),
        });
    }

    Ok(())
}

/// Check every name and collect all violations.
///
/// Does not stop at the first failure. Returns an empty vector when all names
/// are valid, including for empty input.
pub fn validate_tools<I>(names: I) -> Vec<ToolNameError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    names
        .into_iter()
        .filter_map(|n| validate_tool_name(n.as_ref()).err())
        .collect()
}

/// Whether `word` is one of [`ALLOWED_VERBS`].
pub fn is_allowed_verb(word: &str) -> bool {
    ALLOWED_VERBS.contains(&word)
}

fn has_verb_prefix(name: &str) -> bool {
    let mut segments = name.split('_');
    let first = segments.next().unwrap_or_default();
    if is_allowed_verb(first) {
        return true;
    }
    segments.next().is_some_and(is_allowed_verb)
}
