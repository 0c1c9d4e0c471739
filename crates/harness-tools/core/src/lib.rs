//! Core traits and types for the Harness MCP tool family.
//!
//! This crate provides:
//! - [`Tool`] trait: one callable tool with typed input and output
//! - [`ToolRegistry`]: name-keyed tool storage with JSON dispatch
//! - [`Toolset`] / [`ToolsetGroup`]: named tool groups and the enabled subset
//! - [`TextFormat`] trait: transport-agnostic text formatting for tool outputs

pub mod context;
pub mod error;
pub mod fmt;
pub mod registry;
pub mod schema;
pub mod tool;
pub mod toolset;

pub use context::ToolContext;
pub use error::ToolError;
pub use fmt::{TextFormat, TextOptions, TextStyle, fallback_text_from_json};
pub use registry::{ErasedTool, FormattedResult, ToolRegistry, ToolRegistryBuilder};
pub use tool::Tool;
pub use toolset::{Toolset, ToolsetGroup};

// Re-export BoxFuture so tool crates do not need a direct futures dependency
pub use futures::future::BoxFuture;
