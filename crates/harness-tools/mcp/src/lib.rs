//! MCP server integration for the Harness tool family.
//!
//! [`RegistryServer`] is an rmcp server handler that serves every tool in a
//! [`ToolRegistry`](harness_tools_core::ToolRegistry).

mod server;

pub use server::{OutputMode, RegistryServer};

pub use rmcp::transport::stdio;
pub use rmcp::{ServerHandler, service::ServiceExt};
