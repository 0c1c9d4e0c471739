//! Layered configuration for the Harness MCP server.
//!
//! This crate provides:
//! - [`HarnessConfig`]: the root configuration type
//! - [`load_merged`]: two-layer config loading (global + local) with env overrides
//! - [`schema`]: JSON Schema generation for IDE autocomplete
//! - [`validation`]: advisory validation that produces warnings
//!
//! # Configuration Precedence (lowest to highest)
//! 1. Default values
//! 2. Global config (`~/.config/harness-mcp/harness-mcp.json`)
//! 3. Local config (`./harness-mcp.json`)
//! 4. Environment variables
//!
//! # Environment Variables
//! - `HARNESS_BASE_URL`: gateway base URL
//! - `HARNESS_API_KEY`: API key (env-only)
//! - `HARNESS_ACCOUNT_ID`: account identifier
//! - `HARNESS_DEFAULT_ORG_ID`, `HARNESS_DEFAULT_PROJECT_ID`: default scope
//! - `HARNESS_TOOLSETS`: comma-separated toolset names
//! - `HARNESS_READ_ONLY`: serve read tools only ("true" or "1")
//! - `HARNESS_ENABLE_LICENSE`: gate toolsets on module licenses
//! - `HARNESS_LOG_LEVEL`, `HARNESS_LOG_JSON`: logging

pub mod loader;
pub mod merge;
pub mod schema;
pub mod types;
pub mod validation;

pub use loader::{LoadedConfig, load_merged, load_merged_from};
pub use schema::schema_json_pretty;
pub use types::{HarnessConfig, OutputMode, OutputStyle};
