//! JSON Schema for `harness-mcp.json`, for editor autocomplete and validation.

use crate::types::HarnessConfig;
use schemars::{Schema, generate::SchemaSettings};

/// Generate the JSON Schema for [`HarnessConfig`].
pub fn schema() -> Schema {
    SchemaSettings::default()
        .into_generator()
        .into_root_schema_for::<HarnessConfig>()
}

/// Generate the JSON Schema as a pretty-printed JSON string.
pub fn schema_json_pretty() -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&schema())?)
}
