//! RegistryServer behaviour without a transport.

use futures::future::BoxFuture;
use harness_tools_core::fmt::{TextFormat, TextOptions, TextStyle};
use harness_tools_core::{Tool, ToolContext, ToolError, ToolRegistry};
use harness_tools_mcp::{OutputMode, RegistryServer};
use rmcp::model::RawContent;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Clone)]
struct GetPipelineTool;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
struct GetPipelineInput {
    /// Pipeline identifier
    pipeline_id: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
struct PipelineSummary {
    identifier: String,
    stages: u32,
}

impl TextFormat for PipelineSummary {
    fn fmt_text(&self, _opts: &TextOptions) -> String {
        format!("{} ({} stages)", self.identifier, self.stages)
    }
}

impl Tool for GetPipelineTool {
    type Input = GetPipelineInput;
    type Output = PipelineSummary;
    const NAME: &'static str = "get_pipeline";
    const DESCRIPTION: &'static str = "Get a pipeline";

    fn call(
        &self,
        input: Self::Input,
        _ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        Box::pin(async move {
            if input.pipeline_id == "missing" {
                return Err(ToolError::not_found("pipeline missing"));
            }
            Ok(PipelineSummary {
                identifier: input.pipeline_id,
                stages: 3,
            })
        })
    }
}

/// Returns raw JSON like the Harness tools do.
#[derive(Clone)]
struct ListPipelinesTool;

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
struct ListPipelinesInput {}

impl Tool for ListPipelinesTool {
    type Input = ListPipelinesInput;
    type Output = Value;
    const NAME: &'static str = "list_pipelines";
    const DESCRIPTION: &'static str = "List pipelines";

    fn call(
        &self,
        _input: Self::Input,
        _ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        Box::pin(async move { Ok(json!([{"id": "a"}, {"id": "b"}, {"id": "c"}])) })
    }
}

fn registry() -> Arc<ToolRegistry> {
    Arc::new(
        ToolRegistry::builder()
            .register(GetPipelineTool)
            .register(ListPipelinesTool)
            .finish(),
    )
}

fn text_of(res: &rmcp::model::CallToolResult) -> String {
    res.content
        .iter()
        .filter_map(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.clone()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn lists_every_tool_sorted() {
    let server = RegistryServer::new(registry());
    assert_eq!(server.tool_names(), vec!["get_pipeline", "list_pipelines"]);

    let defs = server.tool_definitions();
    assert_eq!(defs.len(), 2);
    assert_eq!(defs[0].name, "get_pipeline");
    assert_eq!(defs[0].input_schema.get("type"), Some(&json!("object")));
    assert!(defs[0].input_schema["properties"]["pipeline_id"].is_object());
}

#[test]
fn output_schema_only_in_structured_mode() {
    let text = RegistryServer::new(registry());
    assert!(text.tool_definitions().iter().all(|t| t.output_schema.is_none()));

    let structured = RegistryServer::new(registry()).with_output_mode(OutputMode::Structured);
    let defs = structured.tool_definitions();
    assert!(defs[0].output_schema.is_some());
    // `Value` has no object-root schema
    assert!(defs[1].output_schema.is_none());
}

#[tokio::test]
async fn call_uses_text_format() {
    let server = RegistryServer::new(registry());
    let args = json!({"pipeline_id": "build"}).as_object().cloned();
    let res = server.call("get_pipeline", args).await;

    assert_eq!(res.is_error, Some(false));
    assert_eq!(text_of(&res), "build (3 stages)");
    assert!(res.structured_content.is_none());
}

#[tokio::test]
async fn structured_mode_adds_object_content() {
    let server = RegistryServer::new(registry()).with_output_mode(OutputMode::Structured);
    let args = json!({"pipeline_id": "build"}).as_object().cloned();
    let res = server.call("get_pipeline", args).await;
    assert_eq!(
        res.structured_content,
        Some(json!({"identifier": "build", "stages": 3}))
    );

    // arrays are not valid structured content
    let res = server.call("list_pipelines", None).await;
    assert!(res.structured_content.is_none());
}

#[tokio::test]
async fn text_options_apply_to_json_results() {
    let server = RegistryServer::new(registry()).with_text_options(
        TextOptions::new()
            .with_style(TextStyle::Table)
            .with_max_items(Some(2)),
    );
    let res = server.call("list_pipelines", None).await;
    let text = text_of(&res);
    assert!(text.starts_with("id\na\nb"), "{text}");
    assert!(!text.contains("\nc"), "{text}");
}

#[tokio::test]
async fn tool_errors_become_error_results() {
    let server = RegistryServer::new(registry());

    let res = server
        .call("get_pipeline", json!({"pipeline_id": "missing"}).as_object().cloned())
        .await;
    assert_eq!(res.is_error, Some(true));
    assert!(text_of(&res).contains("not found"));

    let res = server.call("get_pipeline", None).await;
    assert_eq!(res.is_error, Some(true));
    assert!(text_of(&res).contains("invalid input"));

    let res = server.call("delete_everything", None).await;
    assert_eq!(res.is_error, Some(true));
    assert!(text_of(&res).contains("Unknown tool"));
}
