//! Tool registry for dynamic JSON dispatch.

use crate::context::ToolContext;
use crate::error::ToolError;
use crate::fmt::{TextFormat, TextOptions};
use crate::schema;
use crate::tool::Tool;
use futures::future::BoxFuture;
use schemars::{JsonSchema, Schema};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// Result of a formatted dispatch: JSON data plus its text rendering.
#[derive(Debug, Clone)]
pub struct FormattedResult {
    /// The JSON-serialized output data.
    pub data: Value,
    /// Human-readable text rendered with the caller's [`TextOptions`].
    pub text: String,
}

/// Type-erased tool for dynamic dispatch.
pub trait ErasedTool: Send + Sync {
    /// Get the tool's name.
    fn name(&self) -> &'static str;

    /// Get the tool's description.
    fn description(&self) -> &'static str;

    /// Get the input JSON schema.
    fn input_schema(&self) -> Schema;

    /// Get the output JSON schema, when the output has an object root.
    fn output_schema(&self) -> Option<Schema>;

    /// Call the tool with JSON arguments, returning JSON data and formatted text.
    fn call_json_formatted(
        &self,
        args: Value,
        ctx: &ToolContext,
        text_opts: &TextOptions,
    ) -> BoxFuture<'static, Result<FormattedResult, ToolError>>;
}

/// Registry of tools keyed by name. Iteration order is by name.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    map: BTreeMap<String, Arc<dyn ErasedTool>>,
}

impl ToolRegistry {
    /// Create a new registry builder.
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    /// List all tool names in the registry, sorted.
    pub fn list_names(&self) -> Vec<String> {
        self.map.keys().cloned().collect()
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ErasedTool>> {
        self.map.get(name)
    }

    /// Create a subset registry containing only the specified tools.
    ///
    /// Names not found in the registry are ignored.
    pub fn subset<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Self {
        let allowed: HashSet<&str> = names.into_iter().collect();
        let map = self
            .map
            .iter()
            .filter(|(k, _)| allowed.contains(k.as_str()))
            .map(|(k, v)| (k.clone(), Arc::clone(v)))
            .collect();
        Self { map }
    }

    /// Dispatch a tool call using JSON arguments.
    pub async fn dispatch_json_formatted(
        &self,
        name: &str,
        args: Value,
        ctx: &ToolContext,
        text_opts: &TextOptions,
    ) -> Result<FormattedResult, ToolError> {
        let entry = self
            .map
            .get(name)
            .ok_or_else(|| ToolError::invalid_input(format!("Unknown tool: {name}")))?;
        entry.call_json_formatted(args, ctx, text_opts).await
    }

    /// Check if a tool is registered by name.
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Get the number of registered tools.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Clone and return the erased tool entries.
    pub fn iter_erased(&self) -> Vec<Arc<dyn ErasedTool>> {
        self.map.values().cloned().collect()
    }

    /// Merge multiple registries into one.
    ///
    /// Later entries with duplicate names overwrite earlier ones. Toolsets
    /// routinely share tools (the default toolset reuses pipeline and
    /// connector tools), so duplicates are expected.
    pub fn merge_all(regs: impl IntoIterator<Item = Self>) -> Self {
        let mut builder = Self::builder();
        for reg in regs {
            for erased in reg.iter_erased() {
                builder = builder.register_erased(erased);
            }
        }
        builder.finish()
    }
}

/// Builder for constructing a [`ToolRegistry`].
#[derive(Default)]
pub struct ToolRegistryBuilder {
    items: Vec<Arc<dyn ErasedTool>>,
}

impl ToolRegistryBuilder {
    /// Register a tool.
    ///
    /// Input must be deserializable with a JSON schema; output must be
    /// serializable and implement [`TextFormat`].
    #[must_use]
    pub fn register<T>(mut self, tool: T) -> Self
    where
        T: Tool + Clone,
        T::Input: DeserializeOwned + JsonSchema,
        T::Output: Serialize + JsonSchema + TextFormat,
    {
        struct Impl<T> {
            tool: T,
        }

        impl<T> ErasedTool for Impl<T>
        where
            T: Tool + Clone,
            T::Input: DeserializeOwned + JsonSchema,
            T::Output: Serialize + JsonSchema + TextFormat,
        {
            fn name(&self) -> &'static str {
                T::NAME
            }

            fn description(&self) -> &'static str {
                T::DESCRIPTION
            }

            fn input_schema(&self) -> Schema {
                schema::cached_schema_for::<T::Input>().as_ref().clone()
            }

            fn output_schema(&self) -> Option<Schema> {
                schema::cached_output_schema_for::<T::Output>()
                    .ok()
                    .map(|arc| arc.as_ref().clone())
            }

            fn call_json_formatted(
                &self,
                args: Value,
                ctx: &ToolContext,
                text_opts: &TextOptions,
            ) -> BoxFuture<'static, Result<FormattedResult, ToolError>> {
                let input: T::Input = match serde_json::from_value(args) {
                    Ok(input) => input,
                    Err(e) => {
                        let err = ToolError::invalid_input(e.to_string());
                        return Box::pin(async move { Err(err) });
                    }
                };
                let fut = self.tool.call(input, ctx);
                let text_opts = text_opts.clone();
                Box::pin(async move {
                    let out = fut.await?;
                    let text = out.fmt_text(&text_opts);
                    let data = serde_json::to_value(&out)
                        .map_err(|e| ToolError::internal(e.to_string()))?;
                    Ok(FormattedResult { data, text })
                })
            }
        }

        self.items.push(Arc::new(Impl { tool }));
        self
    }

    /// Register an already-erased tool entry.
    #[must_use]
    pub fn register_erased(mut self, erased: Arc<dyn ErasedTool>) -> Self {
        self.items.push(erased);
        self
    }

    /// Build the registry from registered tools.
    pub fn finish(self) -> ToolRegistry {
        let map = self
            .items
            .into_iter()
            .map(|erased| (erased.name().to_string(), erased))
            .collect();
        ToolRegistry { map }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct GetGreetingTool;

    impl Tool for GetGreetingTool {
        type Input = String;
        type Output = String;
        const NAME: &'static str = "get_greeting";
        const DESCRIPTION: &'static str = "Greets the caller";

        fn call(
            &self,
            input: Self::Input,
            _ctx: &ToolContext,
        ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
            Box::pin(async move { Ok(format!("Hello, {input}!")) })
        }
    }

    #[derive(Clone)]
    struct ListThingsTool;

    impl Tool for ListThingsTool {
        type Input = ();
        type Output = Value;
        const NAME: &'static str = "list_things";
        const DESCRIPTION: &'static str = "Lists things";

        fn call(
            &self,
            _input: (),
            _ctx: &ToolContext,
        ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
            Box::pin(async { Ok(serde_json::json!([{"id": "a"}, {"id": "b"}])) })
        }
    }

    fn registry() -> ToolRegistry {
        ToolRegistry::builder()
            .register(GetGreetingTool)
            .register(ListThingsTool)
            .finish()
    }

    #[test]
    fn test_registry_builder() {
        let registry = registry();
        assert!(registry.contains("get_greeting"));
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_list_names_sorted() {
        assert_eq!(registry().list_names(), vec!["get_greeting", "list_things"]);
    }

    #[test]
    fn test_registry_subset() {
        let registry = registry();
        let subset = registry.subset(["get_greeting", "nonexistent"]);
        assert_eq!(subset.list_names(), vec!["get_greeting"]);
        assert!(registry.subset(["nonexistent"]).is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_json_formatted() {
        let ctx = ToolContext::for_tool("get_greeting");
        let result = registry()
            .dispatch_json_formatted(
                "get_greeting",
                serde_json::json!("World"),
                &ctx,
                &TextOptions::default(),
            )
            .await
            .unwrap();
        assert_eq!(result.data, serde_json::json!("Hello, World!"));
        assert_eq!(result.text, "Hello, World!");
    }

    #[tokio::test]
    async fn test_dispatch_uses_text_options() {
        let opts = TextOptions::new().with_style(crate::fmt::TextStyle::Table);
        let result = registry()
            .dispatch_json_formatted("list_things", Value::Null, &ToolContext::new(), &opts)
            .await
            .unwrap();
        assert_eq!(result.text, "id\na\nb");
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool() {
        let result = registry()
            .dispatch_json_formatted(
                "nonexistent",
                Value::Null,
                &ToolContext::new(),
                &TextOptions::default(),
            )
            .await;
        assert!(matches!(result, Err(ToolError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_dispatch_bad_arguments() {
        let result = registry()
            .dispatch_json_formatted(
                "get_greeting",
                serde_json::json!({"not": "a string"}),
                &ToolContext::new(),
                &TextOptions::default(),
            )
            .await;
        assert!(matches!(result, Err(ToolError::InvalidInput(_))));
    }

    #[test]
    fn test_merge_all_last_wins() {
        let merged = ToolRegistry::merge_all(vec![registry(), registry()]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_merge_all_empty() {
        assert!(ToolRegistry::merge_all(Vec::<ToolRegistry>::new()).is_empty());
    }

    #[test]
    fn test_output_schema_absent_for_non_object() {
        let reg = registry();
        assert!(reg.get("get_greeting").unwrap().output_schema().is_none());
        assert!(reg.get("list_things").unwrap().output_schema().is_none());
    }
}
