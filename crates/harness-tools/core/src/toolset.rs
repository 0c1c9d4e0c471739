//! Named tool groups and the set of groups served by one process.

use crate::registry::ToolRegistry;
use std::collections::BTreeSet;
use tracing::debug;

/// A named group of tools, split by whether a tool mutates state.
#[derive(Clone)]
pub struct Toolset {
    name: String,
    description: String,
    read_tools: ToolRegistry,
    write_tools: ToolRegistry,
}

impl Toolset {
    /// Create an empty toolset.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            read_tools: ToolRegistry::default(),
            write_tools: ToolRegistry::default(),
        }
    }

    /// Replace the read tools.
    #[must_use]
    pub fn with_read_tools(mut self, tools: ToolRegistry) -> Self {
        self.read_tools = tools;
        self
    }

    /// Replace the write tools.
    #[must_use]
    pub fn with_write_tools(mut self, tools: ToolRegistry) -> Self {
        self.write_tools = tools;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn read_tools(&self) -> &ToolRegistry {
        &self.read_tools
    }

    pub fn write_tools(&self) -> &ToolRegistry {
        &self.write_tools
    }

    /// Tools served for this toolset. Write tools are dropped in read-only mode.
    pub fn active_tools(&self, read_only: bool) -> ToolRegistry {
        if read_only {
            self.read_tools.clone()
        } else {
            ToolRegistry::merge_all([self.read_tools.clone(), self.write_tools.clone()])
        }
    }

    /// Names of every tool in the toolset, read and write, sorted.
    pub fn all_tool_names(&self) -> Vec<String> {
        let mut names: BTreeSet<String> = self.read_tools.list_names().into_iter().collect();
        names.extend(self.write_tools.list_names());
        names.into_iter().collect()
    }
}

/// The toolsets registered in this process, and which of them are enabled.
///
/// Toolsets keep registration order. Adding a toolset whose name is already
/// present replaces the earlier one in place.
#[derive(Clone, Default)]
pub struct ToolsetGroup {
    toolsets: Vec<Toolset>,
    enabled: BTreeSet<String>,
    read_only: bool,
}

impl ToolsetGroup {
    pub fn new(read_only: bool) -> Self {
        Self {
            read_only,
            ..Self::default()
        }
    }

    pub fn read_only(&self) -> bool {
        self.read_only
    }

    /// Add a toolset. It is not enabled until [`Self::enable_toolset`] is called.
    pub fn add_toolset(&mut self, toolset: Toolset) {
        if let Some(slot) = self.toolsets.iter_mut().find(|t| t.name == toolset.name) {
            *slot = toolset;
        } else {
            self.toolsets.push(toolset);
        }
    }

    /// Enable a registered toolset. Returns `false` if no toolset has that name.
    pub fn enable_toolset(&mut self, name: &str) -> bool {
        if self.get(name).is_none() {
            return false;
        }
        debug!(toolset = name, "enabling toolset");
        self.enabled.insert(name.to_string());
        true
    }

    /// Enable several toolsets, returning the names that were not registered.
    pub fn enable_toolsets<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        names
            .into_iter()
            .filter(|n| !self.enable_toolset(n))
            .map(str::to_string)
            .collect()
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled.contains(name)
    }

    pub fn get(&self, name: &str) -> Option<&Toolset> {
        self.toolsets.iter().find(|t| t.name == name)
    }

    /// Names of all registered toolsets, in registration order.
    pub fn toolset_names(&self) -> Vec<&str> {
        self.toolsets.iter().map(Toolset::name).collect()
    }

    /// Names of enabled toolsets, in registration order.
    pub fn enabled_names(&self) -> Vec<&str> {
        self.toolsets
            .iter()
            .map(Toolset::name)
            .filter(|n| self.enabled.contains(*n))
            .collect()
    }

    /// The registry served over MCP: tools of every enabled toolset.
    pub fn registry(&self) -> ToolRegistry {
        ToolRegistry::merge_all(
            self.toolsets
                .iter()
                .filter(|t| self.enabled.contains(&t.name))
                .map(|t| t.active_tools(self.read_only)),
        )
    }

    /// Names of every tool of every registered toolset, enabled or not.
    pub fn all_tool_names(&self) -> Vec<String> {
        let names: BTreeSet<String> = self
            .toolsets
            .iter()
            .flat_map(Toolset::all_tool_names)
            .collect();
        names.into_iter().collect()
    }
}

impl std::fmt::Debug for ToolsetGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolsetGroup")
            .field(
                "toolsets",
                &self.toolsets.iter().map(Toolset::name).collect::<Vec<_>>(),
            )
            .field("enabled", &self.enabled)
            .field("read_only", &self.read_only)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Tool, ToolContext, ToolError};
    use futures::future::BoxFuture;

    #[derive(Clone)]
    struct ListWidgets;

    impl Tool for ListWidgets {
        type Input = ();
        type Output = String;
        const NAME: &'static str = "list_widgets";
        const DESCRIPTION: &'static str = "List widgets";

        fn call(&self, _: (), _: &ToolContext) -> BoxFuture<'static, Result<String, ToolError>> {
            Box::pin(async { Ok(String::new()) })
        }
    }

    #[derive(Clone)]
    struct DeleteWidget;

    impl Tool for DeleteWidget {
        type Input = ();
        type Output = String;
        const NAME: &'static str = "delete_widget";
        const DESCRIPTION: &'static str = "Delete a widget";

        fn call(&self, _: (), _: &ToolContext) -> BoxFuture<'static, Result<String, ToolError>> {
            Box::pin(async { Ok(String::new()) })
        }
    }

    fn widgets() -> Toolset {
        Toolset::new("widgets", "Widget tools")
            .with_read_tools(ToolRegistry::builder().register(ListWidgets).finish())
            .with_write_tools(ToolRegistry::builder().register(DeleteWidget).finish())
    }

    #[test]
    fn disabled_toolsets_are_not_served() {
        let mut group = ToolsetGroup::new(false);
        group.add_toolset(widgets());
        assert!(group.registry().is_empty());
        assert_eq!(group.all_tool_names(), vec!["delete_widget", "list_widgets"]);
    }

    #[test]
    fn enabled_toolset_serves_read_and_write_tools() {
        let mut group = ToolsetGroup::new(false);
        group.add_toolset(widgets());
        assert!(group.enable_toolset("widgets"));
        assert_eq!(
            group.registry().list_names(),
            vec!["delete_widget", "list_widgets"]
        );
    }

    #[test]
    fn read_only_drops_write_tools() {
        let mut group = ToolsetGroup::new(true);
        group.add_toolset(widgets());
        group.enable_toolset("widgets");
        assert_eq!(group.registry().list_names(), vec!["list_widgets"]);
    }

    #[test]
    fn enabling_unknown_toolset_is_reported() {
        let mut group = ToolsetGroup::new(false);
        group.add_toolset(widgets());
        let missing = group.enable_toolsets(["widgets", "gadgets"]);
        assert_eq!(missing, vec!["gadgets"]);
        assert_eq!(group.enabled_names(), vec!["widgets"]);
        assert!(!group.is_enabled("gadgets"));
    }

    #[test]
    fn re_adding_a_toolset_replaces_it() {
        let mut group = ToolsetGroup::new(false);
        group.add_toolset(widgets());
        group.add_toolset(Toolset::new("widgets", "empty"));
        assert_eq!(group.toolset_names(), vec!["widgets"]);
        assert_eq!(group.get("widgets").map(Toolset::description), Some("empty"));
    }
}
