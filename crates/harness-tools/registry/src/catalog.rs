//! Static table of toolsets: name, owning license module, registration fn.

use harness_config::HarnessConfig;
use harness_tools_core::Toolset;
use harness_toolsets::{audit, ccm, chaos, connectors, default, idp, pipelines, secrets};
use std::collections::{BTreeMap, BTreeSet};

/// Name of the toolset served when licensing cannot be decided.
pub const DEFAULT_TOOLSET: &str = "default";
/// Pseudo toolset name that expands to every catalog entry.
pub const ALL_TOOLSETS: &str = "all";

/// License module every account has.
pub const CORE_MODULE: &str = "CORE";

/// Builds a toolset from configuration.
pub type RegisterFn = fn(&HarnessConfig) -> anyhow::Result<Toolset>;

/// One row of the catalog.
#[derive(Debug, Clone, Copy)]
pub struct ToolsetEntry {
    pub name: &'static str,
    /// License module that must be active for the toolset to be served.
    pub module: &'static str,
    pub description: &'static str,
    pub register: RegisterFn,
}

/// Ordered toolset table with a name index.
#[derive(Debug, Clone, Default)]
pub struct ToolsetCatalog {
    entries: Vec<ToolsetEntry>,
    index: BTreeMap<&'static str, usize>,
}

impl ToolsetCatalog {
    /// Build a catalog. A later entry with a duplicate name replaces the earlier one in place.
    pub fn new(entries: impl IntoIterator<Item = ToolsetEntry>) -> Self {
        let mut catalog = Self::default();
        for entry in entries {
            if let Some(&i) = catalog.index.get(entry.name) {
                catalog.entries[i] = entry;
            } else {
                catalog.index.insert(entry.name, catalog.entries.len());
                catalog.entries.push(entry);
            }
        }
        catalog
    }

    /// Every toolset this server ships.
    pub fn builtin() -> Self {
        Self::new([
            ToolsetEntry {
                name: DEFAULT_TOOLSET,
                module: CORE_MODULE,
                description: default::DESCRIPTION,
                register: default::register,
            },
            ToolsetEntry {
                name: pipelines::NAME,
                module: CORE_MODULE,
                description: pipelines::DESCRIPTION,
                register: pipelines::register,
            },
            ToolsetEntry {
                name: connectors::NAME,
                module: CORE_MODULE,
                description: connectors::DESCRIPTION,
                register: connectors::register,
            },
            ToolsetEntry {
                name: secrets::NAME,
                module: CORE_MODULE,
                description: secrets::DESCRIPTION,
                register: secrets::register,
            },
            ToolsetEntry {
                name: audit::NAME,
                module: CORE_MODULE,
                description: audit::DESCRIPTION,
                register: audit::register,
            },
            ToolsetEntry {
                name: ccm::NAME,
                module: "CCM",
                description: ccm::DESCRIPTION,
                register: ccm::register,
            },
            ToolsetEntry {
                name: chaos::NAME,
                module: "CHAOS",
                description: chaos::DESCRIPTION,
                register: chaos::register,
            },
            ToolsetEntry {
                name: idp::NAME,
                module: "IDP",
                description: idp::DESCRIPTION,
                register: idp::register,
            },
        ])
    }

    pub fn get(&self, name: &str) -> Option<&ToolsetEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    pub fn entries(&self) -> &[ToolsetEntry] {
        &self.entries
    }

    /// Toolset names in catalog order.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.name).collect()
    }

    /// License modules referenced by any entry.
    pub fn modules(&self) -> BTreeSet<&'static str> {
        self.entries.iter().map(|e| e.module).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty(_: &HarnessConfig) -> anyhow::Result<Toolset> {
        Ok(Toolset::new("x", "x"))
    }

    fn entry(name: &'static str, module: &'static str) -> ToolsetEntry {
        ToolsetEntry {
            name,
            module,
            description: "",
            register: empty,
        }
    }

    #[test]
    fn builtin_has_default_on_core() {
        let catalog = ToolsetCatalog::builtin();
        let default = catalog.get(DEFAULT_TOOLSET).unwrap();
        assert_eq!(default.module, CORE_MODULE);
        assert_eq!(catalog.names()[0], DEFAULT_TOOLSET);
        assert!(catalog.get(ALL_TOOLSETS).is_none());
        assert!(catalog.modules().contains("CCM"));
    }

    #[test]
    fn duplicate_names_replace_in_place() {
        let catalog = ToolsetCatalog::new([entry("a", "CORE"), entry("b", "CORE"), entry("a", "CCM")]);
        assert_eq!(catalog.names(), vec!["a", "b"]);
        assert_eq!(catalog.get("a").unwrap().module, "CCM");
        assert_eq!(catalog.len(), 2);
    }
}
