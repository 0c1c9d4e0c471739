//! Splitting a toolset request into allowed and denied names.

use crate::catalog::{ALL_TOOLSETS, ToolsetCatalog};
use crate::license::LicenseInfo;
use std::collections::{BTreeMap, BTreeSet};

/// Reason given for a requested name the catalog does not know.
pub const REASON_UNKNOWN: &str = "unknown toolset";

/// Outcome of [`validate_toolsets`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolsetPartition {
    /// Licensed toolsets, in request order.
    pub allowed: Vec<String>,
    /// Toolset name to the reason it was not allowed.
    pub denied: BTreeMap<String, String>,
}

/// Partition `requested` by license.
///
/// Names are trimmed and blanks dropped. Repeats collapse to the first
/// occurrence. `"all"` expands in place to every catalog toolset.
pub fn validate_toolsets<S: AsRef<str>>(
    requested: &[S],
    licenses: &LicenseInfo,
    catalog: &ToolsetCatalog,
) -> ToolsetPartition {
    let mut seen = BTreeSet::new();
    let mut partition = ToolsetPartition::default();

    for name in expand(requested, catalog) {
        if !seen.insert(name.clone()) {
            continue;
        }
        match catalog.get(&name) {
            None => {
                partition.denied.insert(name, REASON_UNKNOWN.to_string());
            }
            Some(entry) if licenses.is_module_licensed(entry.module) => {
                partition.allowed.push(name);
            }
            Some(entry) => {
                partition
                    .denied
                    .insert(name, format!("module {} is not licensed", entry.module));
            }
        }
    }
    partition
}

fn expand<S: AsRef<str>>(requested: &[S], catalog: &ToolsetCatalog) -> Vec<String> {
    let mut names = Vec::with_capacity(requested.len());
    for raw in requested {
        let name = raw.as_ref().trim();
        if name.is_empty() {
            continue;
        }
        if name == ALL_TOOLSETS {
            names.extend(catalog.names().into_iter().map(str::to_string));
        } else {
            names.push(name.to_string());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ToolsetEntry;
    use harness_config::HarnessConfig;
    use harness_tools_core::Toolset;
    use proptest::prelude::*;

    fn empty(_: &HarnessConfig) -> anyhow::Result<Toolset> {
        Ok(Toolset::new("x", "x"))
    }

    fn catalog() -> ToolsetCatalog {
        let entry = |name, module| ToolsetEntry {
            name,
            module,
            description: "",
            register: empty,
        };
        ToolsetCatalog::new([
            entry("default", "CORE"),
            entry("pipelines", "CORE"),
            entry("ccm", "CCM"),
            entry("chaos", "CHAOS"),
            entry("idp", "IDP"),
        ])
    }

    fn licenses() -> LicenseInfo {
        let mut info = LicenseInfo::invalid("acct");
        info.is_valid = true;
        info.module_licenses.insert("CCM".into(), true);
        info.module_licenses.insert("CHAOS".into(), false);
        info
    }

    #[test]
    fn licensed_unlicensed_and_unknown() {
        let p = validate_toolsets(&["ccm", "chaos", "pipelines", "nope"], &licenses(), &catalog());
        assert_eq!(p.allowed, vec!["ccm", "pipelines"]);
        assert_eq!(p.denied["chaos"], "module CHAOS is not licensed");
        assert_eq!(p.denied["nope"], REASON_UNKNOWN);
        assert_eq!(p.denied.len(), 2);
    }

    #[test]
    fn module_missing_from_license_map_is_denied() {
        let p = validate_toolsets(&["idp"], &licenses(), &catalog());
        assert!(p.allowed.is_empty());
        assert_eq!(p.denied["idp"], "module IDP is not licensed");
    }

    #[test]
    fn duplicates_and_blanks_collapse() {
        let p = validate_toolsets(&[" ccm", "ccm", "", "pipelines", "ccm "], &licenses(), &catalog());
        assert_eq!(p.allowed, vec!["ccm", "pipelines"]);
        assert!(p.denied.is_empty());
    }

    #[test]
    fn all_expands_in_catalog_order() {
        let p = validate_toolsets(&["ccm", "all"], &licenses(), &catalog());
        assert_eq!(p.allowed, vec!["ccm", "default", "pipelines"]);
        assert_eq!(
            p.denied.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["chaos", "idp"]
        );
    }

    #[test]
    fn empty_request_is_empty_partition() {
        let none: [&str; 0] = [];
        assert_eq!(validate_toolsets(&none, &licenses(), &catalog()), ToolsetPartition::default());
    }

    proptest! {
        #[test]
        fn partition_covers_request_exactly(
            requested in prop::collection::vec(
                prop::sample::select(vec!["default", "pipelines", "ccm", "chaos", "idp", "sto", "x1"]),
                0..12,
            )
        ) {
            let cat = catalog();
            let lic = licenses();
            let p = validate_toolsets(&requested, &lic, &cat);

            let allowed: BTreeSet<&str> = p.allowed.iter().map(String::as_str).collect();
            let denied: BTreeSet<&str> = p.denied.keys().map(String::as_str).collect();
            let want: BTreeSet<&str> = requested.iter().copied().collect();

            prop_assert_eq!(allowed.len(), p.allowed.len());
            prop_assert!(allowed.is_disjoint(&denied));
            prop_assert_eq!(allowed.union(&denied).copied().collect::<BTreeSet<_>>(), want);

            for name in &p.allowed {
                let module = cat.get(name).map(|e| e.module).unwrap_or_default();
                prop_assert!(lic.is_module_licensed(module));
            }
            for reason in p.denied.values() {
                prop_assert!(!reason.is_empty());
            }

            let order: Vec<&str> = requested
                .iter()
                .copied()
                .filter(|n| allowed.contains(n))
                .fold(Vec::new(), |mut acc, n| {
                    if !acc.contains(&n) {
                        acc.push(n);
                    }
                    acc
                });
            prop_assert_eq!(p.allowed.iter().map(String::as_str).collect::<Vec<_>>(), order);
        }
    }
}
