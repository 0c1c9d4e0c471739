//! Startup orchestration: licenses, partition, registration.

use crate::catalog::{DEFAULT_TOOLSET, ToolsetCatalog};
use crate::error::RegistryError;
use crate::license::{LicenseInfo, init_license_validation};
use crate::partition::validate_toolsets;
use harness_client::Client;
use harness_config::HarnessConfig;
use harness_tools_core::ToolsetGroup;
use tracing::{debug, info, warn};

/// Build the toolset group for the built-in catalog.
///
/// # Errors
///
/// See [`init_toolsets_with`].
pub async fn init_toolsets(cfg: &HarnessConfig) -> Result<ToolsetGroup, RegistryError> {
    init_toolsets_with(cfg, &ToolsetCatalog::builtin()).await
}

/// Build the toolset group for `catalog`.
///
/// With no toolsets configured, or when the license lookup fails, only the
/// default toolset is served. Otherwise exactly the licensed subset of the
/// request is enabled and every denied toolset is logged.
///
/// # Errors
///
/// Fails if the license client cannot be built or an allowed toolset fails
/// to register. License lookup failures are not errors.
pub async fn init_toolsets_with(
    cfg: &HarnessConfig,
    catalog: &ToolsetCatalog,
) -> Result<ToolsetGroup, RegistryError> {
    let mut group = ToolsetGroup::new(cfg.server.read_only);

    let requested: Vec<&str> = cfg
        .server
        .toolsets
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if requested.is_empty() {
        info!("no toolsets configured; serving the default toolset");
        register_default(&mut group, cfg, catalog)?;
        return Ok(group);
    }

    let account_id = cfg.server.account_id.clone().unwrap_or_default();
    let licenses = if cfg.license.enabled {
        let client =
            Client::with_config(cfg.client_config()).map_err(RegistryError::LicenseClient)?;
        match init_license_validation(&client, &account_id).await {
            Ok(info) => info,
            Err(e) => {
                warn!(error = %e, "license validation failed; serving the default toolset");
                LicenseInfo::invalid(account_id)
            }
        }
    } else {
        info!("license checks disabled; every toolset counts as licensed");
        LicenseInfo::unrestricted(account_id, catalog.modules())
    };

    if !licenses.is_valid {
        register_default(&mut group, cfg, catalog)?;
        return Ok(group);
    }

    let partition = validate_toolsets(&requested, &licenses, catalog);
    for (toolset, reason) in &partition.denied {
        warn!(%toolset, %reason, "toolset denied");
    }

    register_allowed_toolsets(&mut group, cfg, &partition.allowed, catalog)?;
    group.enable_toolsets(partition.allowed.iter().map(String::as_str));

    let enabled = group.enabled_names();
    if enabled.is_empty() {
        warn!("no requested toolset is licensed; no tools will be served");
    } else {
        info!(toolsets = ?enabled, read_only = group.read_only(), "toolsets enabled");
    }
    Ok(group)
}

/// Run the registration fn of each allowed toolset and add the result to `group`.
///
/// Toolsets are added but not enabled.
///
/// # Errors
///
/// Stops at the first name missing from the catalog or the first failing
/// registration fn.
pub fn register_allowed_toolsets<S: AsRef<str>>(
    group: &mut ToolsetGroup,
    cfg: &HarnessConfig,
    allowed: &[S],
    catalog: &ToolsetCatalog,
) -> Result<(), RegistryError> {
    for name in allowed {
        let name = name.as_ref();
        let entry = catalog
            .get(name)
            .ok_or_else(|| RegistryError::UnknownToolset(name.to_string()))?;
        let toolset = (entry.register)(cfg).map_err(|e| RegistryError::Registration {
            toolset: name.to_string(),
            message: format!("{e:#}"),
        })?;
        if toolset.name() != entry.name {
            return Err(RegistryError::Registration {
                toolset: name.to_string(),
                message: format!("registration produced toolset '{}'", toolset.name()),
            });
        }
        debug!(toolset = %name, tools = toolset.all_tool_names().len(), "registered toolset");
        group.add_toolset(toolset);
    }
    Ok(())
}

fn register_default(
    group: &mut ToolsetGroup,
    cfg: &HarnessConfig,
    catalog: &ToolsetCatalog,
) -> Result<(), RegistryError> {
    register_allowed_toolsets(group, cfg, &[DEFAULT_TOOLSET], catalog)?;
    group.enable_toolset(DEFAULT_TOOLSET);
    Ok(())
}
