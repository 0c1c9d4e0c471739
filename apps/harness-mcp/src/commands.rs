//! One-shot commands: `--list-tools`, `--lint`, `--print-schema`.

use anyhow::{Context, Result};
use colored::Colorize;
use harness_config::HarnessConfig;
use harness_tools_core::ToolsetGroup;
use harness_tools_registry::{ToolsetCatalog, register_allowed_toolsets};

/// Register every catalog toolset without consulting the license service.
fn build_all(cfg: &HarnessConfig, catalog: &ToolsetCatalog) -> Result<ToolsetGroup> {
    let mut group = ToolsetGroup::new(false);
    register_allowed_toolsets(&mut group, cfg, &catalog.names(), catalog)
        .context("building toolsets")?;
    Ok(group)
}

pub fn list_tools(cfg: &HarnessConfig) -> Result<()> {
    let catalog = ToolsetCatalog::builtin();
    let group = build_all(cfg, &catalog)?;

    for entry in catalog.entries() {
        let Some(toolset) = group.get(entry.name) else {
            continue;
        };
        println!(
            "{} {} - {}",
            entry.name.bold(),
            format!("[{}]", entry.module).dimmed(),
            entry.description
        );
        for name in toolset.read_tools().list_names() {
            println!("  {name}");
        }
        for name in toolset.write_tools().list_names() {
            println!("  {name} {}", "(write)".yellow());
        }
    }
    Ok(())
}

pub fn lint(cfg: &HarnessConfig) -> Result<()> {
    let group = build_all(cfg, &ToolsetCatalog::builtin())?;
    let names = group.all_tool_names();
    let errors = mcplint::validate_tools(&names);

    if errors.is_empty() {
        println!("{} {} tool names", "ok".green().bold(), names.len());
        return Ok(());
    }
    for e in &errors {
        println!("{} {e}", "error".red().bold());
    }
    anyhow::bail!("{} of {} tool names failed lint", errors.len(), names.len())
}

/// Lint the served registry and log any violations.
pub fn warn_on_lint(names: &[String]) {
    for e in mcplint::validate_tools(names) {
        tracing::warn!(tool = e.name(), "{e}");
    }
}

pub fn print_schema() -> Result<()> {
    println!("{}", harness_config::schema_json_pretty()?);
    Ok(())
}
