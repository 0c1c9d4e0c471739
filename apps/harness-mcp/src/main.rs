//! MCP server exposing Harness platform toolsets over stdio.
//!
//! Toolsets are selected by configuration and gated on the account's module
//! licenses; see `harness-tools-registry`.

mod commands;
mod logging;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use harness_config::{HarnessConfig, OutputStyle, load_merged};
use harness_tools_core::{TextOptions, TextStyle};
use harness_tools_mcp::{OutputMode, RegistryServer, ServiceExt, stdio};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "harness-mcp")]
#[command(about = "MCP server for the Harness platform", version)]
struct Args {
    /// Directory holding the local harness-mcp.json (default: current directory)
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Comma-separated toolsets to serve, or "all". Overrides configuration.
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    toolsets: Option<Vec<String>>,

    /// Serve read tools only
    #[arg(long)]
    read_only: bool,

    /// Result mode. Overrides configuration.
    #[arg(long, value_enum)]
    output: Option<OutputArg>,

    /// List every toolset and its tools, then exit
    #[arg(long)]
    list_tools: bool,

    /// Check every tool name against the naming rules, then exit
    #[arg(long)]
    lint: bool,

    /// Print the JSON Schema of harness-mcp.json, then exit
    #[arg(long)]
    print_schema: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputArg {
    Text,
    Structured,
}

fn apply_args(cfg: &mut HarnessConfig, args: &Args) {
    if let Some(toolsets) = &args.toolsets {
        cfg.server.toolsets = toolsets
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
    if args.read_only {
        cfg.server.read_only = true;
    }
    match args.output {
        Some(OutputArg::Text) => cfg.output.mode = harness_config::OutputMode::Text,
        Some(OutputArg::Structured) => cfg.output.mode = harness_config::OutputMode::Structured,
        None => {}
    }
}

fn text_options(cfg: &HarnessConfig) -> TextOptions {
    let style = match cfg.output.style {
        OutputStyle::Json => TextStyle::Json,
        OutputStyle::Table => TextStyle::Table,
    };
    TextOptions::new()
        .with_style(style)
        .with_markdown(cfg.output.markdown)
        .with_max_items(cfg.output.max_items)
}

const fn output_mode(cfg: &HarnessConfig) -> OutputMode {
    match cfg.output.mode {
        harness_config::OutputMode::Text => OutputMode::Text,
        harness_config::OutputMode::Structured => OutputMode::Structured,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_schema {
        return commands::print_schema();
    }

    let local_dir = match &args.config_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("reading current directory")?,
    };
    let loaded = load_merged(&local_dir)?;
    let mut cfg = loaded.config;
    apply_args(&mut cfg, &args);

    logging::init(&cfg.logging);
    for w in &loaded.warnings {
        warn!(code = w.code, path = w.path, "{}", w.message);
    }

    // Install the rustls CryptoProvider before any HTTP clients are created.
    // rustls 0.23+ panics if it cannot auto-select a single provider.
    if rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .is_err()
    {
        warn!("a rustls crypto provider was already installed");
    }

    if args.lint {
        return commands::lint(&cfg);
    }
    if args.list_tools {
        return commands::list_tools(&cfg);
    }

    let group = harness_tools_registry::init_toolsets(&cfg).await?;
    let registry = group.registry();
    commands::warn_on_lint(&registry.list_names());

    let enabled = group.enabled_names().join(", ");
    info!(
        tools = registry.len(),
        toolsets = %enabled,
        read_only = cfg.server.read_only,
        mode = ?cfg.output.mode,
        "starting harness-mcp"
    );

    let server = RegistryServer::new(Arc::new(registry))
        .with_info("harness-mcp", env!("CARGO_PKG_VERSION"))
        .with_output_mode(output_mode(&cfg))
        .with_text_options(text_options(&cfg))
        .with_instructions(format!(
            "Tools for the Harness platform. Enabled toolsets: {enabled}. \
             org_id and project_id default to the configured scope when omitted."
        ));
    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
