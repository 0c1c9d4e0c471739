//! Configuration loader with two-layer merge and env overrides.
//!
//! The loading process:
//! 1. Read global config from `~/.config/harness-mcp/harness-mcp.json`
//! 2. Read local config from `<dir>/harness-mcp.json`
//! 3. Deep merge at JSON Value level (RFC 7396)
//! 4. Deserialize once into typed [`HarnessConfig`]
//! 5. Apply env var overrides (highest precedence)
//! 6. Derive the account id from the API key if still unset
//! 7. Run advisory validation

use crate::{merge::merge_patch, types::HarnessConfig, validation::AdvisoryWarning};
use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Filename for local config.
pub const LOCAL_FILE: &str = "harness-mcp.json";

/// Directory name under config_dir for global config.
pub const GLOBAL_DIR: &str = "harness-mcp";

/// Filename for global config.
pub const GLOBAL_FILE: &str = "harness-mcp.json";

/// Resolved paths for config files.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Path to local config.
    pub local: PathBuf,

    /// Path to global config, if a config dir exists on this platform.
    pub global: Option<PathBuf>,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct LoadedConfig {
    /// The loaded and merged configuration.
    pub config: HarnessConfig,

    /// Advisory warnings from validation.
    pub warnings: Vec<AdvisoryWarning>,

    /// Resolved config file paths.
    pub paths: ConfigPaths,
}

/// Get the global config file path.
///
/// Returns `~/.config/harness-mcp/harness-mcp.json` on Unix-like systems.
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(GLOBAL_DIR).join(GLOBAL_FILE))
}

/// Get the local config file path for a given directory.
pub fn local_config_path(local_dir: &Path) -> PathBuf {
    local_dir.join(LOCAL_FILE)
}

/// Load and merge configuration from global and local files.
///
/// # Precedence (lowest to highest)
/// 1. Default values
/// 2. Global config
/// 3. Local config
/// 4. Environment variables
pub fn load_merged(local_dir: &Path) -> Result<LoadedConfig> {
    load_merged_from(global_config_path(), local_dir)
}

/// Like [`load_merged`], with an explicit global config path.
pub fn load_merged_from(global_path: Option<PathBuf>, local_dir: &Path) -> Result<LoadedConfig> {
    let local_path = local_config_path(local_dir);

    let global_v = match &global_path {
        Some(p) => read_json_object_or_empty(p)?,
        None => Value::Object(serde_json::Map::new()),
    };
    let local_v = read_json_object_or_empty(&local_path)?;

    let merged = merge_patch(global_v, local_v);

    let mut cfg: HarnessConfig =
        serde_json::from_value(merged).context("Failed to deserialize merged harness config")?;

    apply_env_overrides(&mut cfg);
    derive_account_id(&mut cfg);

    let warnings = crate::validation::validate(&cfg);
    for w in &warnings {
        tracing::debug!(code = w.code, path = w.path, "{}", w.message);
    }

    Ok(LoadedConfig {
        config: cfg,
        warnings,
        paths: ConfigPaths {
            local: local_path,
            global: global_path,
        },
    })
}

/// Apply environment variable overrides to the config.
fn apply_env_overrides(cfg: &mut HarnessConfig) {
    if let Some(v) = env_trimmed("HARNESS_BASE_URL") {
        cfg.server.base_url = v;
    }
    if let Some(k) = env_trimmed("HARNESS_API_KEY") {
        cfg.server.api_key = Some(SecretString::from(k));
    }
    if let Some(v) = env_trimmed("HARNESS_ACCOUNT_ID") {
        cfg.server.account_id = Some(v);
    }
    if let Some(v) = env_trimmed("HARNESS_DEFAULT_ORG_ID") {
        cfg.server.default_org_id = Some(v);
    }
    if let Some(v) = env_trimmed("HARNESS_DEFAULT_PROJECT_ID") {
        cfg.server.default_project_id = Some(v);
    }
    if let Some(v) = env_trimmed("HARNESS_TOOLSETS") {
        cfg.server.toolsets = split_list(&v);
    }
    if let Some(v) = env_trimmed("HARNESS_READ_ONLY") {
        cfg.server.read_only = parse_bool(&v);
    }
    if let Some(v) = env_trimmed("HARNESS_ENABLE_LICENSE") {
        cfg.license.enabled = parse_bool(&v);
    }
    if let Some(v) = env_trimmed("HARNESS_LOG_LEVEL") {
        cfg.logging.level = v;
    }
    if let Some(v) = env_trimmed("HARNESS_LOG_JSON") {
        cfg.logging.json = parse_bool(&v);
    }
}

fn derive_account_id(cfg: &mut HarnessConfig) {
    if cfg.server.account_id.is_some() {
        return;
    }
    cfg.server.account_id = cfg
        .server
        .api_key
        .as_ref()
        .and_then(|k| harness_client::account_id_from_api_key(k.expose_secret()));
}

/// Split a comma-separated list, trimming entries and dropping empties.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(v: &str) -> bool {
    v.eq_ignore_ascii_case("true") || v == "1"
}

/// Helper to read and normalize an env var (trim + filter empty).
fn env_trimmed(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a JSON file as a Value, returning empty object if file doesn't exist.
fn read_json_object_or_empty(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Ok(Value::Object(serde_json::Map::new()));
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let v: Value = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    match v {
        Value::Object(_) => Ok(v),
        _ => anyhow::bail!("Config root must be a JSON object: {}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harness_client::test_support::EnvGuard;
    use serial_test::serial;
    use tempfile::TempDir;

    const ENV_KEYS: [&str; 10] = [
        "HARNESS_BASE_URL",
        "HARNESS_API_KEY",
        "HARNESS_ACCOUNT_ID",
        "HARNESS_DEFAULT_ORG_ID",
        "HARNESS_DEFAULT_PROJECT_ID",
        "HARNESS_TOOLSETS",
        "HARNESS_READ_ONLY",
        "HARNESS_ENABLE_LICENSE",
        "HARNESS_LOG_LEVEL",
        "HARNESS_LOG_JSON",
    ];

    fn clean_env() -> Vec<EnvGuard> {
        ENV_KEYS.into_iter().map(EnvGuard::remove).collect()
    }

    fn load(global: Option<&Path>, local: &Path) -> LoadedConfig {
        load_merged_from(global.map(Path::to_path_buf), local).unwrap()
    }

    #[test]
    #[serial(env)]
    fn test_load_no_files_returns_defaults() {
        let _env = clean_env();
        let temp = TempDir::new().unwrap();
        let loaded = load(None, temp.path());

        assert_eq!(loaded.config.server.base_url, crate::types::DEFAULT_BASE_URL);
        assert!(loaded.config.server.toolsets.is_empty());
        assert!(loaded.config.license.enabled);
    }

    #[test]
    #[serial(env)]
    fn test_local_overrides_global() {
        let _env = clean_env();
        let temp = TempDir::new().unwrap();
        let global = temp.path().join("global.json");
        std::fs::write(
            &global,
            r#"{"server": {"toolsets": ["ccm"], "default_org_id": "global-org"}}"#,
        )
        .unwrap();
        std::fs::write(
            temp.path().join(LOCAL_FILE),
            r#"{"server": {"toolsets": ["pipelines", "chaos"]}}"#,
        )
        .unwrap();

        let loaded = load(Some(&global), temp.path());
        assert_eq!(loaded.config.server.toolsets, vec!["pipelines", "chaos"]);
        assert_eq!(
            loaded.config.server.default_org_id.as_deref(),
            Some("global-org")
        );
    }

    #[test]
    #[serial(env)]
    fn test_local_null_removes_global_value() {
        let _env = clean_env();
        let temp = TempDir::new().unwrap();
        let global = temp.path().join("global.json");
        std::fs::write(&global, r#"{"server": {"default_project_id": "p1"}}"#).unwrap();
        std::fs::write(
            temp.path().join(LOCAL_FILE),
            r#"{"server": {"default_project_id": null}}"#,
        )
        .unwrap();

        let loaded = load(Some(&global), temp.path());
        assert!(loaded.config.server.default_project_id.is_none());
    }

    #[test]
    #[serial(env)]
    fn test_env_overrides_files() {
        let _env = clean_env();
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(LOCAL_FILE),
            r#"{"server": {"toolsets": ["ccm"], "read_only": false}, "license": {"enabled": true}}"#,
        )
        .unwrap();

        let _t = EnvGuard::set("HARNESS_TOOLSETS", " pipelines, ,chaos ");
        let _r = EnvGuard::set("HARNESS_READ_ONLY", "TRUE");
        let _l = EnvGuard::set("HARNESS_ENABLE_LICENSE", "false");
        let _j = EnvGuard::set("HARNESS_LOG_JSON", "1");

        let loaded = load(None, temp.path());
        assert_eq!(loaded.config.server.toolsets, vec!["pipelines", "chaos"]);
        assert!(loaded.config.server.read_only);
        assert!(!loaded.config.license.enabled);
        assert!(loaded.config.logging.json);
    }

    #[test]
    #[serial(env)]
    fn test_account_derived_from_api_key() {
        let _env = clean_env();
        let _k = EnvGuard::set("HARNESS_API_KEY", "pat.acct42.tok.secret");
        let temp = TempDir::new().unwrap();

        let loaded = load(None, temp.path());
        assert_eq!(loaded.config.server.account_id.as_deref(), Some("acct42"));
    }

    #[test]
    #[serial(env)]
    fn test_explicit_account_wins_over_key() {
        let _env = clean_env();
        let _k = EnvGuard::set("HARNESS_API_KEY", "pat.acct42.tok.secret");
        let _a = EnvGuard::set("HARNESS_ACCOUNT_ID", "explicit");
        let temp = TempDir::new().unwrap();

        let loaded = load(None, temp.path());
        assert_eq!(loaded.config.server.account_id.as_deref(), Some("explicit"));
    }

    #[test]
    #[serial(env)]
    fn test_invalid_json_errors() {
        let _env = clean_env();
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(LOCAL_FILE), "not valid json").unwrap();

        let err = load_merged_from(None, temp.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid JSON"));
    }

    #[test]
    #[serial(env)]
    fn test_non_object_root_errors() {
        let _env = clean_env();
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(LOCAL_FILE), "[1, 2, 3]").unwrap();

        let err = load_merged_from(None, temp.path()).unwrap_err();
        assert!(err.to_string().contains("must be a JSON object"));
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("a, b,,c "), vec!["a", "b", "c"]);
        assert!(split_list(" , ").is_empty());
    }

    #[test]
    fn test_paths_are_set() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths {
            local: local_config_path(temp.path()),
            global: global_config_path(),
        };
        assert_eq!(paths.local, temp.path().join(LOCAL_FILE));
        if let Some(global) = paths.global {
            assert!(global.ends_with("harness-mcp/harness-mcp.json"));
        }
    }
}
