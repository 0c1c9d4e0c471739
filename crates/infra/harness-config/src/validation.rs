//! Advisory validation for [`HarnessConfig`].
//!
//! Validation produces warnings but never rejects a config; the server still
//! starts and the caller decides how loudly to report.

use crate::types::HarnessConfig;

/// An advisory warning about a configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryWarning {
    /// Machine-readable warning code.
    pub code: &'static str,

    /// Human-readable warning message.
    pub message: String,

    /// JSON path to the problematic config field.
    pub path: &'static str,
}

impl std::fmt::Display for AdvisoryWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.path, self.message)
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a configuration and return advisory warnings.
pub fn validate(cfg: &HarnessConfig) -> Vec<AdvisoryWarning> {
    let mut warnings = vec![];
    let server = &cfg.server;

    if !server.base_url.starts_with("http://") && !server.base_url.starts_with("https://") {
        warnings.push(AdvisoryWarning {
            code: "server.base_url.invalid",
            path: "server.base_url",
            message: format!("Expected an http(s) URL, got: '{}'", server.base_url),
        });
    }

    if server.api_key.is_none() {
        warnings.push(AdvisoryWarning {
            code: "server.api_key.missing",
            path: "server.api_key",
            message: "No API key set; export HARNESS_API_KEY".into(),
        });
    }

    if server.account_id.is_none() {
        warnings.push(AdvisoryWarning {
            code: "server.account_id.missing",
            path: "server.account_id",
            message: "No account id set and none could be derived from the API key".into(),
        });
    }

    if server.toolsets.iter().any(|t| t.trim().is_empty()) {
        warnings.push(AdvisoryWarning {
            code: "server.toolsets.empty_entry",
            path: "server.toolsets",
            message: "Toolset list contains an empty name".into(),
        });
    }

    if cfg.output.max_items == Some(0) {
        warnings.push(AdvisoryWarning {
            code: "output.max_items.zero",
            path: "output.max_items",
            message: "max_items of 0 hides every row".into(),
        });
    }

    if !LOG_LEVELS.contains(&cfg.logging.level.to_lowercase().as_str()) {
        warnings.push(AdvisoryWarning {
            code: "logging.level.invalid",
            path: "logging.level",
            message: format!(
                "Unknown log level '{}'. Expected one of: {}",
                cfg.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn configured() -> HarnessConfig {
        let mut config = HarnessConfig::default();
        config.server.api_key = Some(SecretString::from("pat.a.b.c".to_string()));
        config.server.account_id = Some("a".into());
        config
    }

    fn codes(cfg: &HarnessConfig) -> Vec<&'static str> {
        validate(cfg).into_iter().map(|w| w.code).collect()
    }

    #[test]
    fn test_configured_defaults_have_no_warnings() {
        assert!(codes(&configured()).is_empty());
    }

    #[test]
    fn test_missing_credentials_warn() {
        let codes = codes(&HarnessConfig::default());
        assert!(codes.contains(&"server.api_key.missing"));
        assert!(codes.contains(&"server.account_id.missing"));
    }

    #[test]
    fn test_invalid_base_url_warns() {
        let mut config = configured();
        config.server.base_url = "app.harness.io".into();
        assert_eq!(codes(&config), vec!["server.base_url.invalid"]);
    }

    #[test]
    fn test_empty_toolset_entry_warns() {
        let mut config = configured();
        config.server.toolsets = vec!["pipelines".into(), " ".into()];
        assert_eq!(codes(&config), vec!["server.toolsets.empty_entry"]);
    }

    #[test]
    fn test_invalid_log_level_warns() {
        let mut config = configured();
        config.logging.level = "verbose".into();
        assert_eq!(codes(&config), vec!["logging.level.invalid"]);
    }

    #[test]
    fn test_warning_display() {
        let warning = AdvisoryWarning {
            code: "test.code",
            path: "test.path",
            message: "Test message".into(),
        };
        assert_eq!(warning.to_string(), "[test.code] test.path: Test message");
    }
}
