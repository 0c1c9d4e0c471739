use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

/// Default Harness SaaS base URL
pub const HARNESS_DEFAULT_BASE: &str = "https://app.harness.io/gateway";
/// Header name for API key authentication
pub const HDR_X_API_KEY: &str = "x-api-key";
/// Query parameter carrying the account identifier on every request
pub const QUERY_ACCOUNT: &str = "accountIdentifier";

/// Configuration for the Harness client
///
/// Debug output automatically redacts `api_key` via [`SecretString`].
#[derive(Clone, Debug)]
pub struct ClientConfig {
    api_base: String,
    api_key: Option<SecretString>,
    account_id: Option<String>,
}

fn env_trimmed(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Default for ClientConfig {
    fn default() -> Self {
        let api_key = env_trimmed("HARNESS_API_KEY").map(SecretString::from);
        let api_base =
            env_trimmed("HARNESS_BASE_URL").unwrap_or_else(|| HARNESS_DEFAULT_BASE.into());
        let account_id = env_trimmed("HARNESS_ACCOUNT_ID").or_else(|| {
            api_key
                .as_ref()
                .and_then(|k| account_id_from_api_key(k.expose_secret()))
        });

        Self {
            api_base,
            api_key,
            account_id,
        }
    }
}

impl ClientConfig {
    /// Creates a new configuration with default settings
    ///
    /// Attempts to read from environment variables:
    /// - `HARNESS_API_KEY` for API key authentication
    /// - `HARNESS_BASE_URL` for a custom base URL
    /// - `HARNESS_ACCOUNT_ID` for the account (otherwise derived from the key)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that ignores the environment.
    ///
    /// Points at [`HARNESS_DEFAULT_BASE`] with no key and no account; callers
    /// that already resolved their settings fill them in with the `with_*`
    /// methods.
    #[must_use]
    pub fn from_parts() -> Self {
        Self {
            api_base: HARNESS_DEFAULT_BASE.into(),
            api_key: None,
            account_id: None,
        }
    }

    /// Sets the API base URL
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Sets the API key
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    /// Sets the API key from an existing secret
    #[must_use]
    pub fn with_api_key_secret(mut self, key: SecretString) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the account identifier
    #[must_use]
    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    /// Returns the configured API base URL
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Returns the configured account identifier
    #[must_use]
    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }
}

/// Extract the account identifier from a Harness PAT/SAT key.
///
/// Keys look like `pat.<account>.<token id>.<secret>`.
#[must_use]
pub fn account_id_from_api_key(key: &str) -> Option<String> {
    let mut parts = key.trim().split('.');
    let kind = parts.next()?;
    if kind != "pat" && kind != "sat" {
        return None;
    }
    let account = parts.next().filter(|a| !a.is_empty())?;
    // need the token id and secret segments too
    if parts.count() < 2 {
        return None;
    }
    Some(account.to_string())
}

/// Configuration trait for the Harness client
///
/// Implement this trait to provide custom authentication and API configuration.
pub trait Config: Send + Sync {
    /// Returns HTTP headers to include in requests
    ///
    /// # Errors
    ///
    /// Returns an error if header values contain invalid characters.
    fn headers(&self) -> Result<HeaderMap, crate::error::HarnessError>;

    /// Constructs the full URL for an API endpoint
    fn url(&self, path: &str) -> String;

    /// Returns query parameters to include in requests
    fn query(&self) -> Vec<(&str, &str)>;

    /// Validates that authentication credentials are present.
    ///
    /// # Errors
    ///
    /// Returns an error if authentication is not properly configured.
    fn validate_auth(&self) -> Result<(), crate::error::HarnessError>;
}

impl Config for ClientConfig {
    fn headers(&self) -> Result<HeaderMap, crate::error::HarnessError> {
        use crate::error::HarnessError;

        let mut h = HeaderMap::new();

        if let Some(secret) = &self.api_key {
            let key = secret.expose_secret().trim();
            if !key.is_empty() {
                h.insert(
                    HDR_X_API_KEY,
                    HeaderValue::from_str(key)
                        .map_err(|_| HarnessError::Config("Invalid x-api-key value".into()))?,
                );
            }
        }

        Ok(h)
    }

    fn url(&self, path: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    fn query(&self) -> Vec<(&str, &str)> {
        self.account_id
            .as_deref()
            .map(|a| vec![(QUERY_ACCOUNT, a)])
            .unwrap_or_default()
    }

    fn validate_auth(&self) -> Result<(), crate::error::HarnessError> {
        match &self.api_key {
            Some(secret) if !secret.expose_secret().trim().is_empty() => Ok(()),
            _ => Err(crate::error::HarnessError::Config(
                "Missing Harness credentials: set HARNESS_API_KEY environment variable".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::EnvGuard;
    use serial_test::serial;

    #[test]
    #[serial(env)]
    fn config_reads_env_vars() {
        let _key = EnvGuard::set("HARNESS_API_KEY", "pat.acct1.tok.secret");
        let _base = EnvGuard::set("HARNESS_BASE_URL", "https://harness.internal");
        let _acct = EnvGuard::set("HARNESS_ACCOUNT_ID", "explicit");

        let cfg = ClientConfig::new();
        assert_eq!(cfg.api_base(), "https://harness.internal");
        assert_eq!(cfg.account_id(), Some("explicit"));

        let h = cfg.headers().unwrap();
        assert_eq!(
            h.get(HDR_X_API_KEY).unwrap().to_str().unwrap(),
            "pat.acct1.tok.secret"
        );
    }

    #[test]
    #[serial(env)]
    fn config_derives_account_from_key() {
        let _key = EnvGuard::set("HARNESS_API_KEY", "pat.acct1.tok.secret");
        let _acct = EnvGuard::remove("HARNESS_ACCOUNT_ID");
        let _base = EnvGuard::remove("HARNESS_BASE_URL");

        let cfg = ClientConfig::new();
        assert_eq!(cfg.account_id(), Some("acct1"));
        assert_eq!(cfg.api_base(), HARNESS_DEFAULT_BASE);
    }

    #[test]
    #[serial(env)]
    fn validate_auth_missing_key() {
        let _key = EnvGuard::remove("HARNESS_API_KEY");

        let cfg = ClientConfig::new();
        assert!(cfg.validate_auth().is_err());
    }

    #[test]
    #[serial(env)]
    fn from_parts_ignores_env() {
        let _key = EnvGuard::set("HARNESS_API_KEY", "pat.acct1.tok.secret");
        let _acct = EnvGuard::set("HARNESS_ACCOUNT_ID", "from-env");

        let cfg = ClientConfig::from_parts();
        assert_eq!(cfg.api_base(), HARNESS_DEFAULT_BASE);
        assert_eq!(cfg.account_id(), None);
        assert!(cfg.validate_auth().is_err());
    }

    #[test]
    fn account_id_parsing() {
        assert_eq!(
            account_id_from_api_key("pat.abc.def.ghi").as_deref(),
            Some("abc")
        );
        assert_eq!(
            account_id_from_api_key("sat.abc.def.ghi").as_deref(),
            Some("abc")
        );
        assert_eq!(account_id_from_api_key("pat.abc"), None);
        assert_eq!(account_id_from_api_key("pat..def.ghi"), None);
        assert_eq!(account_id_from_api_key("plain-key"), None);
    }

    #[test]
    fn url_joins_slashes() {
        let cfg = ClientConfig::new().with_api_base("https://h.io/gateway/");
        assert_eq!(
            cfg.url("/ng/api/connectors"),
            "https://h.io/gateway/ng/api/connectors"
        );
    }

    #[test]
    fn query_carries_account() {
        let cfg = ClientConfig::new().with_account_id("acct");
        assert_eq!(cfg.query(), vec![(QUERY_ACCOUNT, "acct")]);
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let cfg = ClientConfig::new().with_api_key("super-secret-key-12345");
        let debug_str = format!("{cfg:?}");

        assert!(!debug_str.contains("super-secret-key-12345"));
        assert!(debug_str.contains("[REDACTED]"), "{debug_str}");
    }

    #[test]
    fn validate_auth_rejects_empty_or_whitespace() {
        assert!(ClientConfig::new().with_api_key("").validate_auth().is_err());
        assert!(ClientConfig::new().with_api_key("   ").validate_auth().is_err());
        assert!(
            ClientConfig::new()
                .with_api_key("  valid-key  ")
                .validate_auth()
                .is_ok()
        );
    }
}
