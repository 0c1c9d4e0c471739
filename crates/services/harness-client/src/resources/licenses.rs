use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{client::Client, config::Config, envelope::ResponseEnvelope, error::HarnessError};

/// Path of the account license summary endpoint
pub const ACCOUNT_LICENSES_PATH: &str = "/ng/api/licenses/account";

/// One license record for a module
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleLicense {
    /// `ACTIVE`, `EXPIRED`, ...
    #[serde(default)]
    pub status: Option<String>,
    /// Module type, e.g. `CD` or `CCM`
    #[serde(default)]
    pub module_type: Option<String>,
    /// `FREE`, `TEAM`, `ENTERPRISE`
    #[serde(default)]
    pub edition: Option<String>,
    /// `TRIAL` or `PAID`
    #[serde(default)]
    pub license_type: Option<String>,
    /// Expiry as epoch milliseconds
    #[serde(default)]
    pub expiry_time: Option<i64>,
}

impl ModuleLicense {
    /// Whether the license status is `ACTIVE`
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some("ACTIVE")
    }
}

/// Licenses of every module on an account
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountLicenses {
    /// Module type to its license records
    #[serde(default)]
    pub all_module_licenses: BTreeMap<String, Vec<ModuleLicense>>,
}

/// API resource for account licensing
pub struct Licenses<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Licenses<'c, C> {
    /// Creates a new Licenses resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Fetch the license summary for `account_id`.
    ///
    /// Sent once, without retries; any status other than 200 is an error.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::UnexpectedStatus`] for a non-200 response, or a
    /// transport or decode error.
    pub async fn account(&self, account_id: &str) -> Result<AccountLicenses, HarnessError> {
        let query = [
            ("routingId", account_id.to_string()),
            ("accountIdentifier", account_id.to_string()),
        ];
        let env: ResponseEnvelope<AccountLicenses> = self
            .client
            .get_strict(ACCOUNT_LICENSES_PATH, &query)
            .await?;
        Ok(env.into_data().unwrap_or_default())
    }
}

impl<C: Config> Client<C> {
    /// Returns the Licenses API resource
    #[must_use]
    pub const fn licenses(&self) -> Licenses<'_, C> {
        Licenses::new(self)
    }
}
