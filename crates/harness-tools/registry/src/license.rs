//! Account license lookup.

use crate::catalog::CORE_MODULE;
use crate::error::LicenseError;
use harness_client::{AccountLicenses, Client, ModuleLicense, config::Config};
use std::collections::BTreeMap;
use tracing::debug;

/// License module to whether it is usable.
pub type ModuleLicenseMap = BTreeMap<String, bool>;

/// Licensing state of the account, fixed for the life of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseInfo {
    pub account_id: String,
    pub module_licenses: ModuleLicenseMap,
    pub is_valid: bool,
}

impl LicenseInfo {
    /// Interpret the license service response.
    ///
    /// Only the first license record of each module counts.
    pub fn from_account(account_id: impl Into<String>, licenses: &AccountLicenses) -> Self {
        let mut module_licenses: ModuleLicenseMap = licenses
            .all_module_licenses
            .iter()
            .map(|(module, records)| {
                let active = records.first().is_some_and(ModuleLicense::is_active);
                (module.clone(), active)
            })
            .collect();
        module_licenses.insert(CORE_MODULE.to_string(), true);
        Self {
            account_id: account_id.into(),
            module_licenses,
            is_valid: true,
        }
    }

    /// State after a failed lookup.
    pub fn invalid(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            module_licenses: ModuleLicenseMap::from([(CORE_MODULE.to_string(), true)]),
            is_valid: false,
        }
    }

    /// Every listed module licensed, for deployments without license enforcement.
    pub fn unrestricted<'a>(
        account_id: impl Into<String>,
        modules: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut module_licenses: ModuleLicenseMap =
            modules.into_iter().map(|m| (m.to_string(), true)).collect();
        module_licenses.insert(CORE_MODULE.to_string(), true);
        Self {
            account_id: account_id.into(),
            module_licenses,
            is_valid: true,
        }
    }

    pub fn is_module_licensed(&self, module: &str) -> bool {
        self.module_licenses.get(module).copied().unwrap_or(false)
    }
}

/// Fetch and interpret the account's module licenses.
///
/// One request, no retry. Anything but a 200 is an error.
///
/// # Errors
///
/// [`LicenseError::MissingAccount`] for an empty account id,
/// [`LicenseError::UnexpectedStatus`] for a non-200 answer, and
/// [`LicenseError::Request`] for transport or decode failures.
pub async fn init_license_validation<C: Config>(
    client: &Client<C>,
    account_id: &str,
) -> Result<LicenseInfo, LicenseError> {
    if account_id.trim().is_empty() {
        return Err(LicenseError::MissingAccount);
    }
    let licenses = client.licenses().account(account_id).await?;
    let info = LicenseInfo::from_account(account_id, &licenses);
    debug!(modules = ?info.module_licenses, "account licenses");
    Ok(info)
}
