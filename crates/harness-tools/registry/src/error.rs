use harness_client::HarnessError;
use thiserror::Error;

/// Why the account licenses could not be read.
///
/// Every variant is recoverable: startup falls back to the default toolset.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// The license service answered with something other than 200.
    #[error("license service returned unexpected status code {status}")]
    UnexpectedStatus { status: u16 },

    /// No account identifier is configured or derivable from the api key.
    #[error("no account id configured; set HARNESS_ACCOUNT_ID or use a PAT/SAT api key")]
    MissingAccount,

    /// Transport, auth or decode failure.
    #[error("license request failed: {0}")]
    Request(#[source] HarnessError),
}

impl From<HarnessError> for LicenseError {
    fn from(e: HarnessError) -> Self {
        match e {
            HarnessError::UnexpectedStatus { status } => Self::UnexpectedStatus { status },
            other => Self::Request(other),
        }
    }
}

/// Fatal startup errors from toolset registration.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The HTTP client for the license service could not be built.
    #[error("failed to build license client: {0}")]
    LicenseClient(#[source] HarnessError),

    /// An allowed toolset has no catalog entry.
    #[error("toolset '{0}' is not in the catalog")]
    UnknownToolset(String),

    /// An allowed toolset's registration function failed.
    #[error("failed to register toolset '{toolset}': {message}")]
    Registration { toolset: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_status_keeps_code() {
        let err = LicenseError::from(HarnessError::UnexpectedStatus { status: 503 });
        assert!(matches!(err, LicenseError::UnexpectedStatus { status: 503 }));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn other_errors_are_request_failures() {
        let err = LicenseError::from(HarnessError::Config("no key".into()));
        assert!(matches!(err, LicenseError::Request(_)));
    }
}
