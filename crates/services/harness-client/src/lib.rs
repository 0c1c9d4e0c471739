#![deny(missing_docs)]

//! Async Harness platform client with typed envelopes, retries, and wiremock tests.

/// HTTP client implementation
pub mod client;
/// Configuration types for the client
pub mod config;
/// Response envelope and request scope
pub mod envelope;
/// Error types
pub mod error;
/// API resource implementations
pub mod resources;
/// Retry logic utilities
pub mod retry;
/// HTTP status classification
pub mod status;
/// Test support utilities (for use in tests)
#[doc(hidden)]
pub mod test_support;

pub use crate::client::{Client, Query};
pub use crate::config::{ClientConfig, account_id_from_api_key};
pub use crate::envelope::{ResponseEnvelope, Scope};
pub use crate::error::{ApiErrorObject, HarnessError};
pub use crate::resources::licenses::{AccountLicenses, ModuleLicense};
pub use crate::status::HttpKind;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{Client, ClientConfig, HarnessError, ResponseEnvelope, Scope};
}
