//! Toolset catalog and license gate.
//!
//! At startup the server asks the license service which modules the account
//! may use, splits the configured toolsets into allowed and denied, and
//! registers the allowed ones.
//!
//! ```ignore
//! let cfg = harness_config::load_merged(&std::env::current_dir()?)?.config;
//! let group = harness_tools_registry::init_toolsets(&cfg).await?;
//! let registry = group.registry();
//! ```
//!
//! If the license lookup fails the server still starts, serving only the
//! default toolset.

mod catalog;
mod error;
mod init;
mod license;
mod partition;

pub use catalog::{
    ALL_TOOLSETS, CORE_MODULE, DEFAULT_TOOLSET, RegisterFn, ToolsetCatalog, ToolsetEntry,
};
pub use error::{LicenseError, RegistryError};
pub use init::{init_toolsets, init_toolsets_with, register_allowed_toolsets};
pub use license::{LicenseInfo, ModuleLicenseMap, init_license_validation};
pub use partition::{REASON_UNKNOWN, ToolsetPartition, validate_toolsets};
