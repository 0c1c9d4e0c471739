//! Harness platform toolsets.
//!
//! Each module builds one [`Toolset`](harness_tools_core::Toolset) from a
//! shared [`Service`] and exposes a `register` entry point that the
//! toolset catalog calls with the loaded configuration.

pub mod audit;
pub mod ccm;
pub mod chaos;
pub mod connectors;
pub mod default;
pub mod idp;
pub mod pipelines;
pub mod secrets;
pub mod service;

pub use service::{HarnessService, PageArgs, ScopeArgs, Service, map_harness_error};
