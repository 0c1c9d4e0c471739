/// Audit trail
pub mod audit;
/// Cloud Cost Management
pub mod ccm;
/// Chaos Engineering
pub mod chaos;
/// Connectors
pub mod connectors;
/// Internal Developer Portal
pub mod idp;
/// Account licensing
pub mod licenses;
/// Pipelines and executions
pub mod pipelines;
/// Secrets metadata
pub mod secrets;
