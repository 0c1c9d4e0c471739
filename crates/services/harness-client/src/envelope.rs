//! The response envelope shared by Harness NG services, and request scope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Standard Harness REST envelope: `{status, data, metaData, correlationId}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope<T> {
    /// `SUCCESS`, `FAILURE` or `ERROR`
    #[serde(default)]
    pub status: Option<String>,
    /// Payload
    pub data: Option<T>,
    /// Free-form service metadata
    #[serde(default)]
    pub meta_data: Option<Value>,
    /// Request correlation id
    #[serde(default)]
    pub correlation_id: Option<String>,
}

impl<T> ResponseEnvelope<T> {
    /// Whether the envelope reports success (an absent status counts as success)
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status
            .as_deref()
            .is_none_or(|s| s.eq_ignore_ascii_case("SUCCESS"))
    }

    /// Take the payload, if any
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

/// Organization and project a request is scoped to.
///
/// The account is carried by the client configuration and added to every
/// request, so it is not part of the scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    /// `orgIdentifier`
    pub org_id: Option<String>,
    /// `projectIdentifier`
    pub project_id: Option<String>,
}

impl Scope {
    /// Build a scope from explicit values, falling back to defaults.
    #[must_use]
    pub fn resolve(
        org_id: Option<String>,
        project_id: Option<String>,
        defaults: &Self,
    ) -> Self {
        Self {
            org_id: org_id
                .filter(|s| !s.is_empty())
                .or_else(|| defaults.org_id.clone()),
            project_id: project_id
                .filter(|s| !s.is_empty())
                .or_else(|| defaults.project_id.clone()),
        }
    }

    /// Query pairs for the scope, omitting unset levels.
    #[must_use]
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut q = Vec::with_capacity(2);
        if let Some(org) = &self.org_id {
            q.push(("orgIdentifier", org.clone()));
        }
        if let Some(project) = &self.project_id {
            q.push(("projectIdentifier", project.clone()));
        }
        q
    }
}
