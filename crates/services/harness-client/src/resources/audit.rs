use serde_json::{Value, json};

use crate::{client::Client, config::Config, envelope::Scope, error::HarnessError};

/// Filter for audit trail queries
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    /// Only events by this user (email or identifier)
    pub user_id: Option<String>,
    /// Start of the window, epoch milliseconds
    pub start_time: Option<i64>,
    /// End of the window, epoch milliseconds
    pub end_time: Option<i64>,
}

/// API resource for the audit trail
pub struct Audit<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Audit<'c, C> {
    /// Creates a new Audit resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// List audit events
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn list(
        &self,
        scope: &Scope,
        filter: &AuditFilter,
        page: u32,
        size: u32,
    ) -> Result<Value, HarnessError> {
        let query = [("pageIndex", page.to_string()), ("pageSize", size.to_string())];
        let mut body = json!({
            "filterType": "Audit",
            "startTime": filter.start_time,
            "endTime": filter.end_time,
        });
        if let Some(user) = &filter.user_id {
            body["principals"] = json!([{"type": "USER", "identifier": user}]);
        }
        if scope.org_id.is_some() || scope.project_id.is_some() {
            body["scopes"] = json!([{
                "orgIdentifier": scope.org_id,
                "projectIdentifier": scope.project_id,
            }]);
        }
        self.client.post("/audit/api/audits/list", &query, &body).await
    }
}

impl<C: Config> Client<C> {
    /// Returns the Audit API resource
    #[must_use]
    pub const fn audit(&self) -> Audit<'_, C> {
        Audit::new(self)
    }
}
