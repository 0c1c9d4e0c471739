use serde_json::{Value, json};

use crate::{client::Client, config::Config, envelope::Scope, error::HarnessError};

/// API resource for secrets metadata (values are never returned)
pub struct Secrets<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Secrets<'c, C> {
    /// Creates a new Secrets resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// List secrets in a scope
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn list(
        &self,
        scope: &Scope,
        search_term: Option<&str>,
        page: u32,
        size: u32,
    ) -> Result<Value, HarnessError> {
        let mut query = scope.query();
        query.push(("pageIndex", page.to_string()));
        query.push(("pageSize", size.to_string()));
        let body = json!({
            "filterType": "Secret",
            "searchTerm": search_term,
        });
        self.client
            .post("/ng/api/v2/secrets/list/secrets", &query, &body)
            .await
    }

    /// Get one secret's metadata
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn get(&self, scope: &Scope, secret_id: &str) -> Result<Value, HarnessError> {
        self.client
            .get(&format!("/ng/api/v2/secrets/{secret_id}"), &scope.query())
            .await
    }
}

impl<C: Config> Client<C> {
    /// Returns the Secrets API resource
    #[must_use]
    pub const fn secrets(&self) -> Secrets<'_, C> {
        Secrets::new(self)
    }
}
