use serde_json::Value;

use crate::{client::Client, config::Config, envelope::Scope, error::HarnessError};

/// API resource for connectors
pub struct Connectors<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Connectors<'c, C> {
    /// Creates a new Connectors resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// List the connector types available on the account
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn catalogue(&self) -> Result<Value, HarnessError> {
        self.client.get("/ng/api/connectors/catalogue", &[]).await
    }

    /// Get one connector
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn get(&self, scope: &Scope, connector_id: &str) -> Result<Value, HarnessError> {
        self.client
            .get(&format!("/ng/api/connectors/{connector_id}"), &scope.query())
            .await
    }
}

impl<C: Config> Client<C> {
    /// Returns the Connectors API resource
    #[must_use]
    pub const fn connectors(&self) -> Connectors<'_, C> {
        Connectors::new(self)
    }
}
