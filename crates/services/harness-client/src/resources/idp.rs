use serde_json::Value;

use crate::{client::Client, config::Config, envelope::Scope, error::HarnessError};

/// API resource for the Internal Developer Portal catalog
pub struct Idp<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Idp<'c, C> {
    /// Creates a new Idp resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// List catalog entities, optionally filtered by kind
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn list_entities(
        &self,
        scope: &Scope,
        kind: Option<&str>,
        page: u32,
        limit: u32,
    ) -> Result<Value, HarnessError> {
        let mut query = scope.query();
        query.push(("page", page.to_string()));
        query.push(("limit", limit.to_string()));
        if let Some(kind) = kind {
            query.push(("kind", kind.to_string()));
        }
        self.client.get("/idp/v1/entities", &query).await
    }

    /// Get one entity by kind, namespace and name
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn get_entity(
        &self,
        scope: &Scope,
        kind: &str,
        namespace: &str,
        name: &str,
    ) -> Result<Value, HarnessError> {
        self.client
            .get(
                &format!("/idp/v1/entities/{kind}/{namespace}/{name}"),
                &scope.query(),
            )
            .await
    }
}

impl<C: Config> Client<C> {
    /// Returns the Idp API resource
    #[must_use]
    pub const fn idp(&self) -> Idp<'_, C> {
        Idp::new(self)
    }
}
