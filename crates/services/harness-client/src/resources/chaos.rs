use serde_json::{Value, json};

use crate::{client::Client, config::Config, envelope::Scope, error::HarnessError};

const BASE: &str = "/chaos/manager/api/rest/v2";

/// API resource for Chaos Engineering
pub struct Chaos<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Chaos<'c, C> {
    /// Creates a new Chaos resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// List experiments in a project
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn list_experiments(&self, scope: &Scope, page: u32, limit: u32) -> Result<Value, HarnessError> {
        let mut query = scope.query();
        query.push(("page", page.to_string()));
        query.push(("limit", limit.to_string()));
        self.client.get(&format!("{BASE}/experiment"), &query).await
    }

    /// Get one experiment
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn get_experiment(&self, scope: &Scope, experiment_id: &str) -> Result<Value, HarnessError> {
        self.client
            .get(&format!("{BASE}/experiments/{experiment_id}"), &scope.query())
            .await
    }

    /// Start a run of an experiment
    ///
    /// Sent once; a failed start is reported rather than retried.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn run_experiment(&self, scope: &Scope, experiment_id: &str) -> Result<Value, HarnessError> {
        let query = scope.query();
        let body = json!({});
        self.client
            .post_once(&format!("{BASE}/experiments/{experiment_id}/run"), &query, &body)
            .await
    }
}

impl<C: Config> Client<C> {
    /// Returns the Chaos API resource
    #[must_use]
    pub const fn chaos(&self) -> Chaos<'_, C> {
        Chaos::new(self)
    }
}
