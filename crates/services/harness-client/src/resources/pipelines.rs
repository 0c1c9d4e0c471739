use serde_json::{Value, json};

use crate::{client::Client, config::Config, envelope::Scope, error::HarnessError};

/// Paging and filter options for pipeline listings
#[derive(Debug, Clone, Default)]
pub struct PipelineListOptions {
    /// Zero-based page index
    pub page: u32,
    /// Page size
    pub size: u32,
    /// Free-text search over names and identifiers
    pub search_term: Option<String>,
}

/// API resource for the pipeline service
pub struct Pipelines<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Pipelines<'c, C> {
    /// Creates a new Pipelines resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// List pipelines in a project
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn list(&self, scope: &Scope, opts: &PipelineListOptions) -> Result<Value, HarnessError> {
        let mut query = scope.query();
        query.push(("page", opts.page.to_string()));
        query.push(("size", opts.size.to_string()));
        if let Some(term) = &opts.search_term {
            query.push(("searchTerm", term.clone()));
        }
        let body = json!({"filterType": "PipelineSetup"});
        self.client
            .post("/pipeline/api/pipelines/list", &query, &body)
            .await
    }

    /// Get one pipeline, including its YAML
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn get(&self, scope: &Scope, pipeline_id: &str) -> Result<Value, HarnessError> {
        self.client
            .get(
                &format!("/pipeline/api/pipelines/{pipeline_id}"),
                &scope.query(),
            )
            .await
    }

    /// List executions in a project, optionally for one pipeline
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn list_executions(
        &self,
        scope: &Scope,
        pipeline_id: Option<&str>,
        page: u32,
        size: u32,
    ) -> Result<Value, HarnessError> {
        let mut query = scope.query();
        query.push(("page", page.to_string()));
        query.push(("size", size.to_string()));
        if let Some(id) = pipeline_id {
            query.push(("pipelineIdentifier", id.to_string()));
        }
        let body = json!({"filterType": "PipelineExecution"});
        self.client
            .post("/pipeline/api/pipelines/execution/summary", &query, &body)
            .await
    }

    /// Get one execution
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn get_execution(&self, scope: &Scope, execution_id: &str) -> Result<Value, HarnessError> {
        self.client
            .get(
                &format!("/pipeline/api/pipelines/execution/v2/{execution_id}"),
                &scope.query(),
            )
            .await
    }
}

impl<C: Config> Client<C> {
    /// Returns the Pipelines API resource
    #[must_use]
    pub const fn pipelines(&self) -> Pipelines<'_, C> {
        Pipelines::new(self)
    }
}
