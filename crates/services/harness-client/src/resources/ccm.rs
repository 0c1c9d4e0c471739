use serde_json::Value;

use crate::{client::Client, config::Config, error::HarnessError};

/// API resource for Cloud Cost Management
pub struct Ccm<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Ccm<'c, C> {
    /// Creates a new Ccm resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Cost overview between two epoch-millisecond timestamps
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn overview(
        &self,
        start_time: i64,
        end_time: i64,
        group_by: &str,
    ) -> Result<Value, HarnessError> {
        let query = [
            ("startTime", start_time.to_string()),
            ("endTime", end_time.to_string()),
            ("groupBy", group_by.to_string()),
        ];
        self.client.get("/ccm/api/overview", &query).await
    }

    /// List cost perspectives
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn list_perspectives(
        &self,
        search_key: Option<&str>,
        page: u32,
        size: u32,
    ) -> Result<Value, HarnessError> {
        let mut query = vec![
            ("pageNo", page.to_string()),
            ("pageSize", size.to_string()),
        ];
        if let Some(key) = search_key {
            query.push(("searchKey", key.to_string()));
        }
        self.client
            .get("/ccm/api/perspective/getAllPerspectives", &query)
            .await
    }

    /// Get one perspective
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn get_perspective(&self, perspective_id: &str) -> Result<Value, HarnessError> {
        let query = [("perspectiveId", perspective_id.to_string())];
        self.client.get("/ccm/api/perspective", &query).await
    }
}

impl<C: Config> Client<C> {
    /// Returns the Ccm API resource
    #[must_use]
    pub const fn ccm(&self) -> Ccm<'_, C> {
        Ccm::new(self)
    }
}
