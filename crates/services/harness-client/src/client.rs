use backon::{ExponentialBuilder, Retryable};
use reqwest::StatusCode;
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::{config::Config, error::HarnessError, retry};

/// Per-request query pairs, appended after the configured account parameter.
pub type Query<'a> = &'a [(&'a str, String)];

/// Harness API client
///
/// The client is generic over a [`Config`] implementation that provides authentication
/// and API configuration.
#[derive(Debug, Clone)]
pub struct Client<C: Config> {
    http: reqwest::Client,
    config: C,
    backoff: ExponentialBuilder,
}

impl Client<crate::config::ClientConfig> {
    /// Creates a new client with default configuration
    ///
    /// Uses environment variables for authentication, see
    /// [`crate::ClientConfig::new`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self, HarnessError> {
        Self::with_config(crate::config::ClientConfig::new())
    }
}

impl<C: Config> Client<C> {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the reqwest client cannot be built (for example
    /// when no TLS backend is available).
    pub fn with_config(config: C) -> Result<Self, HarnessError> {
        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(5))
            .timeout(std::time::Duration::from_secs(60))
            .build()?;
        Ok(Self {
            http,
            config,
            backoff: retry::default_backoff_builder(),
        })
    }

    /// Replaces the HTTP client with a custom one
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Replaces the backoff configuration for retry logic
    #[must_use]
    pub fn with_backoff(mut self, backoff: ExponentialBuilder) -> Self {
        self.backoff = backoff;
        self
    }

    /// Returns a reference to the client's configuration
    #[must_use]
    pub const fn config(&self) -> &C {
        &self.config
    }

    /// GET `path` and decode the JSON body. Retries transient failures.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a
    /// body that does not decode as `O`.
    pub async fn get<O>(&self, path: &str, query: Query<'_>) -> Result<O, HarnessError>
    where
        O: DeserializeOwned,
    {
        let mk = || async {
            let headers = self.config.headers()?;
            Ok(self
                .http
                .get(self.config.url(path))
                .headers(headers)
                .query(&self.config.query())
                .query(query)
                .build()?)
        };
        self.execute(mk).await
    }

    /// POST a JSON body to `path` and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a
    /// body that does not decode as `O`.
    pub async fn post<I, O>(&self, path: &str, query: Query<'_>, body: &I) -> Result<O, HarnessError>
    where
        I: Serialize + Send + Sync + ?Sized,
        O: DeserializeOwned,
    {
        let mk = || async {
            let headers = self.config.headers()?;
            Ok(self
                .http
                .post(self.config.url(path))
                .headers(headers)
                .query(&self.config.query())
                .query(query)
                .json(body)
                .build()?)
        };
        self.execute(mk).await
    }

    /// POST a JSON body to `path` exactly once.
    ///
    /// For writes that start work on the Harness side, where a lost response
    /// does not mean the request was not acted on.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a
    /// body that does not decode as `O`.
    pub async fn post_once<I, O>(&self, path: &str, query: Query<'_>, body: &I) -> Result<O, HarnessError>
    where
        I: Serialize + Send + Sync + ?Sized,
        O: DeserializeOwned,
    {
        self.config.validate_auth()?;
        let request = self
            .http
            .post(self.config.url(path))
            .headers(self.config.headers()?)
            .query(&self.config.query())
            .query(query)
            .json(body)
            .build()?;
        debug!(method = "POST", path = request.url().path(), "harness request (no retry)");
        let response = self.http.execute(request).await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(crate::error::deserialize_api_error(status, &bytes));
        }
        serde_json::from_slice(&bytes).map_err(|e| crate::error::map_deser(&e, &bytes))
    }

    /// GET `path` exactly once and accept only `200 OK`.
    ///
    /// Used where a caller must not act on anything but a definitive answer.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::UnexpectedStatus`] for any status other than 200.
    pub async fn get_strict<O>(&self, path: &str, query: Query<'_>) -> Result<O, HarnessError>
    where
        O: DeserializeOwned,
    {
        self.config.validate_auth()?;
        let request = self
            .http
            .get(self.config.url(path))
            .headers(self.config.headers()?)
            .query(query)
            .build()?;
        let response = self.http.execute(request).await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        if status != StatusCode::OK {
            debug!(
                status = status.as_u16(),
                body = %String::from_utf8_lossy(&bytes[..bytes.len().min(400)]),
                "rejecting non-200 response"
            );
            return Err(HarnessError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }
        serde_json::from_slice(&bytes).map_err(|e| crate::error::map_deser(&e, &bytes))
    }

    async fn execute<O, M, Fut>(&self, mk: M) -> Result<O, HarnessError>
    where
        O: DeserializeOwned,
        M: Fn() -> Fut + Send + Sync,
        Fut: core::future::Future<Output = Result<reqwest::Request, HarnessError>> + Send,
    {
        // Validate auth before any request
        self.config.validate_auth()?;

        let bytes = self.execute_raw(mk).await?;
        let resp: O =
            serde_json::from_slice(&bytes).map_err(|e| crate::error::map_deser(&e, &bytes))?;
        Ok(resp)
    }

    async fn execute_raw<M, Fut>(&self, mk: M) -> Result<bytes::Bytes, HarnessError>
    where
        M: Fn() -> Fut + Send + Sync,
        Fut: core::future::Future<Output = Result<reqwest::Request, HarnessError>> + Send,
    {
        let http_client = self.http.clone();

        (|| async {
            let request = mk().await?;
            debug!(method = %request.method(), path = request.url().path(), "harness request");
            let response = http_client
                .execute(request)
                .await
                .map_err(HarnessError::Reqwest)?;

            let status = response.status();
            let bytes = response.bytes().await.map_err(HarnessError::Reqwest)?;

            if status.is_success() {
                return Ok(bytes);
            }

            Err(crate::error::deserialize_api_error(status, &bytes))
        })
        .retry(self.backoff)
        .when(HarnessError::is_retryable)
        .await
    }
}
