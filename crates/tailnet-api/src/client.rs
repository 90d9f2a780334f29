//! Tailscale API client and its request helpers.
//!
//! Resource methods live in the per-family modules (`devices`, `users`,
//! `policy`, `keys`, `logging`, `tailnet`); each one builds a single
//! [`ApiRequest`] and hands it to the configured [`Transport`].

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tailnet_core::path::segment;
use tailnet_core::{ApiRequest, ApiResponse, ClientConfig, HttpTransport, Result, Transport};
use tracing::debug;

/// Builder for [`TailscaleClient`].
#[derive(Debug, Clone)]
pub struct TailscaleClientBuilder {
    config: ClientConfig,
}

impl TailscaleClientBuilder {
    /// Start a builder for the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            config: ClientConfig::new(api_key),
        }
    }

    /// Start from an existing configuration.
    #[must_use]
    pub fn from_config(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Target a named tailnet instead of the key's default.
    #[must_use]
    pub fn tailnet(mut self, tailnet: impl Into<String>) -> Self {
        self.config = self.config.with_tailnet(tailnet);
        self
    }

    /// Override the API root.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config = self.config.with_base_url(base_url);
        self
    }

    /// Set a request timeout in seconds.
    #[must_use]
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.config = self.config.with_timeout(seconds);
        self
    }

    /// Set a custom `User-Agent` header.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config = self.config.with_user_agent(user_agent);
        self
    }

    /// Build the client over an [`HttpTransport`].
    ///
    /// # Errors
    ///
    /// Returns [`tailnet_core::Error::ConfigError`] if the configuration is
    /// invalid or the HTTP client cannot be created.
    pub fn build(self) -> Result<TailscaleClient> {
        let transport = HttpTransport::new(&self.config)?;
        debug!(
            tailnet = %self.config.tailnet,
            base_url = %transport.base_url(),
            "Tailscale client ready"
        );
        Ok(TailscaleClient::with_transport(
            Arc::new(transport),
            self.config.tailnet,
        ))
    }
}

/// Asynchronous client for the Tailscale API v2.
///
/// Cloning is cheap and clones share the underlying connection pool, so one
/// client may serve any number of concurrent tasks.
#[derive(Clone)]
pub struct TailscaleClient {
    transport: Arc<dyn Transport>,
    tailnet: String,
}

impl fmt::Debug for TailscaleClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TailscaleClient")
            .field("tailnet", &self.tailnet)
            .finish_non_exhaustive()
    }
}

impl TailscaleClient {
    /// Client for the key's default tailnet on the public API.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is blank or the HTTP client cannot be
    /// created.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        TailscaleClientBuilder::new(api_key).build()
    }

    /// Client built from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        TailscaleClientBuilder::from_config(config).build()
    }

    /// Client over a custom transport.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>, tailnet: impl Into<String>) -> Self {
        Self {
            transport,
            tailnet: tailnet.into(),
        }
    }

    /// The tailnet this client targets.
    #[must_use]
    pub fn tailnet(&self) -> &str {
        &self.tailnet
    }

    pub(crate) fn tailnet_path(&self, suffix: &str) -> Result<String> {
        Ok(format!("/tailnet/{}/{suffix}", segment(&self.tailnet)?))
    }

    pub(crate) async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.transport.execute(request).await
    }

    pub(crate) async fn get_json<T>(
        &self,
        path: &str,
        params: Vec<(&'static str, String)>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.execute(ApiRequest::get(path).with_query(params))
            .await?
            .decode()
    }

    pub(crate) async fn get_value(&self, path: &str) -> Result<Value> {
        Ok(self.execute(ApiRequest::get(path)).await?.into_value())
    }

    pub(crate) async fn get_list<T>(
        &self,
        path: &str,
        params: Vec<(&'static str, String)>,
        field: &str,
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let items: Vec<T> = self
            .execute(ApiRequest::get(path).with_query(params))
            .await?
            .into_list(field)?;
        debug!(path, field, count = items.len(), "listed");
        Ok(items)
    }

    pub(crate) async fn send_json<B, R>(&self, method: Method, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = ApiRequest::new(method, path).with_json(body)?;
        self.execute(request).await?.decode()
    }

    pub(crate) async fn send_value<B>(&self, method: Method, path: &str, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let request = ApiRequest::new(method, path).with_json(body)?;
        Ok(self.execute(request).await?.into_value())
    }

    pub(crate) async fn send_empty<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let mut request = ApiRequest::new(method, path);
        if let Some(body) = body {
            request = request.with_json(body)?;
        }
        self.execute(request).await.map(|_| ())
    }

    /// `POST` with no body, discarding the response.
    pub(crate) async fn post_empty(&self, path: &str) -> Result<()> {
        self.send_empty::<Value>(Method::POST, path, None).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.send_empty::<Value>(Method::DELETE, path, None).await
    }
}
