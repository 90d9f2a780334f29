//! HTTP transport for the Tailscale API.
//!
//! [`HttpTransport`] performs exactly one authenticated request per
//! [`Transport::execute`] call over a pooled, reused connection and folds
//! every failure into [`Error::Api`]. Successful responses are returned as
//! [`ApiResponse`] without any typed decoding; that is left to callers.

use crate::config::ClientConfig;
use crate::error::{ApiError, Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, Method};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// A single API request, relative to the configured API root.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Path relative to the API root, e.g. `/device/{id}`
    pub path: String,
    /// Query parameters
    pub query: Vec<(&'static str, String)>,
    /// JSON body
    pub body: Option<Value>,
    /// Extra request headers
    pub headers: Vec<(&'static str, String)>,
}

impl ApiRequest {
    /// Create a request with no query, body or extra headers.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
        }
    }

    /// Shorthand for a `GET` request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Attach query parameters. Pairs with empty values are dropped.
    #[must_use]
    pub fn with_query(mut self, query: Vec<(&'static str, String)>) -> Self {
        self.query = query.into_iter().filter(|(_, v)| !v.is_empty()).collect();
        self
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if the body cannot be serialized.
    pub fn with_json<B>(mut self, body: &B) -> Result<Self>
    where
        B: Serialize + ?Sized,
    {
        let value = serde_json::to_value(body)
            .map_err(|err| Error::InvalidRequest(format!("Failed to encode body: {err}")))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Attach an extra header.
    #[must_use]
    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }
}

/// Decoded body of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// The response had no body
    NoContent,
    /// The response body parsed as JSON
    Json(Value),
}

impl ApiResponse {
    /// The JSON body, or `Value::Null` for [`ApiResponse::NoContent`].
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::NoContent => Value::Null,
            Self::Json(value) => value,
        }
    }

    /// Decode the body into a modeled type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the body is missing a required field or
    /// has the wrong shape.
    pub fn decode<T>(self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        decode_value(self.into_value())
    }

    /// Extract the list stored under `field`.
    ///
    /// A missing field, a `null` field and an empty body all yield an empty
    /// list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the body is not a JSON object or the list
    /// elements do not decode as `T`.
    pub fn into_list<T>(self, field: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        match self {
            Self::NoContent | Self::Json(Value::Null) => Ok(Vec::new()),
            Self::Json(Value::Object(mut map)) => match map.remove(field) {
                None | Some(Value::Null) => Ok(Vec::new()),
                Some(items) => decode_value(items),
            },
            Self::Json(other) => Err(Error::Decode {
                target: std::any::type_name::<Vec<T>>(),
                message: format!("expected an object with `{field}`, got {other}"),
            }),
        }
    }
}

/// Decode a JSON value into a modeled type.
///
/// Useful for turning passthrough responses into the typed models.
///
/// # Errors
///
/// Returns [`Error::Decode`] naming the target type on failure.
pub fn decode_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    serde_json::from_value(value).map_err(|err| Error::decode(std::any::type_name::<T>(), &err))
}

/// Performs API requests.
///
/// Implemented by [`HttpTransport`]; alternative implementations can be
/// plugged into clients for testing.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute one request and return its decoded body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] for non-success statuses, transport failures and
    /// unparseable bodies.
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// reqwest-backed [`Transport`] with basic authentication.
#[derive(Clone)]
pub struct HttpTransport {
    http: Client,
    base_url: Url,
    api_key: SecretString,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Build a transport from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the configuration is invalid or the
    /// HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.check()?;
        let base_url = config.parse_base_url()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = ClientBuilder::new()
            .default_headers(headers)
            .user_agent(config.user_agent())
            .pool_idle_timeout(config.pool_idle_timeout())
            .pool_max_idle_per_host(config.pool_max_idle_per_host);

        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|err| Error::ConfigError(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// The normalised API root.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| Error::InvalidEndpoint(format!("Invalid API path `{path}`: {err}")))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.build_url(&request.path)?;
        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .basic_auth(self.api_key.expose_secret(), Some(""));

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!(
            method = %request.method,
            path = %request.path,
            query = request.query.len(),
            "Tailscale API request"
        );

        let response = builder.send().await.map_err(|err| {
            warn!(method = %request.method, path = %request.path, error = %err, "Tailscale API request failed");
            Error::from(err)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                method = %request.method,
                path = %request.path,
                status = status.as_u16(),
                "Tailscale API returned an error status"
            );
            // The status is reported even if the error body cannot be read.
            let payload = response
                .bytes()
                .await
                .ok()
                .and_then(|bytes| serde_json::from_slice::<Value>(&bytes).ok());
            return Err(Error::Api(ApiError::status(
                status.as_u16(),
                format!("API request failed: {status} for {}", request.path),
                payload,
            )));
        }

        let bytes = response.bytes().await.map_err(|err| {
            Error::Api(ApiError::transport(format!(
                "Failed to read response body: {err}"
            )))
        })?;

        if bytes.is_empty() {
            return Ok(ApiResponse::NoContent);
        }

        serde_json::from_slice(&bytes)
            .map(ApiResponse::Json)
            .map_err(|err| {
                Error::Api(ApiError::transport(format!(
                    "Failed to parse response for `{}`: {err}",
                    request.path
                )))
            })
    }
}
