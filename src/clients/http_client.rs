//! HTTP client for Keap API communication.
//!
//! This module provides the [`HttpClient`] type, the request engine every
//! resource wrapper goes through. It performs one authenticated request with
//! a per-attempt timeout and a bounded number of retries.

use std::collections::HashMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::errors::{ApiError, HttpError, HttpResponseError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::config::{BaseUrl, KeapConfig};
use crate::rest::decode;

/// Header carrying the Keap API key.
pub const API_KEY_HEADER: &str = "X-Keap-API-Key";

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the Keap REST API.
///
/// The client handles:
/// - URL construction from the configured base URL
/// - Default headers including User-Agent, content type and API key
/// - A per-attempt timeout raced against the network call
/// - Bounded retry of transport failures, timeouts and non-2xx responses
///
/// # Configuration
///
/// The configuration is fixed at construction. [`HttpClient::with_timeout`]
/// and [`HttpClient::with_retries`] return a reconfigured client that shares
/// the same connection pool; in-flight requests on the original are not
/// affected.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
/// Concurrent requests may interleave on the network; each request's own
/// attempts run strictly in sequence.
///
/// # Example
///
/// ```rust,ignore
/// use keap_api::{ApiKey, KeapConfig};
/// use keap_api::clients::HttpClient;
///
/// let config = KeapConfig::builder()
///     .api_key(ApiKey::new("my-api-key")?)
///     .retries(2)
///     .build()?;
///
/// let client = HttpClient::new(config)?;
/// let contact = client.get("v1/contacts/42").await?;
/// ```
#[derive(Clone, Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Credential, base URL, timeout and retry settings.
    config: KeapConfig,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Client`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: KeapConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .map_err(ApiError::Client)?;

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Keap API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());
        default_headers.insert(
            API_KEY_HEADER.to_string(),
            config.api_key().as_ref().to_string(),
        );

        Ok(Self {
            client,
            config,
            default_headers,
        })
    }

    /// Returns the configuration of this client.
    #[must_use]
    pub const fn config(&self) -> &KeapConfig {
        &self.config
    }

    /// Returns the base URL request paths are appended to.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        self.config.base_url()
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns a client that applies `timeout` to every subsequent attempt.
    ///
    /// `Duration::ZERO` disables the per-attempt timer and leaves timing to
    /// the HTTP layer.
    #[must_use]
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        if timeout == self.config.timeout() {
            tracing::debug!(
                "Http client has a redundant timeout override to {}ms",
                timeout.as_millis()
            );
        }
        Self {
            config: self.config.with_timeout(timeout),
            ..self.clone()
        }
    }

    /// Returns a client that retries failed attempts up to `retries` times.
    ///
    /// `0` means every request is attempted exactly once.
    #[must_use]
    pub fn with_retries(&self, retries: u32) -> Self {
        if retries == self.config.retries() {
            tracing::debug!("Http client has a redundant retry override to {}", retries);
        }
        Self {
            config: self.config.with_retries(retries),
            ..self.clone()
        }
    }

    /// Sends a request and returns the parsed JSON body.
    ///
    /// `path` is appended to the base URL verbatim; any query string must
    /// already be percent-encoded (see [`QueryParams`](crate::rest::QueryParams)).
    /// `body` is sent as JSON for every method except GET. An empty success
    /// body yields [`Value::Null`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Request`] once all attempts have failed, wrapping
    /// the last attempt's [`HttpError`] with the method and path.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use keap_api::clients::HttpMethod;
    ///
    /// let tag = client
    ///     .request(HttpMethod::Post, "v1/tags", Some(&json!({"name": "VIP"})))
    ///     .await?;
    /// ```
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        self.execute(method, path, body, None).await
    }

    /// Sends a prebuilt [`HttpRequest`].
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn send(&self, request: HttpRequest) -> Result<Value, ApiError> {
        self.execute(
            request.http_method,
            &request.path,
            request.body.as_ref(),
            request.retries,
        )
        .await
    }

    /// Sends a request and decodes the response body into `T`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`HttpClient::request`], plus
    /// [`ApiError::Decode`] when the body does not match `T`.
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T, ApiError> {
        decode(self.request(method, path, body).await?)
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.request(HttpMethod::Get, path, None).await
    }

    /// Sends a GET request and decodes the response body into `T`.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request_as`].
    pub async fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request_as(HttpMethod::Get, path, None).await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.request(HttpMethod::Post, path, Some(body)).await
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn put(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.request(HttpMethod::Put, path, Some(body)).await
    }

    /// Sends a PATCH request with an optional JSON body.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn patch(&self, path: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        self.request(HttpMethod::Patch, path, body).await
    }

    /// Sends a DELETE request with an optional JSON body.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn delete(&self, path: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        self.request(HttpMethod::Delete, path, body).await
    }

    async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
        retries: Option<u32>,
    ) -> Result<Value, ApiError> {
        let body = match body {
            Some(_) if !method.allows_body() => {
                tracing::debug!("Dropping request body of {} request to {}", method, path);
                None
            }
            body => body,
        };

        let url = self.config.base_url().join(path);
        let max_attempts = retries
            .unwrap_or_else(|| self.config.retries())
            .saturating_add(1);

        let mut attempts: u32 = 0;
        loop {
            attempts += 1;
            tracing::debug!(%method, path, attempt = attempts, "Sending request to Keap API");

            let error = match self.attempt(method, &url, body).await {
                Ok(text) => {
                    return parse_body(&text).map_err(|source| ApiError::Request {
                        method,
                        path: path.to_string(),
                        attempts,
                        source,
                    });
                }
                Err(error) => error,
            };

            if attempts >= max_attempts {
                return Err(ApiError::Request {
                    method,
                    path: path.to_string(),
                    attempts,
                    source: error,
                });
            }

            tracing::warn!(
                "Attempt {} of {} for {} request to {} failed, retrying: {}",
                attempts,
                max_attempts,
                method,
                path,
                error
            );

            let delay = self.config.backoff().delay(attempts);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }

    /// Performs one attempt: send, check the status, read the body.
    ///
    /// The per-attempt timeout covers the whole exchange; when it fires the
    /// in-flight future is dropped, aborting the request.
    async fn attempt(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&Value>,
    ) -> Result<String, HttpError> {
        let mut req_builder = self.client.request(method.into(), url);
        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        if let Some(body) = body {
            req_builder = req_builder.body(body.to_string());
        }

        let exchange = async {
            let res = req_builder.send().await?;
            let code = res.status().as_u16();
            let text = res.text().await?;

            if !(200..=299).contains(&code) {
                return Err(HttpError::Response(HttpResponseError { code, body: text }));
            }
            Ok::<_, HttpError>(text)
        };

        let timeout = self.config.timeout();
        if timeout.is_zero() {
            return exchange.await;
        }
        tokio::time::timeout(timeout, exchange)
            .await
            .map_err(|_| HttpError::Timeout { timeout })?
    }
}

/// Parses a success body; an empty body is `null`.
fn parse_body(text: &str) -> Result<Value, HttpError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(HttpError::InvalidBody)
}
