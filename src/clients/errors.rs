//! Error types for the request engine.
//!
//! This module contains the error types raised while talking to the Keap
//! REST API and while interpreting its responses.
//!
//! # Error Handling
//!
//! Errors are layered:
//!
//! - [`HttpResponseError`]: A non-2xx HTTP response
//! - [`HttpError`]: The failure of a single attempt (status, timeout, network)
//! - [`ApiError`]: The single error channel returned by the client core. A
//!   failed request is reported as [`ApiError::Request`], which carries the
//!   HTTP method and path alongside the last attempt's [`HttpError`].
//!
//! Only [`HttpError`] failures are retried. Configuration errors, malformed
//! pagination payloads and decode failures are surfaced immediately.
//!
//! # Example
//!
//! ```rust,ignore
//! use keap_api::clients::{ApiError, HttpError};
//!
//! match client.get("v1/contacts/42").await {
//!     Ok(contact) => println!("Contact: {contact}"),
//!     Err(ApiError::Request { source: HttpError::Response(e), .. }) => {
//!         println!("API returned {}", e.code);
//!     }
//!     Err(ApiError::Request { source: HttpError::Timeout { .. }, attempts, .. }) => {
//!         println!("Timed out {attempts} times");
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use std::time::Duration;

use thiserror::Error;

use crate::clients::http_request::HttpMethod;
use crate::error::ConfigError;

/// Error returned when an HTTP request receives a non-successful response.
///
/// # Example
///
/// ```rust
/// use keap_api::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     body: r#"{"message":"Not found"}"#.to_string(),
/// };
///
/// assert_eq!(error.to_string(), "HTTP error! status: 404");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("HTTP error! status: {code}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The raw response body, possibly empty.
    pub body: String,
}

/// The failure of a single request attempt.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// The attempt did not complete within the per-attempt timeout.
    #[error("request timed out after {}ms", .timeout.as_millis())]
    Timeout {
        /// The timeout that elapsed.
        timeout: Duration,
    },

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A successful response carried a body that is not JSON.
    #[error("Response body is not valid JSON: {0}")]
    InvalidBody(#[source] serde_json::Error),
}

impl HttpError {
    /// Returns `true` if another attempt may succeed.
    ///
    /// Non-2xx statuses, timeouts and transport failures are retryable. A
    /// malformed success body is not.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        !matches!(self, Self::InvalidBody(_))
    }

    /// Returns the HTTP status code, if the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            _ => None,
        }
    }
}

/// Unified error type for the client core.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The client is misconfigured.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// A request failed after exhausting its attempts.
    #[error("Error making {method} request to {path}: {source}")]
    Request {
        /// The HTTP method of the failed request.
        method: HttpMethod,
        /// The path relative to the base URL.
        path: String,
        /// The number of attempts made.
        attempts: u32,
        /// The failure of the last attempt.
        #[source]
        source: HttpError,
    },

    /// A response did not have the shape the caller requires.
    #[error("Invalid API response: {reason}")]
    InvalidResponse {
        /// What was wrong with the response.
        reason: String,
    },

    /// A JSON value could not be decoded into the requested type.
    #[error("Failed to decode {target}: {source}")]
    Decode {
        /// The type that was being decoded.
        target: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// Query options could not be serialized.
    #[error("Failed to serialize query options: {0}")]
    Query(#[source] serde_json::Error),
}

impl ApiError {
    /// Creates an [`ApiError::InvalidResponse`] with the given reason.
    #[must_use]
    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            reason: reason.into(),
        }
    }

    /// Returns `true` if the error came from a retryable HTTP failure.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Request { source, .. } => source.is_retryable(),
            _ => false,
        }
    }

    /// Returns the HTTP status code of the failed request, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Request { source, .. } => source.status(),
            _ => None,
        }
    }
}
