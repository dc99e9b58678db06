//! HTTP client types for Keap API communication.
//!
//! This module provides the request engine every resource wrapper depends
//! on for I/O. It handles authentication headers, per-attempt timeouts,
//! bounded retries and failure normalization.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async request engine
//! - [`HttpRequest`]: A prebuilt request to be sent to the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, PATCH, DELETE)
//! - [`ApiError`]: The single error channel of the client core
//! - [`HttpError`]: The failure of one attempt
//!
//! # Example
//!
//! ```rust,ignore
//! use keap_api::{ApiKey, KeapConfig};
//! use keap_api::clients::{HttpClient, HttpMethod};
//!
//! let config = KeapConfig::builder()
//!     .api_key(ApiKey::new("my-api-key")?)
//!     .build()?;
//! let client = HttpClient::new(config)?;
//!
//! let contact = client.request(HttpMethod::Get, "v1/contacts/42", None).await?;
//! ```
//!
//! # Retry Behavior
//!
//! Every failed attempt is retried while attempts remain:
//!
//! - **Non-2xx status**: retried
//! - **Timeout**: the in-flight call is aborted and retried with a fresh timeout
//! - **Transport error** (DNS, connection refused, reset): retried
//!
//! A request makes at most `retries + 1` attempts (default `retries` is 1).
//! Retries happen immediately unless an exponential
//! [`RetryBackoff`](crate::RetryBackoff) is configured.

mod errors;
mod http_client;
mod http_request;

pub use errors::{ApiError, HttpError, HttpResponseError};
pub use http_client::{HttpClient, API_KEY_HEADER, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
