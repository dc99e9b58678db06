//! # Keap API Rust Client
//!
//! The shared core of a typed client for the Keap (Infusionsoft) CRM REST
//! API: the request engine, the paginator and the query string builder that
//! every resource wrapper is built on.
//!
//! ## Overview
//!
//! This crate provides:
//! - Immutable configuration via [`KeapConfig`] and [`KeapConfigBuilder`]
//! - Validated newtypes for the API key and base URL
//! - An async request engine ([`HttpClient`]) with per-attempt timeout and
//!   bounded retry
//! - A cursor paginator ([`rest::Paginator`]) for list endpoints
//! - Allow-listed query strings ([`rest::QueryParams`])
//! - Typed decoding of responses ([`rest::decode`])
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use keap_api::{ApiKey, HttpClient, KeapConfig};
//!
//! let config = KeapConfig::builder()
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .timeout(Duration::from_secs(10))
//!     .retries(2)
//!     .build()
//!     .unwrap();
//!
//! let client = HttpClient::new(config).unwrap();
//! assert_eq!(client.config().max_attempts(), 3);
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use keap_api::{HttpClient, HttpMethod};
//! use keap_api::rest::{Paginator, QueryParams};
//!
//! // A single record
//! let contact = client.request(HttpMethod::Get, "v1/contacts/42", None).await?;
//!
//! // A paginated collection
//! let query = QueryParams::new().with("limit", 50);
//! let response = client.get(&query.append_to("v1/contacts")).await?;
//! let page: Paginator<'_, serde_json::Value> = Paginator::wrap(&client, response, "contacts")?;
//!
//! if let Some(next) = page.next().await? {
//!     println!("Next page has {} contacts", next.items().len());
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: A client cannot be built without an API key
//! - **Immutable configuration**: Reconfiguring returns a new client
//! - **Thread-safe**: All client types are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio async runtime

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{ApiKey, BaseUrl, KeapConfig, KeapConfigBuilder, RetryBackoff};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiError, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder,
    HttpResponseError,
};
