//! Building blocks for Keap REST resource wrappers.
//!
//! Resource wrappers (contacts, orders, tags, ...) are thin shims: they build
//! a path, call the [`HttpClient`](crate::clients::HttpClient), and reshape the
//! JSON they get back. This module provides everything they share:
//!
//! - **[`QueryParams`]**: Allow-listed, canonical query strings
//! - **[`Paginator<T>`]**: One page of a collection with cursor traversal
//! - **[`Page<T>`]** and **[`PageValidation`]**: Validated page payloads
//! - **[`decode`] / [`decode_field`]**: Typed decoding that fails loudly
//!
//! # Example: A Resource Wrapper
//!
//! ```rust,ignore
//! use keap_api::clients::{ApiError, HttpClient};
//! use keap_api::rest::{decode, Paginator, QueryParams};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Deserialize)]
//! struct Tag {
//!     id: u64,
//!     name: String,
//! }
//!
//! #[derive(Serialize, Default)]
//! struct ListTagsOptions {
//!     limit: Option<u32>,
//!     offset: Option<u32>,
//!     category: Option<u64>,
//! }
//!
//! struct Tags<'a> {
//!     client: &'a HttpClient,
//! }
//!
//! impl<'a> Tags<'a> {
//!     async fn list(&self, options: &ListTagsOptions) -> Result<Paginator<'a, Tag>, ApiError> {
//!         let query = QueryParams::from_options(options, &["limit", "offset", "category"])?;
//!         let response = self.client.get(&query.append_to("v1/tags")).await?;
//!         Paginator::wrap(self.client, response, "tags")
//!     }
//!
//!     async fn find(&self, id: u64) -> Result<Tag, ApiError> {
//!         decode(self.client.get(&format!("v1/tags/{id}")).await?)
//!     }
//! }
//! ```

mod decode;
mod page;
mod paginator;
mod query;

pub use decode::{decode, decode_field};
pub use page::{Page, PageValidation};
pub use paginator::Paginator;
pub use query::QueryParams;
