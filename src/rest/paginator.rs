//! Cursor-based traversal of paginated collections.
//!
//! A [`Paginator`] wraps one [`Page`] and borrows the [`HttpClient`] that
//! produced it. [`Paginator::next`] and [`Paginator::previous`] follow the
//! page's cursors and return brand-new paginators; the current one is never
//! mutated.
//!
//! # Example
//!
//! ```rust,ignore
//! use keap_api::rest::Paginator;
//!
//! let response = client.get("v1/contacts?limit=100").await?;
//! let mut page: Paginator<'_, Contact> = Paginator::wrap(&client, response, "contacts")?;
//!
//! loop {
//!     for contact in page.items() {
//!         println!("{}", contact.id);
//!     }
//!     match page.next().await? {
//!         Some(next) => page = next,
//!         None => break,
//!     }
//! }
//! ```

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::{ApiError, HttpClient};
use crate::config::BaseUrl;
use crate::rest::{Page, PageValidation};

/// One page of a homogeneous collection, able to fetch its neighbours.
///
/// The item key is captured when the paginator is created and reused for
/// every page reached through [`next`](Self::next) and
/// [`previous`](Self::previous), together with the validation policy.
#[derive(Clone, Debug)]
pub struct Paginator<'a, T> {
    client: &'a HttpClient,
    page: Page<T>,
    items_key: String,
    policy: PageValidation,
}

impl<'a, T> Paginator<'a, T> {
    /// Returns the items of the current page in server order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        self.page.items()
    }

    /// Consumes the paginator and returns the current page's items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.page.into_items()
    }

    /// Returns the total count across all pages, as reported by the server.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.page.count()
    }

    /// Returns the current page.
    #[must_use]
    pub const fn page(&self) -> &Page<T> {
        &self.page
    }

    /// Consumes the paginator and returns the current page.
    #[must_use]
    pub fn into_page(self) -> Page<T> {
        self.page
    }

    /// Returns the key under which items are found in each response.
    #[must_use]
    pub fn items_key(&self) -> &str {
        &self.items_key
    }

    /// Returns the validation policy applied to every fetched page.
    #[must_use]
    pub const fn policy(&self) -> PageValidation {
        self.policy
    }

    /// Returns the cursor of the next page, if any.
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        self.page.next()
    }

    /// Returns the cursor of the previous page, if any.
    #[must_use]
    pub fn previous_cursor(&self) -> Option<&str> {
        self.page.previous()
    }

    /// Returns `true` if there is a next page.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page.next().is_some()
    }

    /// Returns `true` if there is a previous page.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page.previous().is_some()
    }
}

impl<'a, T: DeserializeOwned> Paginator<'a, T> {
    /// Wraps a raw list response using [`PageValidation::Strict`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidResponse`] if `items_key` is absent or not
    /// an array, or if any of `next`, `previous` or `count` is absent or
    /// `null`. Returns [`ApiError::Decode`] if an item does not match `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let response = client.get("v1/tags").await?;
    /// let tags: Paginator<'_, Tag> = Paginator::wrap(&client, response, "tags")?;
    /// println!("{} of {}", tags.items().len(), tags.count());
    /// ```
    pub fn wrap(
        client: &'a HttpClient,
        response: Value,
        items_key: impl Into<String>,
    ) -> Result<Self, ApiError> {
        Self::wrap_with_policy(client, response, items_key, PageValidation::Strict)
    }

    /// Wraps a raw list response using the given validation policy.
    ///
    /// # Errors
    ///
    /// See [`Page::from_response`].
    pub fn wrap_with_policy(
        client: &'a HttpClient,
        response: Value,
        items_key: impl Into<String>,
        policy: PageValidation,
    ) -> Result<Self, ApiError> {
        let items_key = items_key.into();
        let page = Page::from_response(response, &items_key, policy)?;

        Ok(Self {
            client,
            page,
            items_key,
            policy,
        })
    }

    /// Fetches the next page.
    ///
    /// Returns `Ok(None)` without touching the network when there is no next
    /// cursor. Otherwise issues exactly one GET against the cursor, relative
    /// to the client's base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidResponse`] if the cursor points outside the
    /// client's base URL or the fetched page is malformed, and any error of
    /// [`HttpClient::get`].
    pub async fn next(&self) -> Result<Option<Self>, ApiError> {
        self.follow(self.page.next()).await
    }

    /// Fetches the previous page.
    ///
    /// # Errors
    ///
    /// See [`Paginator::next`].
    pub async fn previous(&self) -> Result<Option<Self>, ApiError> {
        self.follow(self.page.previous()).await
    }

    async fn follow(&self, cursor: Option<&str>) -> Result<Option<Self>, ApiError> {
        let Some(cursor) = cursor else {
            return Ok(None);
        };

        let path = relative_path(self.client.base_url(), cursor)?;
        tracing::debug!("Following page cursor to {}", path);

        let response = self.client.get(path).await?;
        Self::wrap_with_policy(self.client, response, self.items_key.clone(), self.policy)
            .map(Some)
    }
}

/// Strips the base URL from a cursor.
///
/// Relative cursors are used as-is. An absolute cursor on another host is
/// rejected so the API key is never sent elsewhere.
fn relative_path<'c>(base_url: &BaseUrl, cursor: &'c str) -> Result<&'c str, ApiError> {
    if let Some(path) = base_url.strip(cursor) {
        return Ok(path);
    }
    if cursor.starts_with("http://") || cursor.starts_with("https://") {
        return Err(ApiError::invalid_response(format!(
            "cursor '{cursor}' is outside the base URL {base_url}"
        )));
    }
    Ok(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiKey, KeapConfig};
    use serde_json::json;

    fn create_test_client() -> HttpClient {
        let config = KeapConfig::builder()
            .api_key(ApiKey::new("valid-api-key").unwrap())
            .build()
            .unwrap();
        HttpClient::new(config).unwrap()
    }

    fn response() -> Value {
        json!({
            "items": [1, 2, 3],
            "next": "https://api.infusionsoft.com/crm/rest/v1/items?offset=3",
            "previous": "https://api.infusionsoft.com/crm/rest/v1/items?offset=0",
            "count": 9
        })
    }

    #[test]
    fn test_wrap_exposes_items_count_and_cursors() {
        let client = create_test_client();
        let paginator: Paginator<'_, u32> = Paginator::wrap(&client, response(), "items").unwrap();

        assert_eq!(paginator.items(), &[1, 2, 3]);
        assert_eq!(paginator.count(), 9);
        assert_eq!(paginator.items_key(), "items");
        assert_eq!(paginator.policy(), PageValidation::Strict);
        assert!(paginator.has_next());
        assert!(paginator.has_previous());
        assert_eq!(
            paginator.next_cursor(),
            Some("https://api.infusionsoft.com/crm/rest/v1/items?offset=3")
        );
    }

    #[test]
    fn test_wrap_fails_when_item_key_missing() {
        let client = create_test_client();
        let result = Paginator::<u32>::wrap(
            &client,
            json!({
                "next": "http://example.com/next",
                "previous": "http://example.com/previous",
                "count": 3
            }),
            "items",
        );

        assert!(matches!(result, Err(ApiError::InvalidResponse { .. })));
    }

    #[test]
    fn test_wrap_is_strict_about_null_previous() {
        let client = create_test_client();
        let response = json!({
            "contacts": [{"id": 1}, {"id": 2}],
            "count": 2,
            "next": "https://api.infusionsoft.com/crm/rest/v1/contacts?offset=2",
            "previous": null
        });

        let strict = Paginator::<Value>::wrap(&client, response.clone(), "contacts");
        assert!(matches!(strict, Err(ApiError::InvalidResponse { .. })));

        let lenient = Paginator::<Value>::wrap_with_policy(
            &client,
            response,
            "contacts",
            PageValidation::Lenient,
        )
        .unwrap();
        assert!(!lenient.has_previous());
        assert!(lenient.has_next());
    }

    #[tokio::test]
    async fn test_next_without_cursor_returns_none() {
        let client = create_test_client();
        let paginator: Paginator<'_, u32> = Paginator::wrap_with_policy(
            &client,
            json!({"items": [1], "count": 1}),
            "items",
            PageValidation::Lenient,
        )
        .unwrap();

        assert!(paginator.next().await.unwrap().is_none());
        assert!(paginator.previous().await.unwrap().is_none());
    }

    #[test]
    fn test_relative_path_strips_base_url() {
        let base = BaseUrl::default();
        assert_eq!(
            relative_path(&base, "https://api.infusionsoft.com/crm/rest/v1/items?offset=3")
                .unwrap(),
            "v1/items?offset=3"
        );
        assert_eq!(
            relative_path(&base, "v1/items?offset=3").unwrap(),
            "v1/items?offset=3"
        );
    }

    #[test]
    fn test_relative_path_rejects_foreign_host() {
        let base = BaseUrl::default();
        let result = relative_path(&base, "https://evil.example.com/crm/rest/v1/items");
        assert!(matches!(result, Err(ApiError::InvalidResponse { .. })));
    }
}
