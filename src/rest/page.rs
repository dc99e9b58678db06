//! One page of a paginated collection.
//!
//! Keap list endpoints answer with an object holding the page items under an
//! endpoint-specific key plus the pagination metadata:
//!
//! ```json
//! {
//!   "contacts": [{"id": 1}, {"id": 2}],
//!   "count": 250,
//!   "next": "https://api.infusionsoft.com/crm/rest/v1/contacts?limit=2&offset=2",
//!   "previous": "https://api.infusionsoft.com/crm/rest/v1/contacts?limit=2&offset=0"
//! }
//! ```
//!
//! [`Page::from_response`] validates that shape according to a
//! [`PageValidation`] policy and decodes the items.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::clients::ApiError;
use crate::rest::decode;

/// How strictly pagination metadata is validated.
///
/// Under both policies the item array must be present and be an array, and
/// any metadata that is present must have the right type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PageValidation {
    /// `next`, `previous` and `count` must all be present and non-null, and
    /// the cursors must be non-empty.
    ///
    /// A first page reporting `"previous": null` or `"previous": ""` is
    /// rejected.
    #[default]
    Strict,
    /// `next` and `previous` may be absent, `null` or empty, meaning there
    /// is no such page; an absent or `null` `count` defaults to the item count.
    Lenient,
}

/// A single page of items plus pagination metadata.
///
/// # Example
///
/// ```rust
/// use keap_api::rest::{Page, PageValidation};
/// use serde_json::json;
///
/// let response = json!({
///     "tags": [{"id": 1}, {"id": 2}],
///     "count": 10,
///     "next": "https://api.infusionsoft.com/crm/rest/v1/tags?offset=2",
///     "previous": null
/// });
///
/// let page: Page<serde_json::Value> =
///     Page::from_response(response, "tags", PageValidation::Lenient).unwrap();
/// assert_eq!(page.len(), 2);
/// assert_eq!(page.count(), 10);
/// assert!(page.previous().is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    count: u64,
    next: Option<String>,
    previous: Option<String>,
}

impl<T> Page<T> {
    /// Creates a page from its parts.
    #[must_use]
    pub const fn new(
        items: Vec<T>,
        count: u64,
        next: Option<String>,
        previous: Option<String>,
    ) -> Self {
        Self {
            items,
            count,
            next,
            previous,
        }
    }

    /// Returns the items of this page in server order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the page and returns its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns the total number of items across all pages, as reported by
    /// the server.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Returns the cursor of the next page.
    #[must_use]
    pub fn next(&self) -> Option<&str> {
        self.next.as_deref()
    }

    /// Returns the cursor of the previous page.
    #[must_use]
    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if this page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: DeserializeOwned> Page<T> {
    /// Validates a raw list response and decodes its items.
    ///
    /// Under [`PageValidation::Lenient`], empty-string cursors are treated
    /// as "no page".
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidResponse`] if the response is not an
    /// object, if `items_key` is absent or not an array, or if the metadata
    /// violates `policy`. Returns [`ApiError::Decode`] if an item does not
    /// match `T`.
    pub fn from_response(
        response: Value,
        items_key: &str,
        policy: PageValidation,
    ) -> Result<Self, ApiError> {
        let Value::Object(mut object) = response else {
            return Err(ApiError::invalid_response("expected a JSON object"));
        };

        let next = cursor(&object, "next", policy)?;
        let previous = cursor(&object, "previous", policy)?;
        let count = count(&object, policy)?;

        let items = match object.remove(items_key) {
            Some(items @ Value::Array(_)) => decode::<Vec<T>>(items)?,
            Some(_) => {
                return Err(ApiError::invalid_response(format!(
                    "'{items_key}' is not an array"
                )))
            }
            None => return Err(ApiError::invalid_response(format!("missing '{items_key}'"))),
        };

        let count = match count {
            Some(count) => count,
            None => u64::try_from(items.len()).unwrap_or(u64::MAX),
        };

        Ok(Self {
            items,
            count,
            next,
            previous,
        })
    }
}

fn cursor(
    object: &Map<String, Value>,
    key: &str,
    policy: PageValidation,
) -> Result<Option<String>, ApiError> {
    match (object.get(key), policy) {
        (Some(Value::String(url)), PageValidation::Lenient) if url.is_empty() => Ok(None),
        (Some(Value::String(url)), PageValidation::Strict) if url.is_empty() => {
            Err(ApiError::invalid_response(format!("'{key}' is empty")))
        }
        (Some(Value::String(url)), _) => Ok(Some(url.clone())),
        (None | Some(Value::Null), PageValidation::Lenient) => Ok(None),
        (None, PageValidation::Strict) => {
            Err(ApiError::invalid_response(format!("missing '{key}'")))
        }
        (Some(Value::Null), PageValidation::Strict) => {
            Err(ApiError::invalid_response(format!("'{key}' is null")))
        }
        (Some(_), _) => Err(ApiError::invalid_response(format!(
            "'{key}' is not a string"
        ))),
    }
}

fn count(object: &Map<String, Value>, policy: PageValidation) -> Result<Option<u64>, ApiError> {
    match (object.get("count"), policy) {
        (Some(Value::Number(n)), _) => n.as_u64().map(Some).ok_or_else(|| {
            ApiError::invalid_response("'count' is not a non-negative integer")
        }),
        (None | Some(Value::Null), PageValidation::Lenient) => Ok(None),
        (None, PageValidation::Strict) => Err(ApiError::invalid_response("missing 'count'")),
        (Some(Value::Null), PageValidation::Strict) => {
            Err(ApiError::invalid_response("'count' is null"))
        }
        (Some(_), _) => Err(ApiError::invalid_response(
            "'count' is not a non-negative integer",
        )),
    }
}
