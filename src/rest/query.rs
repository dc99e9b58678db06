//! Query string construction for REST paths.
//!
//! Resource wrappers accept an options struct and forward only the keys an
//! endpoint understands. [`QueryParams::from_options`] takes the allow-list
//! of recognized keys and produces a canonical, percent-encoded query string:
//!
//! - only allow-listed keys are kept, in allow-list order
//! - missing and `null` values are omitted entirely
//! - every value is stringified
//!
//! # Example
//!
//! ```rust
//! use keap_api::rest::QueryParams;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct ListContactsOptions {
//!     limit: Option<u32>,
//!     email: Option<String>,
//!     order: Option<String>,
//! }
//!
//! let options = ListContactsOptions {
//!     limit: Some(50),
//!     email: None,
//!     order: Some("date_created".to_string()),
//! };
//!
//! let query = QueryParams::from_options(&options, &["order", "limit", "email"]).unwrap();
//! assert_eq!(query.to_string(), "order=date_created&limit=50");
//! assert_eq!(query.append_to("v1/contacts"), "v1/contacts?order=date_created&limit=50");
//! ```

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::clients::ApiError;

/// An ordered list of query parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Creates an empty parameter list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds parameters from the allow-listed keys of `options`.
    ///
    /// Keys are emitted in the order of `allowed`; keys of `options` outside
    /// the allow-list are dropped even if set.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Query`] if `options` cannot be serialized or does
    /// not serialize to an object.
    pub fn from_options<O: Serialize + ?Sized>(
        options: &O,
        allowed: &[&str],
    ) -> Result<Self, ApiError> {
        let object = to_object(options)?;

        let pairs = allowed
            .iter()
            .filter_map(|key| {
                let value = stringify(object.get(*key)?)?;
                Some(((*key).to_string(), value))
            })
            .collect();

        Ok(Self { pairs })
    }

    /// Builds parameters from every set key of `options`, in key order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Query`] if `options` cannot be serialized or does
    /// not serialize to an object.
    pub fn from_all<O: Serialize + ?Sized>(options: &O) -> Result<Self, ApiError> {
        let object = to_object(options)?;

        let pairs = object
            .iter()
            .filter_map(|(key, value)| Some((key.clone(), stringify(value)?)))
            .collect();

        Ok(Self { pairs })
    }

    /// Appends a parameter.
    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) {
        self.pairs.push((key.into(), value.to_string()));
    }

    /// Appends a parameter, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.push(key, value);
        self
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates over the unencoded `(key, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the percent-encoded query string, without a leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Appends the query string to `path`.
    ///
    /// Returns `path` unchanged when there are no parameters.
    #[must_use]
    pub fn append_to(&self, path: &str) -> String {
        if self.is_empty() {
            return path.to_string();
        }
        let separator = if path.contains('?') { '&' } else { '?' };
        format!("{path}{separator}{}", self.to_query_string())
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

fn to_object<O: Serialize + ?Sized>(options: &O) -> Result<Map<String, Value>, ApiError> {
    match serde_json::to_value(options).map_err(ApiError::Query)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        _ => Err(ApiError::Query(serde::ser::Error::custom(
            "query options must serialize to an object",
        ))),
    }
}

/// Converts a JSON value to its query string form; `None` means "omit".
fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            let values: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    Value::Bool(b) => Some(b.to_string()),
                    _ => None,
                })
                .collect();
            (!values.is_empty()).then(|| values.join(","))
        }
        Value::Object(_) => Some(value.to_string()),
    }
}
