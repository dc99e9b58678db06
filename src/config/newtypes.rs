//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated Keap API key.
///
/// This newtype ensures the key is non-empty and masks its value in debug
/// output to prevent accidental exposure in logs.
///
/// # Security
///
/// The `Debug` implementation displays only `ApiKey(*****)`.
///
/// # Example
///
/// ```rust
/// use keap_api::ApiKey;
///
/// let key = ApiKey::new("my-api-key").unwrap();
/// assert_eq!(key.as_ref(), "my-api-key");
/// assert_eq!(format!("{:?}", key), "ApiKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty or whitespace.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(*****)")
    }
}

/// A validated base URL for the REST API.
///
/// The URL must use the `http` or `https` scheme and is normalized to end
/// with a single `/` so that relative paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use keap_api::BaseUrl;
///
/// let url = BaseUrl::new("https://api.infusionsoft.com/crm/rest").unwrap();
/// assert_eq!(url.as_ref(), "https://api.infusionsoft.com/crm/rest/");
/// assert_eq!(url.join("v1/contacts"), "https://api.infusionsoft.com/crm/rest/v1/contacts");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// The production Keap REST endpoint.
    pub const DEFAULT: &'static str = "https://api.infusionsoft.com/crm/rest/";

    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL has no http(s)
    /// scheme or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim();

        let rest = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"));
        let has_host = rest.is_some_and(|rest| {
            rest.split('/')
                .next()
                .is_some_and(|host| !host.is_empty() && !host.contains(char::is_whitespace))
        });
        if !has_host {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        Ok(Self(format!("{}/", trimmed.trim_end_matches('/'))))
    }

    /// Appends a relative path to this base URL.
    ///
    /// Leading slashes on `path` are dropped so the result never contains `//`
    /// after the base.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}{}", self.0, path.trim_start_matches('/'))
    }

    /// Strips this base URL from a fully-qualified URL.
    ///
    /// Returns `None` when `url` does not start with this base.
    #[must_use]
    pub fn strip<'u>(&self, url: &'u str) -> Option<&'u str> {
        url.strip_prefix(self.0.as_str())
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
