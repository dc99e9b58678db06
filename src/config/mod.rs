//! Configuration types for the Keap API client.
//!
//! This module provides the configuration used to construct the request
//! engine ([`crate::clients::HttpClient`]).
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`KeapConfig`]: The immutable configuration holding credential, base URL,
//!   timeout and retry settings
//! - [`KeapConfigBuilder`]: A builder for constructing [`KeapConfig`] instances
//! - [`ApiKey`]: A validated API key newtype with masked debug output
//! - [`BaseUrl`]: A validated, slash-normalized base URL
//! - [`RetryBackoff`]: The delay strategy between retry attempts
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use keap_api::{KeapConfig, ApiKey};
//!
//! let config = KeapConfig::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .timeout(Duration::from_secs(10))
//!     .retries(3)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.retries(), 3);
//! ```

mod backoff;
mod newtypes;

pub use backoff::RetryBackoff;
pub use newtypes::{ApiKey, BaseUrl};

use std::time::Duration;

use crate::error::ConfigError;

/// Default per-attempt timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Default number of retries after the first failed attempt.
pub const DEFAULT_RETRIES: u32 = 1;

/// Configuration for the Keap API client.
///
/// The configuration is immutable once built. To change a setting, derive a
/// new configuration with [`KeapConfig::to_builder`] (or use
/// [`HttpClient::with_timeout`](crate::clients::HttpClient::with_timeout) and
/// [`HttpClient::with_retries`](crate::clients::HttpClient::with_retries)).
///
/// # Thread Safety
///
/// `KeapConfig` is `Clone`, `Send`, and `Sync`.
///
/// # Example
///
/// ```rust
/// use keap_api::{KeapConfig, ApiKey};
///
/// let config = KeapConfig::builder()
///     .api_key(ApiKey::new("key").unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(config.timeout().as_millis(), 5000);
/// assert_eq!(config.retries(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct KeapConfig {
    api_key: ApiKey,
    base_url: BaseUrl,
    timeout: Duration,
    retries: u32,
    backoff: RetryBackoff,
    user_agent_prefix: Option<String>,
}

impl KeapConfig {
    /// Creates a new builder for constructing a `KeapConfig`.
    #[must_use]
    pub fn builder() -> KeapConfigBuilder {
        KeapConfigBuilder::new()
    }

    /// Returns a builder pre-populated with this configuration's values.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keap_api::{KeapConfig, ApiKey};
    ///
    /// let config = KeapConfig::builder()
    ///     .api_key(ApiKey::new("key").unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// let patient = config.to_builder().retries(5).build().unwrap();
    /// assert_eq!(patient.retries(), 5);
    /// assert_eq!(config.retries(), 1);
    /// ```
    #[must_use]
    pub fn to_builder(&self) -> KeapConfigBuilder {
        KeapConfigBuilder {
            api_key: Some(self.api_key.clone()),
            base_url: Some(self.base_url.clone()),
            timeout: Some(self.timeout),
            retries: Some(self.retries),
            backoff: Some(self.backoff),
            user_agent_prefix: self.user_agent_prefix.clone(),
        }
    }

    /// Returns a copy of this configuration with a different timeout.
    #[must_use]
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            timeout,
            ..self.clone()
        }
    }

    /// Returns a copy of this configuration with a different retry count.
    #[must_use]
    pub fn with_retries(&self, retries: u32) -> Self {
        Self {
            retries,
            ..self.clone()
        }
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the base URL every request path is appended to.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the per-attempt timeout. `Duration::ZERO` disables it.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the number of retries after the first failed attempt.
    #[must_use]
    pub const fn retries(&self) -> u32 {
        self.retries
    }

    /// Returns the total number of attempts a request may make.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    /// Returns the delay strategy between attempts.
    #[must_use]
    pub const fn backoff(&self) -> RetryBackoff {
        self.backoff
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify KeapConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<KeapConfig>();
};

/// Builder for constructing [`KeapConfig`] instances.
///
/// The only required field is `api_key`.
///
/// # Defaults
///
/// - `base_url`: `https://api.infusionsoft.com/crm/rest/`
/// - `timeout`: 5000 ms
/// - `retries`: 1
/// - `backoff`: [`RetryBackoff::Immediate`]
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct KeapConfigBuilder {
    api_key: Option<ApiKey>,
    base_url: Option<BaseUrl>,
    timeout: Option<Duration>,
    retries: Option<u32>,
    backoff: Option<RetryBackoff>,
    user_agent_prefix: Option<String>,
}

impl KeapConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Overrides the base URL.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the per-attempt timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the number of retries after the first failed attempt.
    ///
    /// `0` means a single attempt.
    #[must_use]
    pub const fn retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }

    /// Sets the delay strategy between attempts.
    #[must_use]
    pub const fn backoff(mut self, backoff: RetryBackoff) -> Self {
        self.backoff = Some(backoff);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`KeapConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` is not set.
    pub fn build(self) -> Result<KeapConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        Ok(KeapConfig {
            api_key,
            base_url: self.base_url.unwrap_or_default(),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            retries: self.retries.unwrap_or(DEFAULT_RETRIES),
            backoff: self.backoff.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
