//! Client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Base URL of the BEA data API.
pub const DEFAULT_BASE_URL: &str = "https://apps.bea.gov/api/data";

/// Environment variable holding the BEA user ID.
pub const API_KEY_ENV: &str = "BEA_API_TOKEN";

/// Configuration for [`BeaClient`](crate::BeaClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeaConfig {
    /// Endpoint every query is sent to
    pub base_url: String,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Skip TLS certificate verification
    pub accept_invalid_certs: bool,
    /// `User-Agent` header value
    pub user_agent: String,
}

impl Default for BeaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            accept_invalid_certs: false,
            user_agent: concat!("bea-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl BeaConfig {
    /// Use a different endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout in seconds.
    #[must_use]
    pub const fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Disable (or re-enable) TLS certificate verification.
    ///
    /// Turning verification off exposes the credential to interception.
    #[must_use]
    pub const fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Set the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
