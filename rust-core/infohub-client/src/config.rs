// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Client configuration.
//!
//! Each [`crate::client::InfoHubClient`] owns its own [`ClientConfig`]; there
//! is no process-wide default that callers can mutate.

use std::time::Duration;

use tracing::warn;

/// Base URL used when none is configured. Note the trailing slash.
pub const DEFAULT_BASE_URL: &str = "http://localhost/dataapi/";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable overriding [`ClientConfig::base_url`].
pub const ENV_BASE_URL: &str = "INFOHUB_BASE_URL";

/// Environment variable overriding [`ClientConfig::timeout`], in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "INFOHUB_TIMEOUT_SECS";

/// Configuration for an InfoHub client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the Information Hub Data API. All request paths are
    /// resolved relative to it.
    pub base_url: String,
    /// Per-request timeout, enforced by the transport.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Configuration with the given base URL and the default timeout.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load configuration from `INFOHUB_BASE_URL` and `INFOHUB_TIMEOUT_SECS`.
    ///
    /// Unset or empty variables keep their defaults; an unparsable timeout is
    /// logged and ignored.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(ENV_BASE_URL).ok(),
            std::env::var(ENV_TIMEOUT_SECS).ok(),
        )
    }

    fn from_vars(base_url: Option<String>, timeout_secs: Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }

        match timeout_secs.as_deref().map(str::trim) {
            None | Some("") => {}
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) => config.timeout = Duration::from_secs(secs),
                Err(_) => {
                    warn!(
                        value = %raw,
                        "Invalid {} (expected whole seconds), using default",
                        ENV_TIMEOUT_SECS
                    );
                }
            },
        }

        config
    }
}
