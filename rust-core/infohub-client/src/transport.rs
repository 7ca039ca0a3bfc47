// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! HTTP transport layer.
//!
//! The client talks to the service through the [`Transport`] trait: given a
//! [`Request`] it performs one round trip and hands back the decoded body.
//! [`HttpTransport`] is the `reqwest` implementation; tests and embedders can
//! substitute their own.
//!
//! A transport reports only failures to *complete* the call. HTTP error
//! statuses are not failures here: the service describes its problems
//! in-band, so the body is returned for normalization either way.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Method;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{InfoHubError, Result};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// A request descriptor: method, path relative to the base URL (query string
/// included), and an optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// Relative path, e.g. `/entities/e1?attrs=all`.
    pub path: String,
    /// JSON body, if any.
    pub body: Option<Value>,
}

impl Request {
    /// `GET path`.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
        }
    }

    /// `POST path` with a JSON body.
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: Some(body),
        }
    }

    /// `DELETE path`.
    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            path: path.into(),
            body: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Transport trait
// ---------------------------------------------------------------------------

/// Performs one round trip to the Information Hub Data API.
///
/// Implementations must be safe to share across tokio tasks.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and return its body.
    ///
    /// Returns `Ok(None)` for an empty body and `Ok(Some(Value::String(_)))`
    /// for a body that is not JSON. `Err` means the call itself failed
    /// (connection, timeout, TLS, ...).
    async fn send(&self, request: Request) -> Result<Option<Value>>;
}

// ---------------------------------------------------------------------------
// HttpTransport
// ---------------------------------------------------------------------------

/// [`Transport`] backed by a connection-pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// Base URL, always ending in `/`.
    base_url: Url,
    /// Underlying `reqwest` HTTP client.
    http: reqwest::Client,
    /// Per-request timeout the client was built with.
    timeout: Duration,
}

impl HttpTransport {
    /// Build a transport from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`InfoHubError::Validation`] if the base URL cannot be parsed
    /// or cannot serve as a base, and [`InfoHubError::Network`] if the TLS
    /// backend fails to initialize.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = normalize_base_url(&config.base_url)?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(InfoHubError::Network)?;

        Ok(Self {
            base_url,
            http,
            timeout: config.timeout,
        })
    }

    /// The base URL all requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The configured per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve a request path against the base URL. A leading `/` on `path`
    /// is relative to the base, not to the host root.
    pub fn resolve(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| InfoHubError::Validation(format!("Invalid request path {path:?}: {e}")))
    }
}

fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url =
        Url::parse(raw).map_err(|e| InfoHubError::Validation(format!("Invalid base URL: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(InfoHubError::Validation(format!(
            "Invalid base URL: {raw} cannot be a base"
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Option<Value>> {
        let url = self.resolve(&request.path)?;
        debug!(method = %request.method, %url, "Sending request");

        let mut builder = self
            .http
            .request(request.method, url)
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(InfoHubError::Network)?;
        let status = response.status();
        let text = response.text().await.map_err(InfoHubError::Network)?;
        debug!(status = status.as_u16(), bytes = text.len(), "Received response");

        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(
            serde_json::from_str(&text).unwrap_or(Value::String(text)),
        ))
    }
}
