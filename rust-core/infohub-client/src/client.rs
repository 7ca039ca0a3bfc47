// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! InfoHub client and request dispatch.
//!
//! [`InfoHubClient`] is the primary entry point for all operations. It owns a
//! [`Transport`] and the single-slot schema cache. Domain-specific methods
//! (entity CRUD, links, schemas) are defined as `impl InfoHubClient` blocks in
//! their respective modules.

use std::fmt;
use std::sync::{Arc, RwLock};

use serde::Serialize;
use tracing::warn;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::response::Response;
use crate::transport::{HttpTransport, Request, Transport};
use crate::types::SchemaMap;

/// The Information Hub client.
///
/// Cheap to share behind an `Arc`; every method takes `&self`.
///
/// # Examples
///
/// ```rust,no_run
/// use infohub_client::client::InfoHubClient;
/// use infohub_client::config::ClientConfig;
///
/// # #[tokio::main]
/// # async fn main() -> infohub_client::error::Result<()> {
/// let client = InfoHubClient::new(ClientConfig::with_base_url("http://hub.local/dataapi/"))?;
/// let response = client.delete_entity("e-17").await;
/// if response.any_problems() {
///     eprintln!("{}", response.errors.to_error().unwrap());
/// }
/// # Ok(())
/// # }
/// ```
pub struct InfoHubClient {
    /// Round-trip implementation.
    transport: Arc<dyn Transport>,
    /// Last fetched schema map. Concurrent misses may each fetch; the last
    /// writer wins.
    schema_cache: RwLock<Option<Arc<SchemaMap>>>,
}

impl fmt::Debug for InfoHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfoHubClient")
            .field("schemas_cached", &self.cached_schemas().is_some())
            .finish_non_exhaustive()
    }
}

impl InfoHubClient {
    // -- Constructors -------------------------------------------------------

    /// Create a client that talks HTTP to `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::InfoHubError::Validation`] if the base URL
    /// cannot be parsed.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Create a client over an arbitrary transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            schema_cache: RwLock::new(None),
        }
    }

    // -- Dispatch -----------------------------------------------------------

    /// Send `request` and normalize whatever comes back.
    pub(crate) async fn dispatch(&self, request: Request) -> Response {
        let method = request.method.clone();
        let path = request.path.clone();
        let outcome = self.transport.send(request).await;
        if let Err(err) = &outcome {
            warn!(%method, %path, error = %err, "Request failed");
        }
        Response::from_outcome(outcome)
    }

    /// `POST path` with `body` serialized to JSON. A body that cannot be
    /// serialized never reaches the transport.
    pub(crate) async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Response {
        match serde_json::to_value(body) {
            Ok(value) => self.dispatch(Request::post(path, value)).await,
            Err(err) => {
                warn!(%path, error = %err, "Request body could not be serialized");
                Response::application_config_error(err.to_string())
            }
        }
    }

    // -- Schema cache slot --------------------------------------------------

    pub(crate) fn cached_schemas(&self) -> Option<Arc<SchemaMap>> {
        match self.schema_cache.read() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub(crate) fn store_schemas(&self, schemas: Option<Arc<SchemaMap>>) {
        match self.schema_cache.write() {
            Ok(mut slot) => *slot = schemas,
            Err(poisoned) => *poisoned.into_inner() = schemas,
        }
    }
}
