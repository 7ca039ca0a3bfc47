// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Schema retrieval.
//!
//! `GET /schemas` returns a list of schemas with forward links only. The
//! client indexes them by type name, derives the reverse-link index, and
//! keeps the result in a single cache slot.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::client::InfoHubClient;
use crate::error::Result;
use crate::reverse_links::build_reverse_links;
use crate::transport::Request;
use crate::types::{Schema, SchemaMap};

impl InfoHubClient {
    /// Get all schemas, keyed by type name, with reverse links populated.
    ///
    /// With `cache` set, a previously fetched map is returned as-is (the same
    /// `Arc`) without a round trip. Without it, the schemas are always
    /// refetched. Every successful fetch replaces the cached map; a fetch that
    /// fails (reported problems or an undecodable schema list) returns an
    /// empty map and leaves the cache alone. Use
    /// [`InfoHubClient::try_get_schemas`] to see why a fetch failed.
    pub async fn get_schemas(&self, cache: bool) -> Arc<SchemaMap> {
        match self.try_get_schemas(cache).await {
            Ok(schemas) => schemas,
            Err(err) => {
                warn!(error = %err, "Schema fetch failed");
                Arc::new(SchemaMap::new())
            }
        }
    }

    /// Like [`InfoHubClient::get_schemas`], but a failed fetch is returned as
    /// an error instead of an empty map.
    ///
    /// # Errors
    ///
    /// [`crate::error::InfoHubError::Problems`] if the response carried
    /// problems (including transport failures), and
    /// [`crate::error::InfoHubError::Serialization`] if the `schemas` field
    /// could not be decoded. The cache is untouched in both cases.
    #[instrument(skip(self))]
    pub async fn try_get_schemas(&self, cache: bool) -> Result<Arc<SchemaMap>> {
        if cache {
            if let Some(schemas) = self.cached_schemas() {
                debug!(count = schemas.len(), "Schema cache hit");
                return Ok(schemas);
            }
            debug!("Schema cache miss");
        }

        let mut response = self.dispatch(Request::get("/schemas")).await;
        response.errors.raise()?;

        let mut schemas = index_schemas(decode_schemas(response.extra.remove("schemas"))?);
        build_reverse_links(&mut schemas);
        debug!(count = schemas.len(), "Schemas fetched");

        let schemas = Arc::new(schemas);
        self.store_schemas(Some(Arc::clone(&schemas)));
        Ok(schemas)
    }

    /// Drop the cached schema map so the next [`InfoHubClient::get_schemas`]
    /// call refetches.
    pub fn clear_schema_cache(&self) {
        self.store_schemas(None);
    }
}

/// Key schemas by type name, in list order. A repeated type replaces the
/// earlier schema but keeps its position.
pub fn index_schemas(schemas: Vec<Schema>) -> SchemaMap {
    let mut map = SchemaMap::with_capacity(schemas.len());
    for schema in schemas {
        map.insert(schema.type_name.clone(), schema);
    }
    map
}

/// An absent or `null` list is empty; anything else must decode in full.
fn decode_schemas(raw: Option<Value>) -> Result<Vec<Schema>> {
    match raw {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(raw) => Ok(serde_json::from_value(raw)?),
    }
}
