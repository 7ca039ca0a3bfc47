// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Entity CRUD operations.
//!
//! Entities are opaque JSON records. Selection, attribute and cursor
//! parameters use the formats defined by the Information Hub Data API and
//! are passed through as query parameters (see [`crate::query`]).

use serde::Serialize;

use crate::client::InfoHubClient;
use crate::query::{assemble_query, Params};
use crate::response::Response;
use crate::transport::Request;

impl InfoHubClient {
    /// Get the entity with the given id.
    ///
    /// `attrs` selects which attributes the service returns.
    pub async fn get_entity(&self, id: &str, attrs: Option<&Params>) -> Response {
        let path = format!("/entities/{id}{}", assemble_query([attrs]));
        self.dispatch(Request::get(path)).await
    }

    /// Get the entities matching the selection parameters.
    ///
    /// Parameter sets are merged left to right, so `cursor` keys override
    /// `attrs` keys, which override `sel` keys.
    pub async fn get_entities(
        &self,
        sel: Option<&Params>,
        attrs: Option<&Params>,
        cursor: Option<&Params>,
    ) -> Response {
        let path = format!("/entities{}", assemble_query([sel, attrs, cursor]));
        self.dispatch(Request::get(path)).await
    }

    /// Create an entity.
    pub async fn create_entity<E: Serialize + ?Sized>(&self, entity: &E) -> Response {
        self.post_json("/entities", entity).await
    }

    /// Update the entity with the given id.
    pub async fn update_entity<E: Serialize + ?Sized>(&self, id: &str, entity: &E) -> Response {
        self.post_json(&format!("/entities/{id}"), entity).await
    }

    /// Delete the entity with the given id.
    pub async fn delete_entity(&self, id: &str) -> Response {
        self.dispatch(Request::delete(format!("/entities/{id}"))).await
    }

    /// Delete every entity matching the selection parameters.
    pub async fn delete_entities(&self, sel: Option<&Params>) -> Response {
        let path = format!("/entities{}", assemble_query([sel]));
        self.dispatch(Request::delete(path)).await
    }
}
