// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Link creation.

use crate::client::InfoHubClient;
use crate::response::Response;
use crate::types::LinkRequest;

impl InfoHubClient {
    /// Link entity `source` to entity `target` under relation type `relation`.
    pub async fn create_link(&self, relation: &str, source: &str, target: &str) -> Response {
        let body = LinkRequest {
            relation: relation.to_owned(),
            source: source.to_owned(),
            target: target.to_owned(),
        };
        self.post_json("/links", &body).await
    }
}
