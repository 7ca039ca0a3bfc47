// SPDX-License-Identifier: PMPL-1.0-or-later
//! Client integration tests.
//!
//! Drives `InfoHubClient` end to end over an in-memory transport that records
//! every request and replays canned outcomes.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use infohub_client::client::InfoHubClient;
use infohub_client::error::{InfoHubError, Result};
use infohub_client::query::Params;
use infohub_client::transport::{Request, Transport};
use infohub_client::types::TargetType;
use reqwest::Method;
use serde_json::{json, Value};

/// Records requests; answers each with the next queued outcome, or an empty
/// object once the queue is drained.
#[derive(Default)]
struct RecordingTransport {
    requests: Mutex<Vec<Request>>,
    outcomes: Mutex<VecDeque<Result<Option<Value>>>>,
}

impl RecordingTransport {
    fn replying(outcomes: Vec<Result<Option<Value>>>) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            outcomes: Mutex::new(outcomes.into()),
        })
    }

    fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: Request) -> Result<Option<Value>> {
        self.requests.lock().unwrap().push(request);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Some(json!({}))))
    }
}

fn client_over(transport: &Arc<RecordingTransport>) -> InfoHubClient {
    InfoHubClient::with_transport(transport.clone())
}

fn params(value: Value) -> Params {
    value.as_object().cloned().expect("object params")
}

fn schema_body() -> Value {
    json!({
        "schemas": [
            {"type": "cc:person", "links": [{"type": "memberOf", "targetType": "cc:org", "label": "Member of"}]},
            {"type": "cc:project", "links": [{"type": "memberOf", "targetType": ["cc:org", "cc:ghost"]}]},
            {"type": "cc:org"},
            {"type": "cc:common", "links": [{"type": "taggedWith", "targetType": "cc:org"}]}
        ]
    })
}

// ---------------------------------------------------------------------------
// Entities and links
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_get_entity_path_and_attrs() {
    let transport = RecordingTransport::replying(vec![Ok(Some(json!({
        "entities": [{"id": "e1", "name": "Ada"}]
    })))]);
    let client = client_over(&transport);

    let attrs = params(json!({"attrs": "name"}));
    let response = client.get_entity("e1", Some(&attrs)).await;

    assert!(!response.any_problems());
    assert_eq!(response.entities[0]["name"], "Ada");
    let requests = transport.requests();
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[0].path, "/entities/e1?attrs=name");
    assert!(requests[0].body.is_none());
}

#[tokio::test]
async fn test_get_entities_merges_params() {
    let transport = RecordingTransport::replying(vec![]);
    let client = client_over(&transport);

    let sel = params(json!({"type": "cc:person", "limit": 5}));
    let cursor = params(json!({"limit": 20, "after": "k9"}));
    let response = client.get_entities(Some(&sel), None, Some(&cursor)).await;

    assert!(response.entities.is_empty());
    assert_eq!(
        transport.requests()[0].path,
        "/entities?type=cc%3Aperson&limit=20&after=k9"
    );
}

#[tokio::test]
async fn test_get_entities_without_params() {
    let transport = RecordingTransport::replying(vec![]);
    let client = client_over(&transport);

    client.get_entities(None, None, None).await;
    assert_eq!(transport.requests()[0].path, "/entities");
}

#[tokio::test]
async fn test_create_and_update_post_bodies() {
    let transport = RecordingTransport::replying(vec![]);
    let client = client_over(&transport);

    let entity = json!({"type": "cc:person", "name": "Grace"});
    client.create_entity(&entity).await;
    client.update_entity("e7", &entity).await;

    let requests = transport.requests();
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].path, "/entities");
    assert_eq!(requests[0].body.as_ref(), Some(&entity));
    assert_eq!(requests[1].method, Method::POST);
    assert_eq!(requests[1].path, "/entities/e7");
    assert_eq!(requests[1].body.as_ref(), Some(&entity));
}

#[tokio::test]
async fn test_deletes() {
    let transport = RecordingTransport::replying(vec![Ok(None), Ok(None)]);
    let client = client_over(&transport);

    let single = client.delete_entity("e3").await;
    let sel = params(json!({"type": "cc:draft"}));
    let bulk = client.delete_entities(Some(&sel)).await;

    assert!(!single.any_problems());
    assert!(!bulk.any_problems());
    let requests = transport.requests();
    assert_eq!(requests[0].method, Method::DELETE);
    assert_eq!(requests[0].path, "/entities/e3");
    assert_eq!(requests[1].method, Method::DELETE);
    assert_eq!(requests[1].path, "/entities?type=cc%3Adraft");
}

#[tokio::test]
async fn test_create_link_body() {
    let transport = RecordingTransport::replying(vec![]);
    let client = client_over(&transport);

    client.create_link("memberOf", "e1", "e2").await;

    let request = &transport.requests()[0];
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "/links");
    assert_eq!(
        request.body,
        Some(json!({"type": "memberOf", "source": "e1", "target": "e2"}))
    );
}

// ---------------------------------------------------------------------------
// Failure folding
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_transport_failure_resolves_with_problem() {
    let transport = RecordingTransport::replying(vec![Err(InfoHubError::Validation(
        "connection refused".into(),
    ))]);
    let client = client_over(&transport);

    let response = client.get_entity("e1", None).await;

    assert!(response.any_problems());
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].code, Some(82));
    let err = response.errors.raise().unwrap_err();
    assert!(err.to_string().contains("connection refused"));
    assert!(err.to_string().starts_with("Application configuration error"));
}

#[tokio::test]
async fn test_remote_problems_pass_through() {
    let transport = RecordingTransport::replying(vec![Ok(Some(json!({
        "errors": [{"message": "no such entity", "info": {"id": "e404"}, "code": 12}]
    })))]);
    let client = client_over(&transport);

    let response = client.get_entity("e404", None).await;

    assert!(response.entities.is_empty());
    assert_eq!(response.errors[0].code, Some(12));
    assert_eq!(
        response.errors.to_error().unwrap().to_string(),
        "No such entity (id e404)."
    );
}

#[tokio::test]
async fn test_unserializable_body_never_sent() {
    use std::collections::HashMap;

    let transport = RecordingTransport::replying(vec![]);
    let client = client_over(&transport);

    // Non-string map keys cannot become a JSON object.
    let mut bad = HashMap::new();
    bad.insert((1, 2), "x");
    let response = client.create_entity(&bad).await;

    assert!(response.any_problems());
    assert_eq!(transport.calls(), 0);
}

// ---------------------------------------------------------------------------
// Schemas
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_get_schemas_builds_reverse_links() {
    let transport = RecordingTransport::replying(vec![Ok(Some(schema_body()))]);
    let client = client_over(&transport);

    let schemas = client.get_schemas(true).await;

    assert_eq!(transport.requests()[0].path, "/schemas");
    let keys: Vec<&str> = schemas.keys().map(String::as_str).collect();
    assert_eq!(keys, ["cc:person", "cc:project", "cc:org", "cc:common"]);

    let org = &schemas["cc:org"];
    assert_eq!(org.links_reverse.len(), 1);
    assert_eq!(org.links_reverse[0].relation, "memberOf");
    assert_eq!(
        org.links_reverse[0].target_type,
        TargetType::Many(vec!["cc:person".into(), "cc:project".into()])
    );
    assert_eq!(org.links_reverse[0].extra["label"], "Member of");
    assert!(schemas["cc:person"].links_reverse.is_empty());
    assert!(!schemas.contains_key("cc:ghost"));
}

#[tokio::test]
async fn test_schema_cache_reused_until_forced() {
    let transport = RecordingTransport::replying(vec![
        Ok(Some(schema_body())),
        Ok(Some(json!({"schemas": [{"type": "cc:only"}]}))),
    ]);
    let client = client_over(&transport);

    let first = client.get_schemas(true).await;
    let second = client.get_schemas(true).await;
    assert_eq!(transport.calls(), 1);
    assert!(Arc::ptr_eq(&first, &second));

    let forced = client.get_schemas(false).await;
    assert_eq!(transport.calls(), 2);
    assert_eq!(forced.len(), 1);

    let cached = client.get_schemas(true).await;
    assert_eq!(transport.calls(), 2);
    assert!(Arc::ptr_eq(&forced, &cached));
}

#[tokio::test]
async fn test_clear_schema_cache_refetches() {
    let transport = RecordingTransport::replying(vec![]);
    let client = client_over(&transport);

    client.get_schemas(true).await;
    client.clear_schema_cache();
    client.get_schemas(true).await;
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_failed_schema_fetch_is_not_cached() {
    let transport = RecordingTransport::replying(vec![
        Err(InfoHubError::Validation("timeout".into())),
        Ok(Some(schema_body())),
    ]);
    let client = client_over(&transport);

    let failed = client.get_schemas(true).await;
    assert!(failed.is_empty());

    let fetched = client.get_schemas(true).await;
    assert_eq!(fetched.len(), 4);
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_missing_schemas_field_yields_empty_map() {
    let transport = RecordingTransport::replying(vec![Ok(Some(json!({"entities": []})))]);
    let client = client_over(&transport);

    let schemas = client.get_schemas(true).await;
    assert!(schemas.is_empty());
    client.get_schemas(true).await;
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_undecodable_schema_list_is_not_cached() {
    let transport = RecordingTransport::replying(vec![
        Ok(Some(json!({"schemas": [{"type": "A", "links": [{"type": "owns"}]}, {"type": "B"}]}))),
        Ok(Some(schema_body())),
    ]);
    let client = client_over(&transport);

    let broken = client.get_schemas(true).await;
    assert!(broken.is_empty());

    let fetched = client.get_schemas(true).await;
    assert_eq!(fetched.len(), 4);
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_try_get_schemas_reports_failures() {
    let transport = RecordingTransport::replying(vec![
        Err(InfoHubError::Validation("unreachable".into())),
        Ok(Some(json!({"schemas": "not a list"}))),
        Ok(Some(schema_body())),
    ]);
    let client = client_over(&transport);

    let err = client.try_get_schemas(true).await.unwrap_err();
    assert_eq!(err.problems()[0].code, Some(82));
    assert!(err.to_string().contains("unreachable"));

    let err = client.try_get_schemas(true).await.unwrap_err();
    assert!(matches!(err, InfoHubError::Serialization(_)));

    let schemas = client.try_get_schemas(true).await.unwrap();
    assert_eq!(schemas.len(), 4);
    let cached = client.try_get_schemas(true).await.unwrap();
    assert!(Arc::ptr_eq(&schemas, &cached));
    assert_eq!(transport.calls(), 3);
}
