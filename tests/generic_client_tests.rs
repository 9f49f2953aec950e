//! Integration tests for the generic resource operations.
//!
//! These tests verify verb and link validation (no request may reach the
//! server when a pre-flight check fails), URL resolution, filter encoding,
//! pagination, action invocation, and error translation.

use std::collections::HashMap;

use schema_api::clients::{ClientError, GenericClient, HttpClient, ListOptions};
use schema_api::rest::{Collection, Resource, ResourceOperation, ValidationError};
use schema_api::schema::{SchemaDocument, SchemaRegistry};
use schema_api::{AccessKey, BaseUrl, ClientOptions, HttpMethod, SecretKey};
use serde_json::{json, Value};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// "access:secret" in base64
const BASIC_AUTH: &str = "Basic YWNjZXNzOnNlY3JldA==";

/// Builds a client whose registry describes three types:
///
/// - `publish`: full verbs, with a collection link
/// - `containerEvent`: no PUT on instances
/// - `volume`: POST only, and no collection link
fn create_test_client(server: &MockServer) -> GenericClient {
    let base = server.uri();
    let options = ClientOptions::builder()
        .url(BaseUrl::new(format!("{base}/v1")).unwrap())
        .access_key(AccessKey::new("access").unwrap())
        .secret_key(SecretKey::new("secret").unwrap())
        .build()
        .unwrap();

    let document: SchemaDocument = serde_json::from_value(json!({
        "data": [
            {
                "id": "publish",
                "pluralName": "publishes",
                "collectionMethods": ["GET", "POST"],
                "resourceMethods": ["GET", "PUT", "DELETE"],
                "links": {
                    "self": format!("{base}/v1/schemas/publish"),
                    "collection": format!("{base}/v1/publishes")
                }
            },
            {
                "id": "containerEvent",
                "pluralName": "containerEvents",
                "collectionMethods": ["GET", "POST"],
                "resourceMethods": ["GET", "DELETE"],
                "links": {
                    "self": format!("{base}/v1/schemas/containerevent"),
                    "collection": format!("{base}/v1/containerevents")
                }
            },
            {
                "id": "volume",
                "pluralName": "volumes",
                "collectionMethods": ["POST"],
                "resourceMethods": [],
                "links": {
                    "self": format!("{base}/v1/schemas/volume")
                }
            }
        ]
    }))
    .unwrap();

    GenericClient::with_registry(
        HttpClient::new(options).unwrap(),
        SchemaRegistry::new(document),
    )
}

fn publish(server: &MockServer, id: &str) -> Resource {
    serde_json::from_value(json!({
        "id": id,
        "type": "publish",
        "links": {
            "self": format!("{}/v1/publishes/{id}", server.uri()),
            "events": format!("{}/v1/publishes/{id}/events", server.uri())
        }
    }))
    .unwrap()
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.unwrap().len()
}

// ============================================================================
// Pre-flight validation
// ============================================================================

#[tokio::test]
async fn test_unknown_type_is_rejected_without_request() {
    let server = MockServer::start().await;
    let client = create_test_client(&server);

    let result = client.list::<Value>("widget", None).await;

    assert!(matches!(
        result,
        Err(ClientError::Validation(ValidationError::UnknownType { .. }))
    ));
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn test_missing_verbs_are_rejected_without_request() {
    let server = MockServer::start().await;
    let client = create_test_client(&server);
    let existing = publish(&server, "1v1");

    let list = client.list::<Value>("volume", None).await;
    let by_id = client.by_id::<Value>("volume", "1v1").await;
    let update = client
        .update::<Value, _>("containerEvent", &existing, &json!({}))
        .await;
    let delete = client.delete("volume", &existing).await;

    let operations: Vec<_> = [list.err(), by_id.err(), update.err(), delete.err()]
        .into_iter()
        .map(|error| match error {
            Some(ClientError::Validation(ValidationError::OperationNotAllowed {
                operation,
                method,
                ..
            })) => (operation, method),
            other => panic!("Expected OperationNotAllowed, got {other:?}"),
        })
        .collect();

    assert_eq!(
        operations,
        vec![
            (ResourceOperation::List, HttpMethod::Get),
            (ResourceOperation::ById, HttpMethod::Get),
            (ResourceOperation::Update, HttpMethod::Put),
            (ResourceOperation::Delete, HttpMethod::Delete),
        ]
    );
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn test_missing_self_link_is_rejected_without_request() {
    let server = MockServer::start().await;
    let client = create_test_client(&server);
    let detached = Resource {
        id: "1p9".to_string(),
        type_name: "publish".to_string(),
        ..Resource::default()
    };

    let update = client
        .update::<Resource, _>("publish", &detached, &json!({"name": "x"}))
        .await;
    let delete = client.delete("publish", &detached).await;
    let reload = client.reload::<Resource>(&detached).await;

    for result in [update.map(drop), delete, reload.map(drop)] {
        match result {
            Err(ClientError::Validation(ValidationError::MissingLink { link, resource })) => {
                assert_eq!(link, "self");
                assert_eq!(resource, "publish/1p9");
            }
            other => panic!("Expected MissingLink, got {other:?}"),
        }
    }
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn test_unavailable_action_is_rejected_without_request() {
    let server = MockServer::start().await;
    let client = create_test_client(&server);
    let existing = publish(&server, "1p1");

    let result = client
        .action::<Resource, Value>("publish", "remove", &existing, None)
        .await;

    assert!(matches!(
        result,
        Err(ClientError::Validation(ValidationError::ActionUnavailable { .. }))
    ));
    assert_eq!(request_count(&server).await, 0);
}

// ============================================================================
// Collections
// ============================================================================

#[tokio::test]
async fn test_list_sends_filters_and_pages_forward() {
    let server = MockServer::start().await;
    let client = create_test_client(&server);
    let next = format!("{}/v1/publishes?marker=m2", server.uri());

    Mock::given(method("GET"))
        .and(path("/v1/publishes"))
        .and(query_param("name", "resource.change"))
        .and(header("authorization", BASIC_AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "collection",
            "resourceType": "publish",
            "data": [{"id": "1p1", "type": "publish"}],
            "pagination": {"next": next, "limit": 1, "partial": true}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/publishes"))
        .and(query_param("marker", "m2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "collection",
            "resourceType": "publish",
            "data": [{"id": "1p2", "type": "publish"}],
            "pagination": {"limit": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let filters = ListOptions::new().filter("name", "resource.change");
    let first: Collection<Resource> = client.list("publish", Some(&filters)).await.unwrap();
    assert_eq!(first.data[0].id, "1p1");
    assert!(first.has_next_page());

    let second = assert_ok!(client.next_page(&first).await).unwrap();
    assert_eq!(second.data[0].id, "1p2");
    assert!(!second.has_next_page());

    let end = assert_ok!(client.next_page(&second).await);
    assert!(end.is_none());
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn test_list_repeats_sequence_filters() {
    let server = MockServer::start().await;
    let client = create_test_client(&server);

    Mock::given(method("GET"))
        .and(path("/v1/containerevents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let filters = ListOptions::new()
        .filter("state", "created")
        .filter("kind", vec!["start", "stop"]);
    let page: Collection<Resource> = client
        .list("containerEvent", Some(&filters))
        .await
        .unwrap();
    assert!(page.data.is_empty());

    let requests = server.received_requests().await.unwrap();
    let pairs: Vec<(String, String)> = requests[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let kinds: Vec<&str> = pairs
        .iter()
        .filter(|(k, _)| k == "kind")
        .map(|(_, v)| v.as_str())
        .collect();

    assert_eq!(kinds, vec!["start", "stop"]);
    assert!(pairs.contains(&("state".to_string(), "created".to_string())));
}

#[tokio::test]
async fn test_get_link_follows_named_link() {
    let server = MockServer::start().await;
    let client = create_test_client(&server);
    let existing = publish(&server, "1p1");

    Mock::given(method("GET"))
        .and(path("/v1/publishes/1p1/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "1ce1", "type": "containerEvent"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let events: Collection<Resource> = client.get_link(&existing, "events", None).await.unwrap();
    assert_eq!(events.data[0].type_name, "containerEvent");

    let missing = client.get_link::<Value>(&existing, "hosts", None).await;
    assert!(matches!(
        missing,
        Err(ClientError::Validation(ValidationError::MissingLink { .. }))
    ));
}

// ============================================================================
// Single resources
// ============================================================================

#[tokio::test]
async fn test_create_posts_to_collection_link() {
    let server = MockServer::start().await;
    let client = create_test_client(&server);

    Mock::given(method("POST"))
        .and(path("/v1/publishes"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"name": "resource.change"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "1p3",
            "type": "publish",
            "name": "resource.change"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created: Value = client
        .create("publish", &json!({"name": "resource.change"}))
        .await
        .unwrap();
    assert_eq!(created["id"], "1p3");
}

#[tokio::test]
async fn test_create_derives_collection_url_from_schema_link() {
    let server = MockServer::start().await;
    let client = create_test_client(&server);

    Mock::given(method("POST"))
        .and(path("/v1/volumes"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "1v1", "type": "volume"})))
        .expect(1)
        .mount(&server)
        .await;

    let created: Resource = client
        .create("volume", &json!({"name": "data"}))
        .await
        .unwrap();
    assert_eq!(created.id, "1v1");
}

#[tokio::test]
async fn test_update_puts_to_self_link() {
    let server = MockServer::start().await;
    let client = create_test_client(&server);
    let existing = publish(&server, "1p1");

    Mock::given(method("PUT"))
        .and(path("/v1/publishes/1p1"))
        .and(body_json(json!({"name": "renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "1p1",
            "type": "publish",
            "name": "renamed"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let updated: Value = client
        .update("publish", &existing, &json!({"name": "renamed"}))
        .await
        .unwrap();
    assert_eq!(updated["name"], "renamed");
}

#[tokio::test]
async fn test_empty_modify_response_yields_default() {
    let server = MockServer::start().await;
    let client = create_test_client(&server);
    let existing = publish(&server, "1p1");

    Mock::given(method("PUT"))
        .and(path("/v1/publishes/1p1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let updated: Resource = client
        .update("publish", &existing, &json!({"name": "renamed"}))
        .await
        .unwrap();
    assert_eq!(updated, Resource::default());
}

#[tokio::test]
async fn test_by_id_appends_id_to_collection_link() {
    let server = MockServer::start().await;
    let client = create_test_client(&server);

    Mock::given(method("GET"))
        .and(path("/v1/publishes/1p5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "1p5", "type": "publish"})))
        .expect(1)
        .mount(&server)
        .await;

    let found: Resource = client.by_id("publish", "1p5").await.unwrap();
    assert_eq!(found.id, "1p5");
}

#[tokio::test]
async fn test_by_id_not_found_is_reported_as_api_error() {
    let server = MockServer::start().await;
    let client = create_test_client(&server);

    Mock::given(method("GET"))
        .and(path("/v1/publishes/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "id": "missing",
            "type": "error",
            "status": 404,
            "code": "NotFound"
        })))
        .mount(&server)
        .await;

    let error = assert_err!(client.by_id::<Resource>("publish", "missing").await);

    assert!(error.is_not_found());
    assert!(schema_api::is_not_found(&error));
    assert_eq!(error.status_code(), Some(404));
}

#[tokio::test]
async fn test_error_body_is_summarized() {
    let server = MockServer::start().await;
    let client = create_test_client(&server);

    Mock::given(method("POST"))
        .and(path("/v1/publishes"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "id": "1",
            "type": "error",
            "code": "Invalid",
            "message": "bad field",
            "status": 422
        })))
        .mount(&server)
        .await;

    let error = client
        .create::<Resource, _>("publish", &json!({"name": ""}))
        .await
        .unwrap_err();

    assert!(!error.is_not_found());
    match error {
        ClientError::Api(api) => {
            assert_eq!(api.status_code, 422);
            assert_eq!(api.body, "code=Invalid, message=bad field");
            assert_eq!(api.url, format!("{}/v1/publishes", server.uri()));
            assert!(api.message.contains("422"));
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_and_reload_use_self_link() {
    let server = MockServer::start().await;
    let client = create_test_client(&server);
    let existing = publish(&server, "1p1");

    Mock::given(method("GET"))
        .and(path("/v1/publishes/1p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "1p1", "type": "publish"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/v1/publishes/1p1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let fresh: Resource = client.reload(&existing).await.unwrap();
    assert_eq!(fresh.id, "1p1");

    assert_ok!(client.delete("publish", &existing).await);
}

#[tokio::test]
async fn test_delete_failure_is_api_error() {
    let server = MockServer::start().await;
    let client = create_test_client(&server);
    let existing = publish(&server, "1p1");

    Mock::given(method("DELETE"))
        .and(path("/v1/publishes/1p1"))
        .respond_with(ResponseTemplate::new(409).set_body_string("conflict"))
        .mount(&server)
        .await;

    let error = client.delete("publish", &existing).await.unwrap_err();
    assert_eq!(error.status_code(), Some(409));
}

// ============================================================================
// Actions and raw posts
// ============================================================================

#[tokio::test]
async fn test_action_posts_to_instance_action_url() {
    let server = MockServer::start().await;
    let client = create_test_client(&server);
    let existing: Resource = serde_json::from_value(json!({
        "id": "1ce2",
        "type": "containerEvent",
        "actions": {
            "remove": format!("{}/v1/containerevents/1ce2?action=remove", server.uri())
        }
    }))
    .unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/containerevents/1ce2"))
        .and(query_param("action", "remove"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "id": "1ce2",
            "type": "containerEvent",
            "state": "removing"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result: Value = client
        .action::<Value, Value>("containerEvent", "remove", &existing, None)
        .await
        .unwrap();
    assert_eq!(result["state"], "removing");

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_action_with_body_and_empty_response() {
    let server = MockServer::start().await;
    let client = create_test_client(&server);
    let existing: Resource = serde_json::from_value(json!({
        "id": "1ce2",
        "type": "containerEvent",
        "actions": {
            "create": format!("{}/v1/containerevents/1ce2?action=create", server.uri())
        }
    }))
    .unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/containerevents/1ce2"))
        .and(body_json(json!({"force": true})))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let result: HashMap<String, Value> = client
        .action("containerEvent", "create", &existing, Some(&json!({"force": true})))
        .await
        .unwrap();
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_post_sends_body_to_arbitrary_url() {
    let server = MockServer::start().await;
    let client = create_test_client(&server);

    Mock::given(method("POST"))
        .and(path("/v1/publish"))
        .and(body_json(json!({"name": "ping"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "1p7"})))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/v1/publish", server.uri());
    let created: Resource = client.post(&url, &json!({"name": "ping"})).await.unwrap();
    assert_eq!(created.id, "1p7");
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    let server = MockServer::start().await;
    let client = create_test_client(&server);

    Mock::given(method("GET"))
        .and(path("/v1/publishes/1p1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let result = client.by_id::<Resource>("publish", "1p1").await;
    match result {
        Err(ClientError::Decode { payload, .. }) => assert_eq!(payload, "<html>"),
        other => panic!("Expected Decode error, got {other:?}"),
    }
}
