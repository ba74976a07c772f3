#![allow(clippy::unwrap_used)]
// Integration tests for `LxdClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lxdeck_api::{Error, InstanceStatePut, LxdClient, NetworkPut, NetworksPost};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, LxdClient) {
    setup_with_project("default").await
}

async fn setup_with_project(project: &str) -> (MockServer, LxdClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = LxdClient::with_client(reqwest::Client::new(), base_url, project.into());
    (server, client)
}

fn sync(metadata: serde_json::Value) -> serde_json::Value {
    json!({
        "type": "sync",
        "status": "Success",
        "status_code": 200,
        "operation": "",
        "error_code": 0,
        "error": "",
        "metadata": metadata
    })
}

fn async_op(id: &str) -> serde_json::Value {
    json!({
        "type": "async",
        "status": "Operation created",
        "status_code": 100,
        "operation": format!("/1.0/operations/{id}"),
        "error_code": 0,
        "error": "",
        "metadata": { "id": id, "status": "Running", "status_code": 103 }
    })
}

fn error(code: u16, message: &str) -> serde_json::Value {
    json!({
        "type": "error",
        "error": message,
        "error_code": code,
        "metadata": null
    })
}

// ── Server ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_server() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sync(json!({
            "auth": "trusted",
            "config": { "network.ovn.northbound_connection": "tcp:10.0.0.1:6641" },
            "environment": { "os_name": "Ubuntu", "server_version": "5.21" }
        }))))
        .mount(&server)
        .await;

    let info = client.get_server().await.unwrap();
    assert_eq!(info.auth, "trusted");
    assert_eq!(info.environment.os_name, "Ubuntu");
    assert_eq!(
        info.config["network.ovn.northbound_connection"],
        json!("tcp:10.0.0.1:6641")
    );
}

// ── Instances ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_instances() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/1.0/instances"))
        .and(query_param("recursion", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sync(json!([
            {
                "name": "web-1",
                "status": "Running",
                "status_code": 103,
                "type": "container",
                "created_at": "2024-06-15T10:30:00Z"
            },
            { "name": "db-1", "status": "Stopped", "type": "virtual-machine" }
        ]))))
        .mount(&server)
        .await;

    let instances = client.list_instances().await.unwrap();
    assert_eq!(instances.len(), 2);
    assert_eq!(instances[0].name, "web-1");
    assert_eq!(instances[0].status, "Running");
    assert!(instances[0].created_at.is_some());
    assert_eq!(instances[1].instance_type, "virtual-machine");
}

#[tokio::test]
async fn test_stop_waits_for_operation() {
    let (server, client) = setup().await;
    let op_id = uuid::Uuid::new_v4().to_string();

    Mock::given(method("PUT"))
        .and(path("/1.0/instances/web-1/state"))
        .and(body_json(json!({
            "action": "stop", "timeout": -1, "force": false, "stateful": false
        })))
        .respond_with(ResponseTemplate::new(202).set_body_json(async_op(&op_id)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/1.0/operations/{op_id}/wait")))
        .respond_with(ResponseTemplate::new(200).set_body_json(sync(json!({
            "id": op_id, "status": "Success", "status_code": 200
        }))))
        .expect(1)
        .mount(&server)
        .await;

    client
        .change_instance_state("web-1", &InstanceStatePut::new("stop", false))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_failed_operation_carries_server_detail() {
    let (server, client) = setup().await;
    let op_id = uuid::Uuid::new_v4().to_string();

    Mock::given(method("PUT"))
        .and(path("/1.0/instances/web-1/state"))
        .respond_with(ResponseTemplate::new(202).set_body_json(async_op(&op_id)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/1.0/operations/{op_id}/wait")))
        .respond_with(ResponseTemplate::new(200).set_body_json(sync(json!({
            "id": op_id,
            "status": "Failure",
            "status_code": 400,
            "err": "Failed shutting down instance"
        }))))
        .mount(&server)
        .await;

    let result = client
        .change_instance_state("web-1", &InstanceStatePut::new("stop", false))
        .await;

    match result {
        Err(Error::OperationFailed { ref message, .. }) => {
            assert_eq!(message, "Failed shutting down instance");
        }
        other => panic!("expected OperationFailed, got: {other:?}"),
    }
}

// ── Networks ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_networks_in_project() {
    let (server, client) = setup_with_project("staging").await;

    Mock::given(method("GET"))
        .and(path("/1.0/networks"))
        .and(query_param("project", "staging"))
        .and(query_param("recursion", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sync(json!([{
            "name": "lxdbr0",
            "type": "bridge",
            "managed": true,
            "status": "Created",
            "config": { "ipv4.address": "10.1.1.1/24", "bridge.mode": "standard" },
            "used_by": ["/1.0/instances/web-1"]
        }]))))
        .mount(&server)
        .await;

    let networks = client.list_networks().await.unwrap();
    assert_eq!(networks.len(), 1);
    assert_eq!(networks[0].network_type, "bridge");
    assert_eq!(networks[0].config["ipv4.address"], "10.1.1.1/24");
    assert_eq!(networks[0].used_by.len(), 1);
}

#[tokio::test]
async fn test_create_network_sync() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/1.0/networks"))
        .and(body_json(json!({
            "name": "net0",
            "description": "",
            "type": "bridge",
            "config": { "bridge.mode": "fan" }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(sync(json!({}))))
        .expect(1)
        .mount(&server)
        .await;

    let body = NetworksPost {
        name: "net0".into(),
        description: String::new(),
        network_type: "bridge".into(),
        config: [("bridge.mode".to_string(), "fan".to_string())].into(),
    };
    client.create_network(&body).await.unwrap();
}

#[tokio::test]
async fn test_update_network_error_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/1.0/networks/net0"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(error(400, "Invalid value for network \"net0\" option \"ipv4.address\"")),
        )
        .mount(&server)
        .await;

    let result = client
        .update_network(
            "net0",
            &NetworkPut {
                description: String::new(),
                config: [("ipv4.address".to_string(), "bogus".to_string())].into(),
            },
        )
        .await;

    match result {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 400);
            assert!(message.contains("ipv4.address"), "got: {message}");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/1.0/networks/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(error(404, "Network not found")))
        .mount(&server)
        .await;

    let err = client.get_network("missing").await.unwrap_err();
    assert!(err.is_not_found(), "got: {err:?}");
    assert_eq!(err.detail(), "Network not found");
}

#[tokio::test]
async fn test_untrusted_client() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(403).set_body_json(error(403, "not authorized")))
        .mount(&server)
        .await;

    let result = client.delete_network("net0").await;
    assert!(
        matches!(result, Err(Error::Authentication { ref message }) if message == "not authorized"),
        "got: {result:?}"
    );
}
