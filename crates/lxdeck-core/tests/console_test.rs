#![allow(clippy::unwrap_used)]
// End-to-end tests: action buttons and form sessions driven through a
// `Console` against a wiremock LXD daemon.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lxdeck_api::LxdClient;
use lxdeck_core::{
    ActionButton, ActionOutcome, Console, ConsoleConfig, CoreError, DeleteNetwork, FieldId,
    FormEdit, FormSession, InstanceAction, InstanceLifecycle, Invalidate, Modifiers,
    NetworkFormValues, NetworkType, QueryKey, SaveMode, SaveNetwork, Severity, Trigger,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Console) {
    let server = MockServer::start().await;
    let url = Url::parse(&server.uri()).unwrap();
    let client = LxdClient::with_client(reqwest::Client::new(), url.clone(), "default".into());
    let console = Console::with_client(ConsoleConfig::new(url), client);
    (server, console)
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
    json!({ "type": "error", "error": message, "error_code": code, "metadata": null })
}

async fn mount_instances(server: &MockServer, status: &str, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/1.0/instances"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sync(json!([
            { "name": "web-1", "status": status, "type": "container" }
        ]))))
        .expect(expected_calls)
        .mount(server)
        .await;
}

// ── Settings ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_settings_fetched_once() {
    let (server, console) = setup().await;

    Mock::given(method("GET"))
        .and(path("/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sync(json!({
            "auth": "trusted",
            "config": { "network.ovn.northbound_connection": "tcp:10.0.0.1:6641" },
            "environment": { "os_name": "Ubuntu", "server_version": "5.21" }
        }))))
        .expect(1)
        .mount(&server)
        .await;

    assert!(console.cached_settings().is_none());
    let settings = console.settings().await.unwrap();
    assert!(settings.has_ovn());
    assert!(settings.has_fan());

    console.settings().await.unwrap();
    assert!(console.cached_settings().is_some());
}

// ── Instances ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_instances_refetched_only_when_stale() {
    let (server, console) = setup().await;
    mount_instances(&server, "Running", 2).await;

    assert!(console.store().is_stale(QueryKey::Instances));
    let first = console.instances().await.unwrap();
    assert_eq!(first.len(), 1);
    assert!(!console.store().is_stale(QueryKey::Instances));

    // Served from the cache.
    console.instances().await.unwrap();

    console.store().invalidate(QueryKey::Instances);
    console.instances().await.unwrap();
}

#[tokio::test]
async fn test_shift_click_stop_runs_end_to_end() {
    let (server, console) = setup().await;
    mount_instances(&server, "Running", 1).await;

    Mock::given(method("PUT"))
        .and(path("/1.0/instances/web-1/state"))
        .and(body_json(json!({
            "action": "stop", "timeout": -1, "force": false, "stateful": false
        })))
        .respond_with(ResponseTemplate::new(202).set_body_json(async_op("op-1")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/1.0/operations/op-1/wait"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sync(json!({
            "id": "op-1", "status": "Success", "status_code": 200
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let instances = console.instances().await.unwrap();
    let action = InstanceLifecycle::new(&instances[0], InstanceAction::Stop);
    let mut button = ActionButton::new(action);

    assert_eq!(button.click(Modifiers::SHIFT), Trigger::Fire);
    let outcome = button
        .run(&console, console.notifications(), &console)
        .await;

    assert!(outcome.is_success());
    assert!(!button.is_loading());
    let note = console.notifications().current().unwrap();
    assert_eq!(note.severity, Severity::Positive);
    assert_eq!(note.message, "Instance web-1 stopped.");
    assert!(console.store().is_stale(QueryKey::Instances));
}

#[tokio::test]
async fn test_missing_instance_is_forgotten() {
    let (server, console) = setup().await;
    mount_instances(&server, "Running", 1).await;

    Mock::given(method("GET"))
        .and(path("/1.0/instances/web-1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(error(404, "Instance not found")))
        .mount(&server)
        .await;

    console.instances().await.unwrap();
    assert!(console.store().instance("web-1").is_some());

    let err = console.instance("web-1").await.unwrap_err();
    assert!(matches!(err, CoreError::InstanceNotFound { ref name } if name == "web-1"));
    assert!(console.store().instance("web-1").is_none());
}

// ── Networks ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_in_use_network_reports_detail() {
    let (server, console) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/1.0/networks/lxdbr0"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(error(400, "The network is currently in use")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut button = ActionButton::new(DeleteNetwork {
        name: "lxdbr0".into(),
        deletable: true,
    });

    let Trigger::Prompt(prompt) = button.click(Modifiers::NONE) else {
        panic!("delete must ask for confirmation");
    };
    assert!(prompt.message.contains("lxdbr0"));
    assert_eq!(button.confirm(), Trigger::Fire);

    let outcome = button
        .run(&console, console.notifications(), &console)
        .await;

    assert!(matches!(outcome, ActionOutcome::Failed(_)));
    let note = console.notifications().current().unwrap();
    assert_eq!(note.severity, Severity::Negative);
    assert_eq!(note.title, "Network deletion failed");
    assert_eq!(note.message, "The network is currently in use");
}

#[tokio::test]
async fn test_create_network_from_form_session() {
    let (server, console) = setup().await;

    Mock::given(method("POST"))
        .and(path("/1.0/networks"))
        .and(body_json(json!({
            "name": "net0",
            "description": "",
            "type": "bridge",
            "config": {
                "bridge.mode": "standard",
                "ipv4.address": "10.0.0.1/24",
                "user.owner": "ops"
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(sync(json!({}))))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = FormSession::new(NetworkFormValues::for_create());
    session.edit(FormEdit::SetName("net0".into()));
    session.edit(FormEdit::SetType(NetworkType::BridgeStandard));
    session.edit(FormEdit::Set(FieldId::Ipv4Address, Some("10.0.0.1/24".into())));
    session.edit(FormEdit::AddUser {
        key: "owner".into(),
        value: "ops".into(),
    });
    assert!(session.validate(None).is_empty());

    let mut button = ActionButton::new(SaveNetwork {
        model: session.submit_model().unwrap(),
        mode: SaveMode::Create,
    });
    assert_eq!(button.click(Modifiers::NONE), Trigger::Fire);

    let outcome = button
        .run(&console, console.notifications(), &console)
        .await;
    assert!(outcome.is_success());
    assert_eq!(
        console.notifications().current().unwrap().message,
        "Network net0 created."
    );
    assert!(console.store().is_stale(QueryKey::Networks));
}

#[tokio::test]
async fn test_edit_network_loads_form() {
    let (server, console) = setup().await;

    Mock::given(method("GET"))
        .and(path("/1.0/networks/fan0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sync(json!({
            "name": "fan0",
            "type": "bridge",
            "managed": true,
            "status": "Created",
            "config": {
                "bridge.mode": "fan",
                "fan.underlay_subnet": "10.0.0.0/16",
                "user.team": "infra",
                "volatile.bridge.hwaddr": "00:16:3e:00:00:01"
            },
            "used_by": []
        }))))
        .mount(&server)
        .await;

    let session = console.edit_network("fan0").await.unwrap();
    let values = session.values();
    assert_eq!(values.network_type, NetworkType::BridgeFan);
    assert!(!values.read_only);
    assert!(!values.is_creating);
    assert_eq!(values.get(FieldId::FanUnderlaySubnet), Some("10.0.0.0/16"));
    assert_eq!(values.user.len(), 1);
    assert!(console.store().network("fan0").is_some());
}

#[tokio::test]
async fn test_edit_network_keeps_keys_without_form_fields() {
    let (server, console) = setup().await;

    Mock::given(method("GET"))
        .and(path("/1.0/networks/lxdbr0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sync(json!({
            "name": "lxdbr0",
            "type": "bridge",
            "managed": true,
            "status": "Created",
            "config": {
                "ipv4.address": "10.0.0.1/24",
                "ipv6.ovn.routing": "true",
                "raw.dnsmasq": "dhcp-option=6,1.1.1.1",
                "security.acls": "web"
            },
            "used_by": []
        }))))
        .mount(&server)
        .await;

    // The PUT replaces the whole config, so unknown keys must be resent.
    Mock::given(method("PUT"))
        .and(path("/1.0/networks/lxdbr0"))
        .and(body_json(json!({
            "description": "x",
            "config": {
                "ipv4.address": "10.0.0.1/24",
                "ipv6.ovn.routing": "true",
                "raw.dnsmasq": "dhcp-option=6,1.1.1.1",
                "security.acls": "web"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(sync(json!({}))))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = console.edit_network("lxdbr0").await.unwrap();
    session.edit(FormEdit::SetDescription("x".into()));
    assert_eq!(
        session.values().get(FieldId::Ipv6OvnRouting),
        Some("true")
    );

    let mut button = ActionButton::new(SaveNetwork {
        model: session.submit_model().unwrap(),
        mode: SaveMode::Update,
    });
    assert_eq!(button.click(Modifiers::NONE), Trigger::Fire);

    let outcome = button
        .run(&console, console.notifications(), &console)
        .await;
    assert!(outcome.is_success());
    assert_eq!(
        console.notifications().current().unwrap().message,
        "Network lxdbr0 updated."
    );
}

#[tokio::test]
async fn test_missing_network() {
    let (server, console) = setup().await;

    Mock::given(method("GET"))
        .and(path("/1.0/networks/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(error(404, "Network not found")))
        .mount(&server)
        .await;

    let err = console.network("gone").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, CoreError::NetworkNotFound { .. }));
}
