//! View, reload and edit-flow tests against a mock CIM-RS server.

use cimadmin_client::{
    AdminClient,
    constants::cimrs_path,
    model::{ConfigSetting, IndicationSubscription, ProviderModule},
};
use cimadmin_console::{
    ConsoleError, EditSession, Indicator, ModuleControl, MutationOutcome, PENDING_REQUESTS_MESSAGE,
    ReloadOutcome, TableRow, TableView, status::CHECK_ONE_MESSAGE,
};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

const TRACE_REF: &str = "root%2FPG_Config/classes/PG_ConfigSetting/instances/traceLevel";

fn listing_path(relative: &str) -> String {
    format!("/cimrs/{}", relative)
}

fn config_listing() -> Value {
    json!({
        "instances": [
            {
                "self": TRACE_REF,
                "properties": {
                    "PropertyName": "traceLevel",
                    "CurrentValue": "1",
                    "DefaultValue": "1",
                    "PlannedValue": "1",
                    "DynamicProperty": true
                }
            },
            {
                "self": "root%2FPG_Config/classes/PG_ConfigSetting/instances/enableHttpConnection",
                "properties": {
                    "PropertyName": "enableHttpConnection",
                    "CurrentValue": "true",
                    "DefaultValue": "false",
                    "PlannedValue": "true",
                    "DynamicProperty": false
                }
            },
            {
                "self": "root%2FPG_Config/classes/PG_ConfigSetting/instances/logdir",
                "properties": {
                    "PropertyName": "logdir",
                    "CurrentValue": "%2Fvar%2Flog%2Fpegasus",
                    "DefaultValue": "%2Fvar%2Flog",
                    "PlannedValue": null,
                    "DynamicProperty": "false"
                }
            }
        ]
    })
}

async fn mount_config_listing(server: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(listing_path(cimrs_path::CONFIG_SETTING_INSTANCES)))
        .respond_with(ResponseTemplate::new(200).set_body_json(config_listing()))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn loaded_config_view(client: &AdminClient) -> TableView<ConfigSetting> {
    let mut view = TableView::new();
    assert_eq!(view.reload(client).await, ReloadOutcome::Rendered(3));
    view
}

fn snapshot(view: &TableView<ConfigSetting>) -> Vec<TableRow> {
    view.table().rows().to_vec()
}

// ============== Rendering ==============

#[tokio::test]
async fn test_reload_renders_sorted_rows() {
    let server = MockServer::start().await;
    mount_config_listing(&server, 1).await;
    let client = AdminClient::from_server_addr(&server.uri()).unwrap();

    let view = loaded_config_view(&client).await;
    let keys: Vec<&str> = view.table().rows().iter().map(TableRow::key).collect();
    assert_eq!(keys, vec!["enableHttpConnection", "logdir", "traceLevel"]);

    assert_eq!(view.table().rows()[2].id, format!("row_{}", TRACE_REF));
    assert_eq!(view.reference("traceLevel"), Some(TRACE_REF));
    assert_eq!(view.table().rows()[1].cells[1].text(), "/var/log/pegasus");

    let html = view.table().to_html();
    assert!(html.contains("<table id=\"configTable\">"));
    assert!(html.contains("<th>Property Name</th>"));
}

#[tokio::test]
async fn test_empty_listing_leaves_only_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(listing_path(cimrs_path::SUBSCRIPTION_INSTANCES)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"instances": []})))
        .mount(&server)
        .await;
    let client = AdminClient::from_server_addr(&server.uri()).unwrap();

    let mut view: TableView<IndicationSubscription> = TableView::new();
    assert_eq!(view.reload(&client).await, ReloadOutcome::Rendered(0));
    assert!(view.table().is_empty());
    assert_eq!(view.table().to_text().lines().count(), 1);
}

#[tokio::test]
async fn test_reload_twice_is_idempotent() {
    let server = MockServer::start().await;
    mount_config_listing(&server, 2).await;
    let client = AdminClient::from_server_addr(&server.uri()).unwrap();

    let mut view = loaded_config_view(&client).await;
    let first = snapshot(&view);
    view.reload(&client).await;
    assert_eq!(snapshot(&view), first);
    assert_eq!(view.references().len(), 3);
}

#[tokio::test]
async fn test_listing_error_reports_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(listing_path(cimrs_path::PROVIDER_MODULE_INSTANCES)))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "CIM_ERR_FAILED",
            "details": "repository locked"
        })))
        .mount(&server)
        .await;
    let client = AdminClient::from_server_addr(&server.uri()).unwrap();

    let mut view: TableView<ProviderModule> = TableView::new();
    assert_eq!(view.reload(&client).await, ReloadOutcome::Failed);
    assert!(view.table().is_empty());
    assert_eq!(
        view.status().indicator,
        Indicator::Failure {
            message: "CIM_ERR_FAILED".to_string(),
            tooltip: "repository locked".to_string(),
        }
    );
}

// ============== Edit / reset ==============

#[tokio::test]
async fn test_reset_success_reloads_once() {
    let server = MockServer::start().await;
    mount_config_listing(&server, 2).await;
    Mock::given(method("POST"))
        .and(path(listing_path(&format!("{}/UpdatePropertyValue", TRACE_REF))))
        .and(body_json(json!({
            "kind": "methodrequest",
            "self": TRACE_REF,
            "method": "UpdatePropertyValue",
            "parameters": {
                "resetvalue": true,
                "setcurrentvalue": true,
                "setPlannedValue": false
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"returnvalue": true})))
        .expect(1)
        .mount(&server)
        .await;
    let client = AdminClient::from_server_addr(&server.uri()).unwrap();

    let mut view = loaded_config_view(&client).await;
    let mut session = EditSession::new();
    session.open_reset(&view, "traceLevel").unwrap();
    session.form_mut().unwrap().set_current.set(true);

    let outcome = session.submit(&client, &mut view).await.unwrap();
    assert_eq!(outcome, MutationOutcome::Applied);
    assert_eq!(
        session.status().indicator,
        Indicator::Success {
            tooltip: String::new(),
        }
    );
    assert_eq!(view.table().len(), 3);
}

#[tokio::test]
async fn test_noop_edit_round_trip() {
    let server = MockServer::start().await;
    mount_config_listing(&server, 2).await;
    Mock::given(method("POST"))
        .and(path(listing_path(&format!("{}/UpdatePropertyValue", TRACE_REF))))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"returnvalue": true})))
        .expect(1)
        .mount(&server)
        .await;
    let client = AdminClient::from_server_addr(&server.uri()).unwrap();

    let mut view = loaded_config_view(&client).await;
    let before = snapshot(&view);

    let mut session = EditSession::new();
    session.open_edit(&view, "traceLevel").unwrap();
    session.form_mut().unwrap().set_planned.set(true);
    session.submit(&client, &mut view).await.unwrap();

    assert_eq!(snapshot(&view), before);
}

#[tokio::test]
async fn test_error_response_shows_details_without_reload() {
    let server = MockServer::start().await;
    mount_config_listing(&server, 1).await;
    Mock::given(method("POST"))
        .and(path(listing_path(&format!("{}/UpdatePropertyValue", TRACE_REF))))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "bad value",
            "details": "traceLevel must be between 0 and 5"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = AdminClient::from_server_addr(&server.uri()).unwrap();

    let mut view = loaded_config_view(&client).await;
    let mut session = EditSession::new();
    session.open_edit(&view, "traceLevel").unwrap();
    let form = session.form_mut().unwrap();
    form.value = Some(cimadmin_console::EditorValue::Text("9".to_string()));
    form.set_current.set(true);

    let outcome = session.submit(&client, &mut view).await.unwrap();
    assert_eq!(outcome, MutationOutcome::Rejected);
    assert_eq!(
        session.status().indicator,
        Indicator::Failure {
            message: "bad value".to_string(),
            tooltip: "traceLevel must be between 0 and 5".to_string(),
        }
    );
}

#[tokio::test]
async fn test_unchecked_submit_sends_nothing() {
    let server = MockServer::start().await;
    mount_config_listing(&server, 1).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"returnvalue": true})))
        .expect(0)
        .mount(&server)
        .await;
    let client = AdminClient::from_server_addr(&server.uri()).unwrap();

    let mut view = loaded_config_view(&client).await;
    let mut session = EditSession::new();
    session.open_edit(&view, "traceLevel").unwrap();

    let err = session.submit(&client, &mut view).await.unwrap_err();
    assert!(matches!(err, ConsoleError::Validation(_)));
    assert_eq!(session.status().text, CHECK_ONE_MESSAGE);
}

// ============== Provider modules ==============

fn provider_listing() -> Value {
    json!({
        "instances": [
            {
                "self": "modules/OSModule",
                "properties": {"Name": "OSModule", "OperationalStatus": [10]}
            },
            {
                "self": "modules/CIMQueryCapabilitiesModule",
                "properties": {"Name": "CIMQueryCapabilitiesModule", "OperationalStatus": [2]}
            }
        ]
    })
}

async fn mount_provider_listing(server: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(listing_path(cimrs_path::PROVIDER_MODULE_INSTANCES)))
        .respond_with(ResponseTemplate::new(200).set_body_json(provider_listing()))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_start_module_reloads_provider_view() {
    let server = MockServer::start().await;
    mount_provider_listing(&server, 2).await;
    Mock::given(method("POST"))
        .and(path("/cimrs/modules/OSModule/start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"returnvalue": 0})))
        .expect(1)
        .mount(&server)
        .await;
    let client = AdminClient::from_server_addr(&server.uri()).unwrap();

    let mut view: TableView<ProviderModule> = TableView::new();
    view.reload(&client).await;
    assert_eq!(view.table().rows()[1].cells[5].text(), "Stopped");

    let mut control = ModuleControl::new();
    let outcome = view
        .start_module(&client, &mut control, "OSModule")
        .await
        .unwrap();
    assert_eq!(outcome, MutationOutcome::Applied);
    assert!(control.status().is_success());
}

#[tokio::test]
async fn test_start_already_started_module_is_applied() {
    let server = MockServer::start().await;
    mount_provider_listing(&server, 2).await;
    Mock::given(method("POST"))
        .and(path("/cimrs/modules/OSModule/start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"returnvalue": 1})))
        .expect(1)
        .mount(&server)
        .await;
    let client = AdminClient::from_server_addr(&server.uri()).unwrap();

    let mut view: TableView<ProviderModule> = TableView::new();
    view.reload(&client).await;

    let mut control = ModuleControl::new();
    let outcome = view
        .start_module(&client, &mut control, "OSModule")
        .await
        .unwrap();
    assert_eq!(outcome, MutationOutcome::Applied);
    assert!(control.status().is_success());
    assert_eq!(view.table().len(), 2);
}

#[tokio::test]
async fn test_stop_module_with_pending_requests() {
    let server = MockServer::start().await;
    mount_provider_listing(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/cimrs/modules/CIMQueryCapabilitiesModule/stop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"returnvalue": -2})))
        .expect(1)
        .mount(&server)
        .await;
    let client = AdminClient::from_server_addr(&server.uri()).unwrap();

    let mut view: TableView<ProviderModule> = TableView::new();
    view.reload(&client).await;

    let mut control = ModuleControl::new();
    let outcome = view
        .stop_module(&client, &mut control, "CIMQueryCapabilitiesModule")
        .await
        .unwrap();
    assert_eq!(outcome, MutationOutcome::Rejected);
    assert!(matches!(
        &control.status().indicator,
        Indicator::Failure { message, .. } if message == PENDING_REQUESTS_MESSAGE
    ));
}

#[tokio::test]
async fn test_stop_unknown_module() {
    let server = MockServer::start().await;
    let client = AdminClient::from_server_addr(&server.uri()).unwrap();

    let mut view: TableView<ProviderModule> = TableView::new();
    let mut control = ModuleControl::new();
    let err = view
        .stop_module(&client, &mut control, "ghost")
        .await
        .unwrap_err();
    assert!(matches!(err, ConsoleError::UnknownRow(_)));
}
