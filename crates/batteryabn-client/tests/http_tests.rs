/*
[INPUT]:  Mock HTTP responses
[OUTPUT]: Test results for HTTP client
[POS]:    Integration tests - HTTP endpoints
[UPDATE]: When HTTP endpoints change
*/

mod common;

use std::time::Duration;

use batteryabn_client::{BatteryClient, ClientConfig, ClientError, DEFAULT_BASE_URL};
use common::{client_for, setup_mock_server};
use tokio_test::assert_ok;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn test_client_creation() {
    let client = assert_ok!(BatteryClient::new());
    assert_eq!(client.base_url().as_str(), DEFAULT_BASE_URL);
}

#[test]
fn test_client_with_config() {
    let config = ClientConfig {
        base_url: "http://lab.local:8080/api/".to_string(),
        ..ClientConfig::default()
    };
    let client = assert_ok!(BatteryClient::with_config(config));
    assert_eq!(client.base_url().host_str(), Some("lab.local"));
}

#[test]
fn test_client_rejects_garbage_url() {
    let config = ClientConfig {
        base_url: "not a url".to_string(),
        ..ClientConfig::default()
    };
    let err = BatteryClient::with_config(config).expect_err("garbage url");
    assert!(matches!(err, ClientError::UrlParse(_)));
}

#[tokio::test]
async fn test_list_unlisted_projects_decodes_names() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/unlisted"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!(["GMJuly2022", "NEW_PROJECT"])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let names = assert_ok!(client_for(&server).list_unlisted_projects().await);
    assert_eq!(names, vec!["GMJuly2022".to_string(), "NEW_PROJECT".to_string()]);
}

#[tokio::test]
async fn test_server_error_keeps_status_and_message() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(serde_json::json!({"error": "db down"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).list_projects().await.expect_err("503");
    match err {
        ClientError::Server { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "db down");
        }
        other => panic!("expected Server error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/cells/CELL_A"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html/>", "text/html"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_cell("CELL_A").await.expect_err("decode");
    assert!(matches!(err, ClientError::Decode(_)));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_timeout_is_reported() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = assert_ok!(BatteryClient::with_config(ClientConfig {
        base_url: format!("{}/api", server.uri()),
        timeout: Duration::from_millis(200),
        connect_timeout: Duration::from_millis(200),
    }));

    let err = client.task_status().await.expect_err("timeout");
    assert!(matches!(err, ClientError::Timeout { .. }));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let client = assert_ok!(BatteryClient::with_config(ClientConfig {
        base_url: "http://127.0.0.1:1/api".to_string(),
        timeout: Duration::from_secs(2),
        connect_timeout: Duration::from_secs(1),
    }));

    let err = client.list_projects().await.expect_err("nothing listens on port 1");
    assert!(err.is_transport());
    assert_eq!(err.status(), None);
}
