/*
[INPUT]:  Mock backend requirements of the dashboard suites
[OUTPUT]: Shared mock server, executor, and payload fixtures
[POS]:    Test infrastructure - shared across dashboard integration tests
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for batteryabn-dashboard tests

#![allow(dead_code)]

use std::time::Duration;

use batteryabn_client::{BatteryClient, ClientConfig};
use batteryabn_dashboard::{BlobStore, Executor};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Executor against the mock server's `/api` prefix, writing blobs into a
/// fresh directory that lives as long as the returned guard
pub fn executor_for(server: &MockServer) -> (Executor, TempDir) {
    let client = BatteryClient::with_config(ClientConfig {
        base_url: format!("{}/api", server.uri()),
        timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(2),
    })
    .expect("client init");
    let dir = tempfile::tempdir().expect("blob dir");
    let blobs = BlobStore::new(dir.path()).expect("blob store");
    (Executor::new(client, blobs), dir)
}

/// Executor whose backend refuses every connection
pub fn unreachable_executor() -> (Executor, TempDir) {
    let client = BatteryClient::with_config(ClientConfig {
        base_url: "http://127.0.0.1:1/api".to_string(),
        timeout: Duration::from_secs(2),
        connect_timeout: Duration::from_secs(1),
    })
    .expect("client init");
    let dir = tempfile::tempdir().expect("blob dir");
    let blobs = BlobStore::new(dir.path()).expect("blob store");
    (Executor::new(client, blobs), dir)
}

/// Serve `body` as JSON for `GET path`
pub async fn mount_get(server: &MockServer, endpoint: &str, status: u16, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Files currently present in a blob directory
pub fn blob_files(dir: &TempDir) -> usize {
    std::fs::read_dir(dir.path())
        .map(|entries| entries.count())
        .unwrap_or(0)
}

/// One queued job (id 1) and one finished job (id 2)
pub fn sample_status_body() -> serde_json::Value {
    serde_json::json!({
        "queued": [{"id": 1, "enqueued_at": "2024-01-01 00:00:00"}],
        "started": [],
        "finished": [{"id": 2, "enqueued_at": "2024-01-01 00:00:01"}],
        "failed": []
    })
}
