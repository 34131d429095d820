/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for batteryabn-client tests

use batteryabn_client::{BatteryClient, ClientConfig};
use std::time::Duration;
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server's `/api` prefix
pub fn client_for(server: &MockServer) -> BatteryClient {
    BatteryClient::with_config(ClientConfig {
        base_url: format!("{}/api", server.uri()),
        timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(2),
    })
    .expect("client init")
}

/// Status payload with one queued and one finished job
#[allow(dead_code)]
pub fn sample_status_body() -> serde_json::Value {
    serde_json::json!({
        "queued": [{"id": 1, "enqueued_at": "t1"}],
        "started": [],
        "finished": [{"id": 2, "enqueued_at": "t2"}],
        "failed": []
    })
}
