/*
[INPUT]:  Mock task endpoints
[OUTPUT]: Test results for task enqueue, status, and clear calls
[POS]:    Integration tests - task endpoints
[UPDATE]: When task endpoints change
*/

mod common;

use batteryabn_client::{ClearScope, TaskBucket, TaskId, TaskKind};
use common::{client_for, sample_status_body, setup_mock_server};
use rstest::rstest;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[rstest]
#[case(TaskKind::Update, "/api/tasks/trs/update/CELL_A")]
#[case(TaskKind::Reset, "/api/tasks/trs/reset/CELL_A")]
#[case(TaskKind::Create, "/api/tasks/cell/create/CELL_A")]
#[case(TaskKind::Process, "/api/tasks/cell/process/CELL_A")]
#[tokio::test]
async fn test_enqueue_task_posts_kind_endpoint(#[case] kind: TaskKind, #[case] endpoint: &str) {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path(endpoint))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"message": "Test records update task enqueued."})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .enqueue_task(kind, "CELL_A")
        .await
        .expect("enqueue_task failed");
    assert_eq!(
        response.message.as_deref(),
        Some("Test records update task enqueued.")
    );
}

#[tokio::test]
async fn test_enqueue_project_update() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/tasks/project/update/GMJuly2022"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .enqueue_project_update("GMJuly2022")
        .await
        .expect("enqueue_project_update failed");
}

#[rstest]
#[case(ClearScope::All, "/api/tasks/clear")]
#[case(ClearScope::Finished, "/api/tasks/clear/finished")]
#[case(ClearScope::Failed, "/api/tasks/clear/failed")]
#[tokio::test]
async fn test_clear_tasks_posts_scope_endpoint(#[case] scope: ClearScope, #[case] endpoint: &str) {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .clear_tasks(scope)
        .await
        .expect("clear_tasks failed");
}

#[tokio::test]
async fn test_task_status_buckets_keep_server_order() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "queued": [
                {"id": "c", "enqueued_at": "2024-05-01 10:00:02"},
                {"id": "a", "enqueued_at": "2024-05-01 10:00:00"},
                {"id": "b", "enqueued_at": "2024-05-01 10:00:01"}
            ],
            "started": [{"id": "d", "status": "started", "enqueued_at": "2024-05-01 09:59:00"}],
            "finished": [],
            "failed": [{"id": "e", "status": "failed", "enqueued_at": null}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = client_for(&server)
        .task_status()
        .await
        .expect("task_status failed")
        .expect("snapshot body");

    let queued: Vec<_> = snapshot
        .bucket(TaskBucket::Queued)
        .iter()
        .map(|task| task.id.to_string())
        .collect();
    assert_eq!(queued, ["c", "a", "b"]);
    assert_eq!(snapshot.count(TaskBucket::Started), 1);
    assert_eq!(snapshot.count(TaskBucket::Finished), 0);
    assert_eq!(snapshot.failed[0].enqueued_at, None);
}

#[tokio::test]
async fn test_task_status_sample_snapshot() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_status_body()))
        .mount(&server)
        .await;

    let snapshot = client_for(&server)
        .task_status()
        .await
        .expect("task_status failed")
        .expect("snapshot body");
    assert_eq!(snapshot.queued[0].id, TaskId::Number(1));
    assert_eq!(snapshot.finished[0].id, TaskId::Number(2));
    assert_eq!(snapshot.total(), 2);
}

#[tokio::test]
async fn test_enqueue_failure_is_server_error() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/tasks/trs/update/CELL_A"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .enqueue_task(TaskKind::Update, "CELL_A")
        .await
        .expect_err("500");
    assert_eq!(err.status(), Some(500));
    assert!(!err.is_transport());
}
