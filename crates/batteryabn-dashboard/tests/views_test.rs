/*
[INPUT]:  Mock read endpoints and the list, search, and detail screens
[OUTPUT]: Test results for empty results, search, late responses, and object URLs
[POS]:    Integration tests - browsing screens
[UPDATE]: When list or detail screens change
*/

mod common;

use batteryabn_dashboard::views::{
    CellDetailView, CellListView, CellPlotView, CellSearchView, ProjectDetailView,
    ProjectListView, TestRecordListView, TestRecordSearchView,
};
use batteryabn_dashboard::{drive, ErrorCategory, Mounted, Notice, Route, Screen, View};
use common::{blob_files, executor_for, mount_get, setup_mock_server, unreachable_executor};
use tokio_test::assert_ok;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn cells_body() -> serde_json::Value {
    serde_json::json!([
        {"cell_name": "CELL_A", "project_name": "GMJuly2022"},
        {"cell_name": "CELL_B", "project_name": "GMJuly2022"}
    ])
}

#[tokio::test]
async fn test_repeated_search_renders_identically() {
    let server = setup_mock_server().await;
    mount_get(&server, "/api/cells/search/CELL", 200, cells_body()).await;
    let (executor, _blobs) = executor_for(&server);

    let mut view = CellSearchView::with_keyword("CELL");
    let requests = view.on_mount();
    drive(&mut view, &executor, requests).await;
    let first = view.render_lines();

    let requests = view.search("CELL");
    drive(&mut view, &executor, requests).await;
    let second = view.render_lines();

    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
    assert_eq!(view.entries().len(), 2);
    assert_eq!(view.entries()[0].route, Route::Cell("CELL_A".to_string()));
}

#[tokio::test]
async fn test_empty_list_renders_zero_rows() {
    let server = setup_mock_server().await;
    mount_get(&server, "/api/cells/project/EMPTY", 200, serde_json::json!([])).await;
    let (executor, _blobs) = executor_for(&server);

    let mut view = CellListView::new("EMPTY");
    let requests = view.on_mount();
    drive(&mut view, &executor, requests).await;

    assert!(view.render_lines().is_empty());
    assert!(view.entries().is_empty());
    assert!(!view.is_failed());
    assert!(!view.is_loading());
}

#[tokio::test]
async fn test_not_found_list_is_empty_not_error() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/trs/cell/NOPE"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let (executor, _blobs) = executor_for(&server);

    let mut view = TestRecordListView::new("NOPE");
    let requests = view.on_mount();
    drive(&mut view, &executor, requests).await;

    assert!(view.render_lines().is_empty());
    assert!(!view.is_failed());
}

#[tokio::test]
async fn test_not_found_detail_renders_missing() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/NOPE"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let (executor, _blobs) = executor_for(&server);

    let mut view = ProjectDetailView::new("NOPE");
    let requests = view.on_mount();
    drive(&mut view, &executor, requests).await;

    assert_eq!(view.render_lines(), vec!["Project not found".to_string()]);
    assert!(view.entries().is_empty());
    assert!(!view.is_failed());
}

#[tokio::test]
async fn test_list_server_error_fails_in_isolation() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_get(&server, "/api/trs/search/TR", 200, serde_json::json!([])).await;
    let (executor, _blobs) = executor_for(&server);

    let mut projects = ProjectListView::new();
    let requests = projects.on_mount();
    drive(&mut projects, &executor, requests).await;
    assert!(projects.is_failed());
    assert_eq!(
        projects.render_lines(),
        vec!["Error fetching projects (Server responded with 500)".to_string()]
    );

    let mut records = TestRecordSearchView::with_keyword("TR");
    let requests = records.on_mount();
    drive(&mut records, &executor, requests).await;
    assert!(!records.is_failed());
}

#[tokio::test]
async fn test_list_read_failure_is_dismissible() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let (executor, _blobs) = executor_for(&server);

    let mut view = View::for_route(&Route::Projects, 3);
    let requests = view.on_mount();
    drive(&mut view, &executor, requests).await;

    let notice = view.notice().expect("read failure notice");
    assert_eq!(notice.text(), "Error fetching projects");
    assert_eq!(notice.detail().as_deref(), Some("Server responded with 500"));
    assert!(notice.is_error());

    view.dismiss_notice();
    assert!(view.notice().is_none());
    assert!(!view.is_failed());
    assert!(view.render_lines().iter().all(String::is_empty));
}

#[tokio::test]
async fn test_detail_read_failure_is_dismissible() {
    let (executor, _blobs) = unreachable_executor();

    let mut view = ProjectDetailView::new("GMJuly2022");
    let requests = view.on_mount();
    drive(&mut view, &executor, requests).await;
    assert_eq!(
        view.notice().and_then(Notice::detail).as_deref(),
        Some("Could not reach the server")
    );

    view.dismiss_notice();
    assert!(view.notice().is_none());
    assert!(!view.is_failed());
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let (executor, _blobs) = unreachable_executor();

    let mut view = ProjectListView::new();
    let requests = view.on_mount();
    drive(&mut view, &executor, requests).await;

    assert!(view.is_failed());
    assert!(view.render_lines()[0].contains("Could not reach the server"));
}

#[tokio::test]
async fn test_late_response_after_navigation_is_discarded() {
    let server = setup_mock_server().await;
    mount_get(&server, "/api/cells/project/GMJuly2022", 200, cells_body()).await;
    mount_get(&server, "/api/projects/", 200, serde_json::json!([])).await;
    let (executor, _blobs) = executor_for(&server);

    let (cells, requests) =
        Mounted::mount(View::for_route(&Route::Cells("GMJuly2022".to_string()), 3));
    let cells_mount = cells.id();
    let cells_scope = cells.scope().clone();
    let response = executor.execute(requests[0].clone()).await;

    drop(cells);
    assert!(!cells_scope.is_active());
    assert!(executor
        .execute_scoped(&cells_scope, requests[0].clone())
        .await
        .is_none());

    let (mut projects, _) = Mounted::mount(View::for_route(&Route::Projects, 3));
    assert!(projects.id() > cells_mount);
    assert!(projects.accept(cells_mount, response).is_none());
    assert!(projects.screen().is_loading());
}

#[tokio::test]
async fn test_plot_document_removed_with_screen() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/cells/CELL_A/htmls/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>plot</html>"))
        .mount(&server)
        .await;
    let (executor, blobs) = executor_for(&server);

    let mut view = CellPlotView::new("CELL_A", 1);
    let requests = view.on_mount();
    drive(&mut view, &executor, requests).await;

    let document = view.document().expect("document");
    let file = document.path().to_path_buf();
    assert_eq!(document.url().scheme(), "file");
    assert_eq!(document.len(), "<html>plot</html>".len());
    assert_eq!(assert_ok!(std::fs::read_to_string(&file)), "<html>plot</html>");

    drop(view);
    assert!(!file.exists());
    assert_eq!(blob_files(&blobs), 0);
}

#[tokio::test]
async fn test_cell_images_join_all_or_nothing() {
    let server = setup_mock_server().await;
    mount_get(
        &server,
        "/api/cells/CELL_A",
        200,
        serde_json::json!({"cell_name": "CELL_A", "project_name": "GMJuly2022"}),
    )
    .await;
    mount_get(
        &server,
        "/api/cells/CELL_A/info/latest",
        200,
        serde_json::json!({"Test Name": "TR_01", "Cycle": 12}),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/cells/CELL_A/images/0"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x89, b'P', b'N', b'G']))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/cells/CELL_A/images/1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let (executor, blobs) = executor_for(&server);

    let mut view = CellDetailView::new("CELL_A", 2);
    let requests = view.on_mount();
    assert_eq!(requests.len(), 3);
    drive(&mut view, &executor, requests).await;

    assert!(view.cell().is_some());
    assert_eq!(view.latest().map(|info| info.len()), Some(2));
    assert!(view.images().is_empty());
    let err = view.images_state().error().expect("images failed");
    assert_eq!(err.category(), ErrorCategory::Server);
    assert!(view.is_failed());
    assert_eq!(blob_files(&blobs), 0);
}

#[tokio::test]
async fn test_cell_images_released_on_navigation() {
    let server = setup_mock_server().await;
    mount_get(
        &server,
        "/api/cells/CELL_A",
        200,
        serde_json::json!({"cell_name": "CELL_A"}),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/cells/CELL_A/info/latest"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    for index in 0..2 {
        Mock::given(method("GET"))
            .and(path(format!("/api/cells/CELL_A/images/{index}")))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![index as u8; 8]))
            .mount(&server)
            .await;
    }
    let (executor, blobs) = executor_for(&server);

    let (mut mounted, requests) = Mounted::mount(CellDetailView::new("CELL_A", 2));
    drive(mounted.screen_mut(), &executor, requests).await;

    assert_eq!(mounted.screen().images().len(), 2);
    assert_eq!(blob_files(&blobs), 2);
    assert!(mounted
        .screen()
        .render_lines()
        .contains(&"  No test data yet".to_string()));
    assert!(!mounted.screen().is_failed());

    drop(mounted);
    assert_eq!(blob_files(&blobs), 0);
}
