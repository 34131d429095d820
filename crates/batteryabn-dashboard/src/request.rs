/*
[INPUT]:  Requests emitted by screens
[OUTPUT]: Responses carrying typed outcomes back to the issuing screen
[POS]:    Execution layer - maps screen intents onto client calls
[UPDATE]: When adding client operations that screens need
[UPDATE]: 2026-10-05 Store plot blobs as object URLs before handing them back
*/

use batteryabn_client::{
    BatteryClient, Cell, ClearScope, LatestInfo, Project, TaskKind, TaskMessage,
    TaskStatusSnapshot, TestRecord,
};
use futures_util::future::join_all;
use tracing::{debug, info};

use crate::blob::{BlobKind, BlobStore, ObjectUrl};
use crate::error::Outcome;
use crate::scope::MountScope;
use crate::views::Screen;

/// What an enqueue request targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnqueueTarget {
    Cell(TaskKind, String),
    Project(String),
}

impl EnqueueTarget {
    pub fn name(&self) -> &str {
        match self {
            EnqueueTarget::Cell(_, name) | EnqueueTarget::Project(name) => name,
        }
    }

    pub fn success_message(&self) -> String {
        match self {
            EnqueueTarget::Cell(kind, _) => format!("{} task enqueued successfully.", kind.label()),
            EnqueueTarget::Project(_) => "Project update task enqueued successfully.".to_string(),
        }
    }

    pub fn error_message(&self) -> String {
        match self {
            EnqueueTarget::Cell(kind, _) => format!("Error enqueuing {} task", kind.as_str()),
            EnqueueTarget::Project(_) => "Error enqueuing project update task".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    TaskStatus,
    ClearTasks(ClearScope),
    Enqueue(EnqueueTarget),
    Projects,
    UnlistedProjects,
    Project(String),
    CellsByProject(String),
    Cell(String),
    CellSearch(String),
    LatestInfo(String),
    CellImages { cell: String, indices: Vec<usize> },
    CellHtml { cell: String, index: usize },
    TestRecordsByCell(String),
    TestRecord {
        name: String,
        test_type: Option<String>,
    },
    TestRecordSearch(String),
}

#[derive(Debug)]
pub enum Response {
    TaskStatus(Outcome<Option<TaskStatusSnapshot>>),
    ClearTasks(ClearScope, Outcome<TaskMessage>),
    Enqueue(EnqueueTarget, Outcome<TaskMessage>),
    Projects(Outcome<Vec<Project>>),
    UnlistedProjects(Outcome<Vec<String>>),
    Project(Outcome<Project>),
    CellsByProject(Outcome<Vec<Cell>>),
    Cell(Outcome<Cell>),
    CellSearch(String, Outcome<Vec<Cell>>),
    LatestInfo(Outcome<LatestInfo>),
    /// Joined plot images, in request order
    CellImages(Outcome<Vec<ObjectUrl>>),
    CellHtml(Outcome<ObjectUrl>),
    TestRecordsByCell(Outcome<Vec<TestRecord>>),
    TestRecord(Outcome<TestRecord>),
    TestRecordSearch(String, Outcome<Vec<TestRecord>>),
}

/// Performs requests against the backend and stores returned blobs
#[derive(Debug, Clone)]
pub struct Executor {
    client: BatteryClient,
    blobs: BlobStore,
}

impl Executor {
    pub fn new(client: BatteryClient, blobs: BlobStore) -> Self {
        Self { client, blobs }
    }

    pub fn client(&self) -> &BatteryClient {
        &self.client
    }

    pub async fn execute(&self, request: Request) -> Response {
        debug!(?request, "executing request");
        match request {
            Request::TaskStatus => {
                Response::TaskStatus(self.client.task_status().await.map_err(Into::into))
            }
            Request::ClearTasks(scope) => {
                let outcome = self.client.clear_tasks(scope).await.map_err(Into::into);
                Response::ClearTasks(scope, outcome)
            }
            Request::Enqueue(target) => {
                let outcome = match &target {
                    EnqueueTarget::Cell(kind, cell) => self.client.enqueue_task(*kind, cell).await,
                    EnqueueTarget::Project(project) => {
                        self.client.enqueue_project_update(project).await
                    }
                };
                if let Ok(TaskMessage {
                    message: Some(message),
                }) = &outcome
                {
                    info!(name = target.name(), %message, "server acknowledged task");
                }
                Response::Enqueue(target, outcome.map_err(Into::into))
            }
            Request::Projects => {
                Response::Projects(self.client.list_projects().await.map_err(Into::into))
            }
            Request::UnlistedProjects => Response::UnlistedProjects(
                self.client.list_unlisted_projects().await.map_err(Into::into),
            ),
            Request::Project(name) => {
                Response::Project(self.client.get_project(&name).await.map_err(Into::into))
            }
            Request::CellsByProject(project) => Response::CellsByProject(
                self.client
                    .list_cells_by_project(&project)
                    .await
                    .map_err(Into::into),
            ),
            Request::Cell(name) => {
                Response::Cell(self.client.get_cell(&name).await.map_err(Into::into))
            }
            Request::CellSearch(keyword) => {
                let outcome = self.client.search_cells(&keyword).await.map_err(Into::into);
                Response::CellSearch(keyword, outcome)
            }
            Request::LatestInfo(name) => {
                Response::LatestInfo(self.client.get_latest_info(&name).await.map_err(Into::into))
            }
            Request::CellImages { cell, indices } => {
                Response::CellImages(self.cell_images(&cell, &indices).await)
            }
            Request::CellHtml { cell, index } => {
                Response::CellHtml(self.cell_html(&cell, index).await)
            }
            Request::TestRecordsByCell(cell) => Response::TestRecordsByCell(
                self.client
                    .list_test_records_by_cell(&cell)
                    .await
                    .map_err(Into::into),
            ),
            Request::TestRecord { name, test_type } => Response::TestRecord(
                self.client
                    .get_test_record(&name, test_type.as_deref())
                    .await
                    .map_err(Into::into),
            ),
            Request::TestRecordSearch(keyword) => {
                let outcome = self
                    .client
                    .search_test_records(&keyword)
                    .await
                    .map_err(Into::into);
                Response::TestRecordSearch(keyword, outcome)
            }
        }
    }

    /// Execute `request` unless `scope` is left first; `None` means the
    /// request was abandoned.
    pub async fn execute_scoped(&self, scope: &MountScope, request: Request) -> Option<Response> {
        tokio::select! {
            biased;
            _ = scope.cancelled() => {
                debug!(mount = %scope.id(), "request abandoned after unmount");
                None
            }
            response = self.execute(request) => Some(response),
        }
    }

    async fn cell_images(&self, cell: &str, indices: &[usize]) -> Outcome<Vec<ObjectUrl>> {
        let images = self.client.get_cell_images(cell, indices).await?;
        let mut urls = Vec::with_capacity(images.len());
        for (index, bytes) in indices.iter().zip(images) {
            urls.push(
                self.blobs
                    .store(&format!("{cell}-{index}"), BlobKind::Image, &bytes)?,
            );
        }
        Ok(urls)
    }

    async fn cell_html(&self, cell: &str, index: usize) -> Outcome<ObjectUrl> {
        let bytes = self.client.get_cell_html(cell, index).await?;
        Ok(self
            .blobs
            .store(&format!("{cell}-{index}"), BlobKind::Html, &bytes)?)
    }
}

/// Run a screen to quiescence without a UI: execute its requests, apply the
/// responses in request order, and repeat for whatever follow-up requests the
/// screen emits.
pub async fn drive<S: Screen>(screen: &mut S, executor: &Executor, mut requests: Vec<Request>) {
    while !requests.is_empty() {
        let responses = join_all(requests.drain(..).map(|request| executor.execute(request))).await;
        for response in responses {
            requests.extend(screen.apply(response));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enqueue_messages() {
        let target = EnqueueTarget::Cell(TaskKind::Update, "CELL_A".to_string());
        assert_eq!(target.success_message(), "Update task enqueued successfully.");
        assert_eq!(target.error_message(), "Error enqueuing update task");
        assert_eq!(target.name(), "CELL_A");

        let target = EnqueueTarget::Project("GMJuly2022".to_string());
        assert_eq!(
            target.success_message(),
            "Project update task enqueued successfully."
        );
        assert_eq!(target.error_message(), "Error enqueuing project update task");
    }
}
