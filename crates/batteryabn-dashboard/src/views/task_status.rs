/*
[INPUT]:  Task status snapshots and clear acknowledgements
[OUTPUT]: Four-bucket status rendering, clear requests, clear notices
[POS]:    View layer - task lifecycle screen
[UPDATE]: When changing bucket rendering or clear behaviour
[UPDATE]: 2026-10-06 Set the clear notice before the follow-up refresh lands
[UPDATE]: 2026-10-16 Status fetch failures are dismissible
*/

use batteryabn_client::{ClearScope, TaskBucket, TaskRecord, TaskStatusSnapshot};
use tracing::debug;

use crate::error::{Notice, ViewError};
use crate::request::{Request, Response};
use crate::route::Route;
use crate::views::Screen;

pub const STATUS_FETCH_ERROR: &str = "Error fetching task status";

#[derive(Debug, Default)]
pub enum StatusState {
    #[default]
    Idle,
    Loading,
    Loaded(TaskStatusSnapshot),
    /// Server answered with a null body
    Empty,
    /// Always a `Notice::Failure`
    Failed(Notice),
}

/// Task status screen.
///
/// Responses are applied in arrival order; the last one wins. Every clear,
/// successful or not, is followed by exactly one refresh.
#[derive(Debug, Default)]
pub struct TaskStatusView {
    state: StatusState,
    notice: Option<Notice>,
}

impl TaskStatusView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &StatusState {
        &self.state
    }

    pub fn snapshot(&self) -> Option<&TaskStatusSnapshot> {
        match &self.state {
            StatusState::Loaded(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn count(&self, bucket: TaskBucket) -> usize {
        self.snapshot().map_or(0, |snapshot| snapshot.count(bucket))
    }

    /// Rendered rows of one bucket, in server order
    pub fn rows(&self, bucket: TaskBucket) -> Vec<String> {
        self.snapshot()
            .map(|snapshot| snapshot.bucket(bucket).iter().map(format_row).collect())
            .unwrap_or_default()
    }

    pub fn clear(&mut self, scope: ClearScope) -> Vec<Request> {
        debug!(scope = %scope, "clear requested");
        vec![Request::ClearTasks(scope)]
    }

    fn fetch(&mut self) -> Vec<Request> {
        self.state = StatusState::Loading;
        vec![Request::TaskStatus]
    }
}

impl Screen for TaskStatusView {
    fn route(&self) -> Route {
        Route::TaskStatus
    }

    fn on_mount(&mut self) -> Vec<Request> {
        self.fetch()
    }

    fn apply(&mut self, response: Response) -> Vec<Request> {
        match response {
            Response::TaskStatus(outcome) => {
                self.state = match outcome {
                    Ok(Some(snapshot)) => StatusState::Loaded(snapshot),
                    Ok(None) => StatusState::Empty,
                    Err(err) if err.is_not_found() => StatusState::Empty,
                    Err(err) => StatusState::Failed(Notice::Failure(ViewError::new(
                        STATUS_FETCH_ERROR,
                        &err,
                    ))),
                };
                Vec::new()
            }
            Response::ClearTasks(scope, outcome) => {
                self.notice = Some(match outcome {
                    Ok(_) => Notice::Success(clear_success(scope)),
                    Err(err) => Notice::Failure(ViewError::new(clear_error(scope), &err)),
                });
                self.fetch()
            }
            _ => Vec::new(),
        }
    }

    /// Clear notice first, then a failed status fetch
    fn notice(&self) -> Option<&Notice> {
        match &self.state {
            StatusState::Failed(failure) => self.notice.as_ref().or(Some(failure)),
            _ => self.notice.as_ref(),
        }
    }

    fn dismiss_notice(&mut self) {
        if self.notice.take().is_none() && matches!(self.state, StatusState::Failed(_)) {
            self.state = StatusState::Idle;
        }
    }

    fn render_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(notice) = &self.notice {
            lines.push(notice.text().to_string());
        }
        match &self.state {
            StatusState::Idle => {}
            StatusState::Loading => lines.push("Loading...".to_string()),
            StatusState::Empty => lines.push("No task status available".to_string()),
            StatusState::Failed(failure) => {
                lines.push(failure.text().to_string());
                lines.extend(failure.detail());
            }
            StatusState::Loaded(snapshot) => {
                for bucket in TaskBucket::ALL {
                    lines.push(format!("{} ({})", bucket.heading(), snapshot.count(bucket)));
                    lines.extend(snapshot.bucket(bucket).iter().map(format_row));
                }
            }
        }
        lines
    }

    fn is_loading(&self) -> bool {
        matches!(self.state, StatusState::Loading)
    }

    fn is_failed(&self) -> bool {
        matches!(self.state, StatusState::Failed(_))
            || self.notice.as_ref().is_some_and(Notice::is_error)
    }
}

pub fn format_row(task: &TaskRecord) -> String {
    let enqueued_at = task.enqueued_at.as_deref().unwrap_or("-");
    match task.description.as_deref() {
        Some(description) => format!(
            "Task ID: {}, Description: {description}, Enqueued At: {enqueued_at}",
            task.id
        ),
        None => format!("Task ID: {}, Enqueued At: {enqueued_at}", task.id),
    }
}

fn clear_success(scope: ClearScope) -> String {
    match scope {
        ClearScope::All => "All tasks cleared successfully.",
        ClearScope::Finished => "Finished tasks cleared successfully.",
        ClearScope::Failed => "Failed tasks cleared successfully.",
    }
    .to_string()
}

fn clear_error(scope: ClearScope) -> String {
    format!("Error clearing {} tasks", scope.as_str())
}
