/*
[INPUT]:  Target name typed by the operator and the chosen task kind
[OUTPUT]: Enqueue requests and the resulting success or failure notice
[POS]:    View layer - task submission screen
[UPDATE]: When adding task kinds or changing submission feedback
*/

use batteryabn_client::TaskKind;
use tracing::info;

use crate::error::{Notice, ViewError};
use crate::request::{EnqueueTarget, Request, Response};
use crate::route::Route;
use crate::views::Screen;

pub const CELL_NAME_REQUIRED: &str = "Cell name is required";
pub const PROJECT_NAME_REQUIRED: &str = "Project name is required";

/// Task submission screen.
///
/// Every submit with a non-empty target issues exactly one request. There is
/// no retry and no de-duplication; submitting never navigates.
#[derive(Debug, Default)]
pub struct TaskTriggerView {
    target: String,
    notice: Option<Notice>,
    in_flight: usize,
}

impl TaskTriggerView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn set_target(&mut self, target: impl Into<String>) {
        self.target = target.into();
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Enqueue `kind` against the cell named by the current target
    pub fn submit(&mut self, kind: TaskKind) -> Vec<Request> {
        let Some(cell) = self.trimmed_target() else {
            self.notice = Some(Notice::Invalid(CELL_NAME_REQUIRED.to_string()));
            return Vec::new();
        };
        self.dispatch(EnqueueTarget::Cell(kind, cell))
    }

    /// Enqueue a project update for the project named by the current target
    pub fn submit_project_update(&mut self) -> Vec<Request> {
        let Some(project) = self.trimmed_target() else {
            self.notice = Some(Notice::Invalid(PROJECT_NAME_REQUIRED.to_string()));
            return Vec::new();
        };
        self.dispatch(EnqueueTarget::Project(project))
    }

    fn trimmed_target(&self) -> Option<String> {
        let trimmed = self.target.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    fn dispatch(&mut self, target: EnqueueTarget) -> Vec<Request> {
        info!(name = target.name(), "submitting task");
        self.in_flight += 1;
        vec![Request::Enqueue(target)]
    }
}

impl Screen for TaskTriggerView {
    fn route(&self) -> Route {
        Route::TaskTrigger
    }

    fn on_mount(&mut self) -> Vec<Request> {
        Vec::new()
    }

    fn apply(&mut self, response: Response) -> Vec<Request> {
        if let Response::Enqueue(target, outcome) = response {
            self.in_flight = self.in_flight.saturating_sub(1);
            self.notice = Some(match outcome {
                Ok(_) => Notice::Success(target.success_message()),
                Err(err) => Notice::Failure(ViewError::new(target.error_message(), &err)),
            });
        }
        Vec::new()
    }

    fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn render_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Target: {}", self.target)];
        if self.in_flight > 0 {
            lines.push(format!("Submitting ({} pending)", self.in_flight));
        }
        if let Some(notice) = &self.notice {
            lines.push(notice.text().to_string());
            if let Some(detail) = notice.detail() {
                lines.push(detail);
            }
        }
        lines
    }

    fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    fn is_failed(&self) -> bool {
        self.notice.as_ref().is_some_and(Notice::is_error)
    }
}
