/*
[INPUT]:  Routes chosen by navigation and responses from the executor
[OUTPUT]: Screen trait, per-route screen state, and the View dispatcher
[POS]:    View layer root - one fresh screen per navigation
[UPDATE]: When adding screens or new Screen capabilities
*/

pub mod cells;
pub mod fetch;
pub mod projects;
pub mod task_status;
pub mod task_trigger;
pub mod test_records;

pub use cells::{CellDetailView, CellListView, CellPlotView, CellSearchView};
pub use fetch::Fetch;
pub use projects::{ProjectDetailView, ProjectListView, UnlistedProjectsView};
pub use task_status::{StatusState, TaskStatusView};
pub use task_trigger::TaskTriggerView;
pub use test_records::{TestRecordDetailView, TestRecordListView, TestRecordSearchView};

use crate::error::Notice;
use crate::request::{Request, Response};
use crate::route::Route;

pub const SEARCH_KEYWORD_REQUIRED: &str = "Search keyword is required";

/// Selectable row that navigates somewhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub label: String,
    pub route: Route,
    /// Secondary target, e.g. a cell's test records
    pub alternate: Option<Route>,
}

impl Entry {
    pub fn new(label: impl Into<String>, route: Route) -> Self {
        Self {
            label: label.into(),
            route,
            alternate: None,
        }
    }

    pub fn with_alternate(mut self, route: Route) -> Self {
        self.alternate = Some(route);
        self
    }
}

/// State of one screen.
///
/// Screens never perform I/O: they emit requests and absorb responses.
pub trait Screen {
    fn route(&self) -> Route;

    /// Requests to issue when the screen is mounted
    fn on_mount(&mut self) -> Vec<Request>;

    fn refresh(&mut self) -> Vec<Request> {
        self.on_mount()
    }

    /// Absorb a response; returns follow-up requests
    fn apply(&mut self, response: Response) -> Vec<Request>;

    fn notice(&self) -> Option<&Notice> {
        None
    }

    fn dismiss_notice(&mut self) {}

    fn entries(&self) -> Vec<Entry> {
        Vec::new()
    }

    /// Plain-text rendering, one line per row
    fn render_lines(&self) -> Vec<String>;

    fn is_loading(&self) -> bool;

    fn is_failed(&self) -> bool;
}

#[derive(Debug)]
pub enum View {
    Projects(ProjectListView),
    UnlistedProjects(UnlistedProjectsView),
    Project(ProjectDetailView),
    Cells(CellListView),
    CellSearch(CellSearchView),
    Cell(CellDetailView),
    CellPlot(CellPlotView),
    TestRecords(TestRecordListView),
    TestRecordSearch(TestRecordSearchView),
    TestRecord(TestRecordDetailView),
    TaskTrigger(TaskTriggerView),
    TaskStatus(TaskStatusView),
}

impl View {
    /// Fresh screen for `route`
    pub fn for_route(route: &Route, image_count: usize) -> Self {
        match route {
            Route::Projects => View::Projects(ProjectListView::new()),
            Route::UnlistedProjects => View::UnlistedProjects(UnlistedProjectsView::new()),
            Route::Project(name) => View::Project(ProjectDetailView::new(name.clone())),
            Route::Cells(project) => View::Cells(CellListView::new(project.clone())),
            Route::CellSearch => View::CellSearch(CellSearchView::new()),
            Route::Cell(name) => View::Cell(CellDetailView::new(name.clone(), image_count)),
            Route::CellPlot { cell, index } => View::CellPlot(CellPlotView::new(cell.clone(), *index)),
            Route::TestRecords(cell) => View::TestRecords(TestRecordListView::new(cell.clone())),
            Route::TestRecordSearch => View::TestRecordSearch(TestRecordSearchView::new()),
            Route::TestRecord { name, test_type } => {
                View::TestRecord(TestRecordDetailView::new(name.clone(), test_type.clone()))
            }
            Route::TaskTrigger => View::TaskTrigger(TaskTriggerView::new()),
            Route::TaskStatus => View::TaskStatus(TaskStatusView::new()),
        }
    }
}

macro_rules! delegate {
    ($self:ident, $screen:ident => $body:expr) => {
        match $self {
            View::Projects($screen) => $body,
            View::UnlistedProjects($screen) => $body,
            View::Project($screen) => $body,
            View::Cells($screen) => $body,
            View::CellSearch($screen) => $body,
            View::Cell($screen) => $body,
            View::CellPlot($screen) => $body,
            View::TestRecords($screen) => $body,
            View::TestRecordSearch($screen) => $body,
            View::TestRecord($screen) => $body,
            View::TaskTrigger($screen) => $body,
            View::TaskStatus($screen) => $body,
        }
    };
}

impl Screen for View {
    fn route(&self) -> Route {
        delegate!(self, screen => screen.route())
    }

    fn on_mount(&mut self) -> Vec<Request> {
        delegate!(self, screen => screen.on_mount())
    }

    fn refresh(&mut self) -> Vec<Request> {
        delegate!(self, screen => screen.refresh())
    }

    fn apply(&mut self, response: Response) -> Vec<Request> {
        delegate!(self, screen => screen.apply(response))
    }

    fn notice(&self) -> Option<&Notice> {
        delegate!(self, screen => screen.notice())
    }

    fn dismiss_notice(&mut self) {
        delegate!(self, screen => screen.dismiss_notice())
    }

    fn entries(&self) -> Vec<Entry> {
        delegate!(self, screen => screen.entries())
    }

    fn render_lines(&self) -> Vec<String> {
        delegate!(self, screen => screen.render_lines())
    }

    fn is_loading(&self) -> bool {
        delegate!(self, screen => screen.is_loading())
    }

    fn is_failed(&self) -> bool {
        delegate!(self, screen => screen.is_failed())
    }
}
