/*
[INPUT]:  Dashboard config, request executor, log buffer, responses from spawned requests
[OUTPUT]: AppState: tabs, route stack, the mounted screen, selection, and text input
[POS]:    TUI app state and navigation
[UPDATE]: 2026-10-07 Replace the task manager state with routed screens
[UPDATE]: 2026-10-08 Add alternate navigation for cell test records
*/

use std::time::Instant;

use batteryabn_client::{ClearScope, TaskKind};
use batteryabn_dashboard::{
    DashboardConfig, Entry, Executor, MountId, Mounted, Request, Response, Route, RouteStack,
    Screen, View,
};
use ratatui::widgets::ListState;
use tokio::sync::mpsc;
use tracing::debug;
use tui_input::{Input, InputRequest};

use crate::tui::LogBufferHandle;
use crate::tui::runtime::UiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Tab {
    Projects,
    Unlisted,
    Cells,
    TestRecords,
    Tasks,
    Status,
    Logs,
}

impl Tab {
    pub(super) const ALL: [Tab; 7] = [
        Tab::Projects,
        Tab::Unlisted,
        Tab::Cells,
        Tab::TestRecords,
        Tab::Tasks,
        Tab::Status,
        Tab::Logs,
    ];

    pub(super) fn title(&self) -> &'static str {
        match self {
            Tab::Projects => "Projects",
            Tab::Unlisted => "Unlisted",
            Tab::Cells => "Cells",
            Tab::TestRecords => "Test Records",
            Tab::Tasks => "Tasks",
            Tab::Status => "Status",
            Tab::Logs => "Logs",
        }
    }

    pub(super) fn index(&self) -> usize {
        Tab::ALL.iter().position(|tab| tab == self).unwrap_or(0)
    }

    /// Root route of the tab; the Logs tab shows no screen
    pub(super) fn root(&self) -> Option<Route> {
        match self {
            Tab::Projects => Some(Route::Projects),
            Tab::Unlisted => Some(Route::UnlistedProjects),
            Tab::Cells => Some(Route::CellSearch),
            Tab::TestRecords => Some(Route::TestRecordSearch),
            Tab::Tasks => Some(Route::TaskTrigger),
            Tab::Status => Some(Route::TaskStatus),
            Tab::Logs => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum InputMode {
    Normal,
    Editing,
}

pub(super) struct AppState {
    pub(super) config: DashboardConfig,
    pub(super) log_buffer: LogBufferHandle,
    pub(super) current_tab: Tab,
    pub(super) routes: RouteStack,
    pub(super) current: Mounted<View>,
    pub(super) list_state: ListState,
    pub(super) input: Input,
    pub(super) input_mode: InputMode,
    pub(super) status_message: String,
    pub(super) last_status_refresh: Instant,
    executor: Executor,
    events: mpsc::UnboundedSender<UiEvent>,
}

impl AppState {
    pub(super) fn new(
        config: DashboardConfig,
        executor: Executor,
        log_buffer: LogBufferHandle,
        events: mpsc::UnboundedSender<UiEvent>,
    ) -> Self {
        let root = Route::Projects;
        let (current, requests) = Mounted::mount(View::for_route(&root, config.image_count));
        let app = Self {
            config,
            log_buffer,
            current_tab: Tab::Projects,
            routes: RouteStack::new(root),
            current,
            list_state: ListState::default(),
            input: Input::default(),
            input_mode: InputMode::Normal,
            status_message: "Ready".to_string(),
            last_status_refresh: Instant::now(),
            executor,
            events,
        };
        app.dispatch(requests);
        app
    }

    pub(super) fn screen(&self) -> &View {
        self.current.screen()
    }

    /// Spawn `requests` under the current mount scope
    pub(super) fn dispatch(&self, requests: Vec<Request>) {
        for request in requests {
            let executor = self.executor.clone();
            let scope = self.current.scope().clone();
            let events = self.events.clone();
            tokio::spawn(async move {
                let mount = scope.id();
                if let Some(response) = executor.execute_scoped(&scope, request).await {
                    let _ = events.send(UiEvent::Response { mount, response });
                }
            });
        }
    }

    pub(super) fn apply_response(&mut self, mount: MountId, response: Response) {
        if let Some(requests) = self.current.accept(mount, response) {
            self.dispatch(requests);
            self.clamp_selection();
        }
    }

    fn mount(&mut self, route: &Route) {
        // replacing `current` drops the previous screen and cancels its scope
        let (mounted, requests) = Mounted::mount(View::for_route(route, self.config.image_count));
        self.current = mounted;
        self.list_state = ListState::default();
        self.input_mode = InputMode::Normal;
        self.input = Input::new(self.seed_input());
        if matches!(route, Route::TaskStatus) {
            self.last_status_refresh = Instant::now();
        }
        self.status_message = route.title();
        self.dispatch(requests);
        self.clamp_selection();
    }

    fn seed_input(&self) -> String {
        match self.screen() {
            View::TaskTrigger(view) => view.target().to_string(),
            View::CellSearch(view) => view.keyword().to_string(),
            View::TestRecordSearch(view) => view.keyword().to_string(),
            _ => String::new(),
        }
    }

    pub(super) fn navigate(&mut self, route: Route) {
        debug!(route = %route, "navigate");
        self.routes.push(route.clone());
        self.mount(&route);
    }

    pub(super) fn back(&mut self) {
        if let Some(route) = self.routes.pop().cloned() {
            self.mount(&route);
        }
    }

    pub(super) fn set_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
        if let Some(root) = tab.root() {
            self.routes.reset(root.clone());
            self.mount(&root);
        }
    }

    pub(super) fn next_tab(&mut self) {
        let next = Tab::ALL[(self.current_tab.index() + 1) % Tab::ALL.len()];
        self.set_tab(next);
    }

    pub(super) fn previous_tab(&mut self) {
        let len = Tab::ALL.len();
        let previous = Tab::ALL[(self.current_tab.index() + len - 1) % len];
        self.set_tab(previous);
    }

    pub(super) fn refresh(&mut self) {
        let requests = self.current.screen_mut().refresh();
        if matches!(self.screen(), View::TaskStatus(_)) {
            self.last_status_refresh = Instant::now();
        }
        self.dispatch(requests);
    }

    pub(super) fn dismiss_notice(&mut self) {
        self.current.screen_mut().dismiss_notice();
    }

    pub(super) fn entries(&self) -> Vec<Entry> {
        self.screen().entries()
    }

    pub(super) fn open_selected(&mut self, alternate: bool) {
        let Some(index) = self.list_state.selected() else {
            return;
        };
        let Some(entry) = self.entries().into_iter().nth(index) else {
            return;
        };
        let route = if alternate { entry.alternate } else { Some(entry.route) };
        if let Some(route) = route {
            self.navigate(route);
        }
    }

    pub(super) fn move_selection(&mut self, delta: isize) {
        let len = self.entries().len();
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, (len - 1) as isize) as usize;
        self.list_state.select(Some(next));
    }

    fn clamp_selection(&mut self) {
        let len = self.entries().len();
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            None => self.list_state.select(Some(0)),
            Some(selected) if selected >= len => self.list_state.select(Some(len - 1)),
            Some(_) => {}
        }
    }

    pub(super) fn accepts_input(&self) -> bool {
        matches!(
            self.screen(),
            View::TaskTrigger(_) | View::CellSearch(_) | View::TestRecordSearch(_)
        )
    }

    pub(super) fn start_editing(&mut self) {
        if self.accepts_input() {
            self.input_mode = InputMode::Editing;
        }
    }

    pub(super) fn edit(&mut self, request: InputRequest) {
        self.input.handle(request);
    }

    pub(super) fn cancel_editing(&mut self) {
        self.input = Input::new(self.seed_input());
        self.input_mode = InputMode::Normal;
    }

    /// Commit the text input to the current screen
    pub(super) fn commit_input(&mut self) {
        self.input_mode = InputMode::Normal;
        let value = self.input.value().to_string();
        let requests = match self.current.screen_mut() {
            View::TaskTrigger(view) => {
                view.set_target(value);
                Vec::new()
            }
            View::CellSearch(view) => view.search(&value),
            View::TestRecordSearch(view) => view.search(&value),
            _ => Vec::new(),
        };
        self.dispatch(requests);
        self.clamp_selection();
    }

    pub(super) fn trigger(&mut self, kind: TaskKind) {
        let requests = match self.current.screen_mut() {
            View::TaskTrigger(view) => view.submit(kind),
            _ => return,
        };
        self.dispatch(requests);
    }

    pub(super) fn trigger_project_update(&mut self) {
        let selected = self.list_state.selected();
        let requests = match self.current.screen_mut() {
            View::TaskTrigger(view) => view.submit_project_update(),
            View::UnlistedProjects(view) => match selected {
                Some(index) => view.update_project(index),
                None => return,
            },
            _ => return,
        };
        self.dispatch(requests);
    }

    pub(super) fn clear_tasks(&mut self, scope: ClearScope) {
        let requests = match self.current.screen_mut() {
            View::TaskStatus(view) => view.clear(scope),
            _ => return,
        };
        self.dispatch(requests);
    }

    /// Periodic refresh of the status screen when configured
    pub(super) fn tick(&mut self) {
        let Some(interval) = self.config.status_refresh() else {
            return;
        };
        let on_status = matches!(self.screen(), View::TaskStatus(_));
        if on_status
            && !self.screen().is_loading()
            && self.last_status_refresh.elapsed() >= interval
        {
            self.refresh();
        }
    }
}
