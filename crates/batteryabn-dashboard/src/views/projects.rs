/*
[INPUT]:  Project listings, unlisted project names, project detail
[OUTPUT]: Project list, unlisted list (with project update), project detail screens
[POS]:    View layer - project browsing
[UPDATE]: When changing project fields or browse entries
*/

use batteryabn_client::Project;

use crate::error::{Notice, ViewError};
use crate::request::{EnqueueTarget, Request, Response};
use crate::route::Route;
use crate::views::fetch::Fetch;
use crate::views::{Entry, Screen};

#[derive(Debug, Default)]
pub struct ProjectListView {
    projects: Fetch<Vec<Project>>,
}

impl ProjectListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn projects(&self) -> &[Project] {
        self.projects.items()
    }
}

impl Screen for ProjectListView {
    fn route(&self) -> Route {
        Route::Projects
    }

    fn on_mount(&mut self) -> Vec<Request> {
        self.projects.begin();
        vec![Request::Projects]
    }

    fn apply(&mut self, response: Response) -> Vec<Request> {
        if let Response::Projects(outcome) = response {
            self.projects.resolve_list(outcome, "Error fetching projects");
        }
        Vec::new()
    }

    fn notice(&self) -> Option<&Notice> {
        self.projects.notice()
    }

    fn dismiss_notice(&mut self) {
        self.projects.dismiss();
    }

    fn entries(&self) -> Vec<Entry> {
        self.projects()
            .iter()
            .map(|project| {
                Entry::new(project_line(project), Route::Cells(project.project_name.clone()))
                    .with_alternate(Route::Project(project.project_name.clone()))
            })
            .collect()
    }

    fn render_lines(&self) -> Vec<String> {
        match self.projects.placeholder("") {
            Some(line) => vec![line],
            None => self.projects().iter().map(project_line).collect(),
        }
    }

    fn is_loading(&self) -> bool {
        self.projects.is_loading()
    }

    fn is_failed(&self) -> bool {
        self.projects.error().is_some()
    }
}

fn project_line(project: &Project) -> String {
    let mut line = project.project_name.clone();
    if let Some(qmax) = project.qmax {
        line.push_str(&format!("  Qmax: {qmax}"));
    }
    if let Some(i_c20) = project.i_c20 {
        line.push_str(&format!("  I C/20: {i_c20}"));
    }
    line
}

/// Project directories known to the backend but not yet in its database
#[derive(Debug, Default)]
pub struct UnlistedProjectsView {
    names: Fetch<Vec<String>>,
    notice: Option<Notice>,
}

impl UnlistedProjectsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> &[String] {
        self.names.items()
    }

    /// Enqueue a project update for the unlisted project at `index`
    pub fn update_project(&mut self, index: usize) -> Vec<Request> {
        match self.names().get(index) {
            Some(name) => vec![Request::Enqueue(EnqueueTarget::Project(name.clone()))],
            None => Vec::new(),
        }
    }
}

impl Screen for UnlistedProjectsView {
    fn route(&self) -> Route {
        Route::UnlistedProjects
    }

    fn on_mount(&mut self) -> Vec<Request> {
        self.names.begin();
        vec![Request::UnlistedProjects]
    }

    fn apply(&mut self, response: Response) -> Vec<Request> {
        match response {
            Response::UnlistedProjects(outcome) => {
                self.names.resolve_list(outcome, "Error fetching unlisted projects");
            }
            Response::Enqueue(target, outcome) => {
                self.notice = Some(match outcome {
                    Ok(_) => Notice::Success(target.success_message()),
                    Err(err) => Notice::Failure(ViewError::new(target.error_message(), &err)),
                });
            }
            _ => {}
        }
        Vec::new()
    }

    fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref().or_else(|| self.names.notice())
    }

    fn dismiss_notice(&mut self) {
        if self.notice.take().is_none() {
            self.names.dismiss();
        }
    }

    /// Detail of an unlisted project resolves once its update task has run
    fn entries(&self) -> Vec<Entry> {
        self.names()
            .iter()
            .map(|name| Entry::new(name.clone(), Route::Project(name.clone())))
            .collect()
    }

    fn render_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.notice.iter().map(|n| n.text().to_string()).collect();
        match self.names.placeholder("") {
            Some(line) => lines.push(line),
            None => lines.extend(self.names().iter().cloned()),
        }
        lines
    }

    fn is_loading(&self) -> bool {
        self.names.is_loading()
    }

    fn is_failed(&self) -> bool {
        self.names.error().is_some() || self.notice.as_ref().is_some_and(Notice::is_error)
    }
}

#[derive(Debug)]
pub struct ProjectDetailView {
    name: String,
    project: Fetch<Project>,
}

impl ProjectDetailView {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            project: Fetch::default(),
        }
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.loaded()
    }
}

impl Screen for ProjectDetailView {
    fn route(&self) -> Route {
        Route::Project(self.name.clone())
    }

    fn on_mount(&mut self) -> Vec<Request> {
        self.project.begin();
        vec![Request::Project(self.name.clone())]
    }

    fn apply(&mut self, response: Response) -> Vec<Request> {
        if let Response::Project(outcome) = response {
            self.project.resolve_item(outcome, "Error fetching project");
        }
        Vec::new()
    }

    fn notice(&self) -> Option<&Notice> {
        self.project.notice()
    }

    fn dismiss_notice(&mut self) {
        self.project.dismiss();
    }

    fn entries(&self) -> Vec<Entry> {
        if self.project().is_none() {
            return Vec::new();
        }
        vec![Entry::new("Cells", Route::Cells(self.name.clone()))]
    }

    fn render_lines(&self) -> Vec<String> {
        if let Some(line) = self.project.placeholder("Project not found") {
            return vec![line];
        }
        let Some(project) = self.project() else {
            return Vec::new();
        };
        vec![
            format!("Project: {}", project.project_name),
            format!("Qmax: {}", optional_number(project.qmax)),
            format!("I C/20: {}", optional_number(project.i_c20)),
        ]
    }

    fn is_loading(&self) -> bool {
        self.project.is_loading()
    }

    fn is_failed(&self) -> bool {
        self.project.error().is_some()
    }
}

fn optional_number(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |value| value.to_string())
}
