/*
[INPUT]:  Cell listings, search results, cell detail, latest info, plot blobs
[OUTPUT]: Cell list, cell search, cell detail, and plot detail screens
[POS]:    View layer - cell browsing
[UPDATE]: When changing cell detail composition or plot handling
[UPDATE]: 2026-10-05 Hold plot blobs as object URLs owned by the screen
*/

use batteryabn_client::{Cell, LatestInfo};

use crate::blob::ObjectUrl;
use crate::error::Notice;
use crate::request::{Request, Response};
use crate::route::Route;
use crate::views::fetch::Fetch;
use crate::views::{Entry, Screen, SEARCH_KEYWORD_REQUIRED};

fn cell_entry(cell: &Cell) -> Entry {
    let label = match &cell.project_name {
        Some(project) => format!("{}  ({project})", cell.cell_name),
        None => cell.cell_name.clone(),
    };
    Entry::new(label, Route::Cell(cell.cell_name.clone()))
        .with_alternate(Route::TestRecords(cell.cell_name.clone()))
}

fn list_lines(cells: &Fetch<Vec<Cell>>) -> Vec<String> {
    match cells.placeholder("") {
        Some(line) => vec![line],
        None => cells.items().iter().map(|cell| cell_entry(cell).label).collect(),
    }
}

/// Cells of one project
#[derive(Debug)]
pub struct CellListView {
    project: String,
    cells: Fetch<Vec<Cell>>,
}

impl CellListView {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            cells: Fetch::default(),
        }
    }

    pub fn cells(&self) -> &[Cell] {
        self.cells.items()
    }
}

impl Screen for CellListView {
    fn route(&self) -> Route {
        Route::Cells(self.project.clone())
    }

    fn on_mount(&mut self) -> Vec<Request> {
        self.cells.begin();
        vec![Request::CellsByProject(self.project.clone())]
    }

    fn apply(&mut self, response: Response) -> Vec<Request> {
        if let Response::CellsByProject(outcome) = response {
            self.cells.resolve_list(outcome, "Error fetching cells");
        }
        Vec::new()
    }

    fn notice(&self) -> Option<&Notice> {
        self.cells.notice()
    }

    fn dismiss_notice(&mut self) {
        self.cells.dismiss();
    }

    fn entries(&self) -> Vec<Entry> {
        self.cells().iter().map(cell_entry).collect()
    }

    fn render_lines(&self) -> Vec<String> {
        list_lines(&self.cells)
    }

    fn is_loading(&self) -> bool {
        self.cells.is_loading()
    }

    fn is_failed(&self) -> bool {
        self.cells.error().is_some()
    }
}

/// Keyword search over cell names.
///
/// Only the response to the most recent keyword is kept.
#[derive(Debug, Default)]
pub struct CellSearchView {
    keyword: String,
    cells: Fetch<Vec<Cell>>,
    notice: Option<Notice>,
}

impl CellSearchView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keyword(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            ..Self::default()
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn cells(&self) -> &[Cell] {
        self.cells.items()
    }

    pub fn search(&mut self, keyword: &str) -> Vec<Request> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            self.notice = Some(Notice::Invalid(SEARCH_KEYWORD_REQUIRED.to_string()));
            return Vec::new();
        }
        self.notice = None;
        self.keyword = keyword.to_string();
        self.cells.begin();
        vec![Request::CellSearch(self.keyword.clone())]
    }
}

impl Screen for CellSearchView {
    fn route(&self) -> Route {
        Route::CellSearch
    }

    fn on_mount(&mut self) -> Vec<Request> {
        if self.keyword.trim().is_empty() {
            return Vec::new();
        }
        let keyword = self.keyword.clone();
        self.search(&keyword)
    }

    fn apply(&mut self, response: Response) -> Vec<Request> {
        if let Response::CellSearch(keyword, outcome) = response {
            if keyword == self.keyword {
                self.cells.resolve_list(outcome, "Error searching cells");
            }
        }
        Vec::new()
    }

    fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref().or_else(|| self.cells.notice())
    }

    fn dismiss_notice(&mut self) {
        if self.notice.take().is_none() {
            self.cells.dismiss();
        }
    }

    fn entries(&self) -> Vec<Entry> {
        self.cells().iter().map(cell_entry).collect()
    }

    fn render_lines(&self) -> Vec<String> {
        if let Some(notice) = &self.notice {
            return vec![notice.text().to_string()];
        }
        list_lines(&self.cells)
    }

    fn is_loading(&self) -> bool {
        self.cells.is_loading()
    }

    fn is_failed(&self) -> bool {
        self.cells.error().is_some() || self.notice.as_ref().is_some_and(Notice::is_error)
    }
}

/// One cell: its record, latest summary, and joined plot images
#[derive(Debug)]
pub struct CellDetailView {
    name: String,
    image_count: usize,
    cell: Fetch<Cell>,
    latest: Fetch<LatestInfo>,
    images: Fetch<Vec<ObjectUrl>>,
}

impl CellDetailView {
    pub fn new(name: impl Into<String>, image_count: usize) -> Self {
        Self {
            name: name.into(),
            image_count,
            cell: Fetch::default(),
            latest: Fetch::default(),
            images: Fetch::default(),
        }
    }

    pub fn cell(&self) -> Option<&Cell> {
        self.cell.loaded()
    }

    pub fn latest(&self) -> Option<&LatestInfo> {
        self.latest.loaded()
    }

    /// Plot images, present only when every image of the join arrived
    pub fn images(&self) -> &[ObjectUrl] {
        self.images.items()
    }

    pub fn images_state(&self) -> &Fetch<Vec<ObjectUrl>> {
        &self.images
    }
}

impl Screen for CellDetailView {
    fn route(&self) -> Route {
        Route::Cell(self.name.clone())
    }

    fn on_mount(&mut self) -> Vec<Request> {
        self.cell.begin();
        self.latest.begin();
        self.images.begin();
        vec![
            Request::Cell(self.name.clone()),
            Request::LatestInfo(self.name.clone()),
            Request::CellImages {
                cell: self.name.clone(),
                indices: (0..self.image_count).collect(),
            },
        ]
    }

    fn apply(&mut self, response: Response) -> Vec<Request> {
        match response {
            Response::Cell(outcome) => self.cell.resolve_item(outcome, "Error fetching cell"),
            Response::LatestInfo(outcome) => {
                self.latest.resolve_item(outcome, "Error fetching latest info")
            }
            Response::CellImages(outcome) => {
                self.images.resolve_item(outcome, "Error fetching plot images")
            }
            _ => {}
        }
        Vec::new()
    }

    /// First failure among cell, latest info, and plots
    fn notice(&self) -> Option<&Notice> {
        self.cell
            .notice()
            .or_else(|| self.latest.notice())
            .or_else(|| self.images.notice())
    }

    fn dismiss_notice(&mut self) {
        if self.cell.notice().is_some() {
            self.cell.dismiss();
        } else if self.latest.notice().is_some() {
            self.latest.dismiss();
        } else {
            self.images.dismiss();
        }
    }

    fn entries(&self) -> Vec<Entry> {
        if self.cell().is_none() {
            return Vec::new();
        }
        let mut entries = vec![Entry::new("Test Records", Route::TestRecords(self.name.clone()))];
        entries.extend((0..self.image_count).map(|index| {
            Entry::new(
                format!("Plot {index}"),
                Route::CellPlot {
                    cell: self.name.clone(),
                    index,
                },
            )
        }));
        entries
    }

    fn render_lines(&self) -> Vec<String> {
        if let Some(line) = self.cell.placeholder("Cell not found") {
            return vec![line];
        }
        let mut lines = Vec::new();
        if let Some(cell) = self.cell() {
            lines.push(format!("Cell: {}", cell.cell_name));
            lines.push(format!(
                "Project: {}",
                cell.project_name.as_deref().unwrap_or("-")
            ));
        }

        lines.push("Latest Info".to_string());
        match (self.latest.placeholder("No test data yet"), self.latest()) {
            (Some(line), _) => lines.push(format!("  {line}")),
            (None, Some(info)) => {
                lines.extend(info.iter().map(|(key, value)| format!("  {key}: {}", json_text(value))))
            }
            (None, None) => {}
        }

        lines.push("Plots".to_string());
        match self.images.placeholder("Plots not available") {
            Some(line) => lines.push(format!("  {line}")),
            None => lines.extend(
                self.images()
                    .iter()
                    .enumerate()
                    .map(|(index, image)| format!("  Plot {index}: {}", image.url())),
            ),
        }
        lines
    }

    fn is_loading(&self) -> bool {
        self.cell.is_loading() || self.latest.is_loading() || self.images.is_loading()
    }

    fn is_failed(&self) -> bool {
        self.cell.error().is_some() || self.latest.error().is_some() || self.images.error().is_some()
    }
}

fn json_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        serde_json::Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

/// Interactive HTML document behind one plot
#[derive(Debug)]
pub struct CellPlotView {
    cell: String,
    index: usize,
    html: Fetch<ObjectUrl>,
}

impl CellPlotView {
    pub fn new(cell: impl Into<String>, index: usize) -> Self {
        Self {
            cell: cell.into(),
            index,
            html: Fetch::default(),
        }
    }

    pub fn document(&self) -> Option<&ObjectUrl> {
        self.html.loaded()
    }
}

impl Screen for CellPlotView {
    fn route(&self) -> Route {
        Route::CellPlot {
            cell: self.cell.clone(),
            index: self.index,
        }
    }

    fn on_mount(&mut self) -> Vec<Request> {
        // drops the previous document, removing its file
        self.html.begin();
        vec![Request::CellHtml {
            cell: self.cell.clone(),
            index: self.index,
        }]
    }

    fn apply(&mut self, response: Response) -> Vec<Request> {
        if let Response::CellHtml(outcome) = response {
            self.html.resolve_item(outcome, "Error fetching plot");
        }
        Vec::new()
    }

    fn notice(&self) -> Option<&Notice> {
        self.html.notice()
    }

    fn dismiss_notice(&mut self) {
        self.html.dismiss();
    }

    fn render_lines(&self) -> Vec<String> {
        if let Some(line) = self.html.placeholder("Plot not found") {
            return vec![line];
        }
        self.document()
            .map(|document| {
                vec![
                    format!("Plot {} of {}", self.index, self.cell),
                    format!("Open: {}", document.url()),
                    format!("Size: {} bytes", document.len()),
                ]
            })
            .unwrap_or_default()
    }

    fn is_loading(&self) -> bool {
        self.html.is_loading()
    }

    fn is_failed(&self) -> bool {
        self.html.error().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use batteryabn_client::ClientError;

    fn cell(name: &str) -> Cell {
        Cell {
            cell_name: name.to_string(),
            project_name: Some("PROJ".to_string()),
        }
    }

    #[test]
    fn test_detail_mount_issues_three_reads() {
        let mut view = CellDetailView::new("CELL_A", 3);
        let requests = view.on_mount();
        assert_eq!(
            requests,
            vec![
                Request::Cell("CELL_A".to_string()),
                Request::LatestInfo("CELL_A".to_string()),
                Request::CellImages {
                    cell: "CELL_A".to_string(),
                    indices: vec![0, 1, 2],
                },
            ]
        );
        assert!(view.is_loading());
    }

    #[test]
    fn test_detail_image_join_failure() {
        let mut view = CellDetailView::new("CELL_A", 3);
        view.on_mount();
        view.apply(Response::Cell(Ok(cell("CELL_A"))));
        view.apply(Response::LatestInfo(Ok(LatestInfo::new())));
        view.apply(Response::CellImages(Err(FetchError::from(ClientError::Server {
            status: 500,
            message: "render failed".to_string(),
        }))));

        assert!(view.images().is_empty());
        assert!(view.is_failed());
        assert!(view.cell().is_some());
        assert_eq!(view.entries().len(), 4);
    }

    #[test]
    fn test_detail_failures_dismiss_one_at_a_time() {
        let mut view = CellDetailView::new("CELL_A", 3);
        view.on_mount();
        view.apply(Response::Cell(Ok(cell("CELL_A"))));
        view.apply(Response::LatestInfo(Err(FetchError::from(ClientError::Timeout {
            duration: 1,
        }))));
        view.apply(Response::CellImages(Err(FetchError::from(ClientError::Server {
            status: 502,
            message: "Bad Gateway".to_string(),
        }))));

        assert_eq!(view.notice().map(Notice::text), Some("Error fetching latest info"));
        view.dismiss_notice();
        assert_eq!(view.notice().map(Notice::text), Some("Error fetching plot images"));
        view.dismiss_notice();
        assert!(view.notice().is_none());
        assert!(!view.is_failed());
        assert!(view.cell().is_some());
    }

    #[test]
    fn test_search_requires_keyword() {
        let mut view = CellSearchView::new();
        assert!(view.on_mount().is_empty());
        assert!(view.search("  ").is_empty());
        assert_eq!(view.notice().map(Notice::text), Some(SEARCH_KEYWORD_REQUIRED));
    }

    #[test]
    fn test_search_ignores_stale_keyword() {
        let mut view = CellSearchView::new();
        view.search("OLD");
        view.search("NEW");

        view.apply(Response::CellSearch("OLD".to_string(), Ok(vec![cell("OLD_1")])));
        assert!(view.is_loading());

        view.apply(Response::CellSearch("NEW".to_string(), Ok(vec![cell("NEW_1")])));
        assert_eq!(view.cells().len(), 1);
        assert_eq!(view.cells()[0].cell_name, "NEW_1");
    }

    #[test]
    fn test_cell_entries_alternate_to_test_records() {
        let mut view = CellListView::new("PROJ");
        view.apply(Response::CellsByProject(Ok(vec![cell("CELL_A")])));
        let entries = view.entries();
        assert_eq!(entries[0].route, Route::Cell("CELL_A".to_string()));
        assert_eq!(
            entries[0].alternate,
            Some(Route::TestRecords("CELL_A".to_string()))
        );
    }
}
