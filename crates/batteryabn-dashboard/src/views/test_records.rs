/*
[INPUT]:  Test-record listings, search results, and record detail
[OUTPUT]: Test-record list, search, and detail screens
[POS]:    View layer - test record browsing
[UPDATE]: When changing test record fields or time formatting
*/

use batteryabn_client::TestRecord;
use chrono::{DateTime, Utc};

use crate::error::Notice;
use crate::request::{Request, Response};
use crate::route::Route;
use crate::views::fetch::Fetch;
use crate::views::{Entry, Screen, SEARCH_KEYWORD_REQUIRED};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn record_entry(record: &TestRecord) -> Entry {
    let mut label = record.test_name.clone();
    if let Some(test_type) = &record.test_type {
        label.push_str(&format!("  [{test_type}]"));
    }
    if let Some(cell) = &record.cell_name {
        label.push_str(&format!("  {cell}"));
    }
    Entry::new(
        label,
        Route::TestRecord {
            name: record.test_name.clone(),
            test_type: record.test_type.clone(),
        },
    )
}

fn list_lines(records: &Fetch<Vec<TestRecord>>) -> Vec<String> {
    match records.placeholder("") {
        Some(line) => vec![line],
        None => records
            .items()
            .iter()
            .map(|record| record_entry(record).label)
            .collect(),
    }
}

fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map_or_else(|| "-".to_string(), |time| time.format(TIME_FORMAT).to_string())
}

/// Test records of one cell
#[derive(Debug)]
pub struct TestRecordListView {
    cell: String,
    records: Fetch<Vec<TestRecord>>,
}

impl TestRecordListView {
    pub fn new(cell: impl Into<String>) -> Self {
        Self {
            cell: cell.into(),
            records: Fetch::default(),
        }
    }

    pub fn records(&self) -> &[TestRecord] {
        self.records.items()
    }
}

impl Screen for TestRecordListView {
    fn route(&self) -> Route {
        Route::TestRecords(self.cell.clone())
    }

    fn on_mount(&mut self) -> Vec<Request> {
        self.records.begin();
        vec![Request::TestRecordsByCell(self.cell.clone())]
    }

    fn apply(&mut self, response: Response) -> Vec<Request> {
        if let Response::TestRecordsByCell(outcome) = response {
            self.records.resolve_list(outcome, "Error fetching test records");
        }
        Vec::new()
    }

    fn notice(&self) -> Option<&Notice> {
        self.records.notice()
    }

    fn dismiss_notice(&mut self) {
        self.records.dismiss();
    }

    fn entries(&self) -> Vec<Entry> {
        self.records().iter().map(record_entry).collect()
    }

    fn render_lines(&self) -> Vec<String> {
        list_lines(&self.records)
    }

    fn is_loading(&self) -> bool {
        self.records.is_loading()
    }

    fn is_failed(&self) -> bool {
        self.records.error().is_some()
    }
}

#[derive(Debug, Default)]
pub struct TestRecordSearchView {
    keyword: String,
    records: Fetch<Vec<TestRecord>>,
    notice: Option<Notice>,
}

impl TestRecordSearchView {
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

    pub fn records(&self) -> &[TestRecord] {
        self.records.items()
    }

    pub fn search(&mut self, keyword: &str) -> Vec<Request> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            self.notice = Some(Notice::Invalid(SEARCH_KEYWORD_REQUIRED.to_string()));
            return Vec::new();
        }
        self.notice = None;
        self.keyword = keyword.to_string();
        self.records.begin();
        vec![Request::TestRecordSearch(self.keyword.clone())]
    }
}

impl Screen for TestRecordSearchView {
    fn route(&self) -> Route {
        Route::TestRecordSearch
    }

    fn on_mount(&mut self) -> Vec<Request> {
        if self.keyword.trim().is_empty() {
            return Vec::new();
        }
        let keyword = self.keyword.clone();
        self.search(&keyword)
    }

    fn apply(&mut self, response: Response) -> Vec<Request> {
        if let Response::TestRecordSearch(keyword, outcome) = response {
            if keyword == self.keyword {
                self.records.resolve_list(outcome, "Error searching test records");
            }
        }
        Vec::new()
    }

    fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref().or_else(|| self.records.notice())
    }

    fn dismiss_notice(&mut self) {
        if self.notice.take().is_none() {
            self.records.dismiss();
        }
    }

    fn entries(&self) -> Vec<Entry> {
        self.records().iter().map(record_entry).collect()
    }

    fn render_lines(&self) -> Vec<String> {
        if let Some(notice) = &self.notice {
            return vec![notice.text().to_string()];
        }
        list_lines(&self.records)
    }

    fn is_loading(&self) -> bool {
        self.records.is_loading()
    }

    fn is_failed(&self) -> bool {
        self.records.error().is_some() || self.notice.as_ref().is_some_and(Notice::is_error)
    }
}

#[derive(Debug)]
pub struct TestRecordDetailView {
    name: String,
    test_type: Option<String>,
    record: Fetch<TestRecord>,
}

impl TestRecordDetailView {
    pub fn new(name: impl Into<String>, test_type: Option<String>) -> Self {
        Self {
            name: name.into(),
            test_type,
            record: Fetch::default(),
        }
    }

    pub fn record(&self) -> Option<&TestRecord> {
        self.record.loaded()
    }
}

impl Screen for TestRecordDetailView {
    fn route(&self) -> Route {
        Route::TestRecord {
            name: self.name.clone(),
            test_type: self.test_type.clone(),
        }
    }

    fn on_mount(&mut self) -> Vec<Request> {
        self.record.begin();
        vec![Request::TestRecord {
            name: self.name.clone(),
            test_type: self.test_type.clone(),
        }]
    }

    fn apply(&mut self, response: Response) -> Vec<Request> {
        if let Response::TestRecord(outcome) = response {
            self.record.resolve_item(outcome, "Error fetching test record");
        }
        Vec::new()
    }

    fn notice(&self) -> Option<&Notice> {
        self.record.notice()
    }

    fn dismiss_notice(&mut self) {
        self.record.dismiss();
    }

    fn entries(&self) -> Vec<Entry> {
        match self.record().and_then(|record| record.cell_name.clone()) {
            Some(cell) => vec![Entry::new(format!("Cell {cell}"), Route::Cell(cell))],
            None => Vec::new(),
        }
    }

    fn render_lines(&self) -> Vec<String> {
        if let Some(line) = self.record.placeholder("Test record not found") {
            return vec![line];
        }
        let Some(record) = self.record() else {
            return Vec::new();
        };
        vec![
            format!("Test: {}", record.test_name),
            format!("Type: {}", record.test_type.as_deref().unwrap_or("-")),
            format!("Cell: {}", record.cell_name.as_deref().unwrap_or("-")),
            format!("Started: {}", format_time(record.started_at())),
            format!("Last Update: {}", format_time(record.last_updated_at())),
        ]
    }

    fn is_loading(&self) -> bool {
        self.record.is_loading()
    }

    fn is_failed(&self) -> bool {
        self.record.error().is_some()
    }
}
