/*
[INPUT]:  Outcomes of backend reads
[OUTPUT]: Fetch<T> load state shared by list and detail screens
[POS]:    View layer - single place where NotFound becomes empty or missing
[UPDATE]: When changing how read failures are surfaced
[UPDATE]: 2026-10-16 Read failures are dismissible notices
*/

use crate::error::{Notice, Outcome, ViewError};

#[derive(Debug)]
pub enum Fetch<T> {
    Idle,
    Loading,
    Loaded(T),
    /// Detail read answered 404
    Missing,
    /// Always a `Notice::Failure`; dismissing it drops back to `Idle`
    Failed(Notice),
}

impl<T> Default for Fetch<T> {
    fn default() -> Self {
        Fetch::Idle
    }
}

impl<T> Fetch<T> {
    pub fn begin(&mut self) {
        *self = Fetch::Loading;
    }

    /// Detail semantics: NotFound renders as `Missing`
    pub fn resolve_item(&mut self, outcome: Outcome<T>, context: &str) {
        *self = match outcome {
            Ok(value) => Fetch::Loaded(value),
            Err(err) if err.is_not_found() => Fetch::Missing,
            Err(err) => Fetch::Failed(Notice::Failure(ViewError::new(context, &err))),
        };
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Fetch::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Fetch::Loading)
    }

    pub fn error(&self) -> Option<&ViewError> {
        match self {
            Fetch::Failed(Notice::Failure(err)) => Some(err),
            _ => None,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Fetch::Failed(notice) => Some(notice),
            _ => None,
        }
    }

    /// Clear a failure; any other state is kept
    pub fn dismiss(&mut self) {
        if matches!(self, Fetch::Failed(_)) {
            *self = Fetch::Idle;
        }
    }

    /// Placeholder line for every state except `Loaded`
    pub fn placeholder(&self, missing: &str) -> Option<String> {
        match self {
            Fetch::Idle => Some(String::new()),
            Fetch::Loading => Some("Loading...".to_string()),
            Fetch::Loaded(_) => None,
            Fetch::Missing => Some(missing.to_string()),
            Fetch::Failed(notice) => Some(match notice.detail() {
                Some(detail) => format!("{} ({detail})", notice.text()),
                None => notice.text().to_string(),
            }),
        }
    }
}

impl<T> Fetch<Vec<T>> {
    /// List semantics: NotFound is an empty list, not an error
    pub fn resolve_list(&mut self, outcome: Outcome<Vec<T>>, context: &str) {
        *self = match outcome {
            Ok(items) => Fetch::Loaded(items),
            Err(err) if err.is_not_found() => Fetch::Loaded(Vec::new()),
            Err(err) => Fetch::Failed(Notice::Failure(ViewError::new(context, &err))),
        };
    }

    pub fn items(&self) -> &[T] {
        match self {
            Fetch::Loaded(items) => items,
            _ => &[],
        }
    }
}
