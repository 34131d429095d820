/*
[INPUT]:  Task endpoint layout and status payload shape
[OUTPUT]: Typed Rust enums for task kinds, buckets, and clear scopes
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::fmt;

use serde::{Deserialize, Serialize};

/// Background task that can be enqueued against a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Update,
    Reset,
    Create,
    Process,
}

impl TaskKind {
    pub const ALL: [TaskKind; 4] = [
        TaskKind::Update,
        TaskKind::Reset,
        TaskKind::Create,
        TaskKind::Process,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Update => "update",
            TaskKind::Reset => "reset",
            TaskKind::Create => "create",
            TaskKind::Process => "process",
        }
    }

    /// Capitalised name used in operator-facing text
    pub fn label(&self) -> &'static str {
        match self {
            TaskKind::Update => "Update",
            TaskKind::Reset => "Reset",
            TaskKind::Create => "Create",
            TaskKind::Process => "Process",
        }
    }

    /// Path segments under `/tasks` that enqueue this kind
    ///
    /// update/reset act on test records, create/process act on the cell itself.
    pub fn endpoint(&self) -> [&'static str; 2] {
        match self {
            TaskKind::Update => ["trs", "update"],
            TaskKind::Reset => ["trs", "reset"],
            TaskKind::Create => ["cell", "create"],
            TaskKind::Process => ["cell", "process"],
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        TaskKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("unknown task kind: {value}"))
    }
}

/// Lifecycle grouping in the task status snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskBucket {
    Queued,
    Started,
    Finished,
    Failed,
}

impl TaskBucket {
    /// Fixed rendering order
    pub const ALL: [TaskBucket; 4] = [
        TaskBucket::Queued,
        TaskBucket::Started,
        TaskBucket::Finished,
        TaskBucket::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskBucket::Queued => "queued",
            TaskBucket::Started => "started",
            TaskBucket::Finished => "finished",
            TaskBucket::Failed => "failed",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            TaskBucket::Queued => "Queued Tasks",
            TaskBucket::Started => "Started Tasks",
            TaskBucket::Finished => "Finished Tasks",
            TaskBucket::Failed => "Failed Tasks",
        }
    }
}

/// Which part of the task history a clear request removes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClearScope {
    All,
    Finished,
    Failed,
}

impl ClearScope {
    pub const ALL: [ClearScope; 3] = [ClearScope::All, ClearScope::Finished, ClearScope::Failed];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClearScope::All => "all",
            ClearScope::Finished => "finished",
            ClearScope::Failed => "failed",
        }
    }

    /// Path segments under `/tasks`
    pub fn endpoint(&self) -> &'static [&'static str] {
        match self {
            ClearScope::All => &["clear"],
            ClearScope::Finished => &["clear", "finished"],
            ClearScope::Failed => &["clear", "failed"],
        }
    }
}

impl fmt::Display for ClearScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ClearScope {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ClearScope::ALL
            .into_iter()
            .find(|scope| scope.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("unknown clear scope: {value}"))
    }
}
