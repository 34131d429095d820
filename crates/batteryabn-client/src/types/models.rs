/*
[INPUT]:  Backend JSON payloads for projects, cells, test records, and tasks
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
[UPDATE]: 2026-10-03 Accept numeric or string task ids
*/

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::TaskBucket;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub project_name: String,
    #[serde(default)]
    pub qmax: Option<f64>,
    #[serde(default)]
    pub i_c20: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub cell_name: String,
    #[serde(default)]
    pub project_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    pub test_name: String,
    #[serde(default)]
    pub test_type: Option<String>,
    #[serde(default)]
    pub cell_name: Option<String>,
    /// Unix seconds
    #[serde(default)]
    pub start_time: Option<i64>,
    /// Unix seconds
    #[serde(default)]
    pub last_update_time: Option<i64>,
}

impl TestRecord {
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.start_time.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        self.last_update_time
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

/// Latest test summary for a cell; the backend does not fix its keys
pub type LatestInfo = serde_json::Map<String, serde_json::Value>;

/// Opaque task identifier, numeric or textual depending on the queue backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    Number(i64),
    Text(String),
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskId::Number(id) => write!(f, "{id}"),
            TaskId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for TaskId {
    fn from(value: i64) -> Self {
        TaskId::Number(value)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        TaskId::Text(value.to_string())
    }
}

/// One job as reported by the status endpoint. Timestamps are kept exactly as
/// the server formatted them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: TaskId,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub enqueued_at: Option<String>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub ended_at: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl TaskRecord {
    pub fn new(id: impl Into<TaskId>, enqueued_at: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: None,
            enqueued_at: Some(enqueued_at.into()),
            started_at: None,
            ended_at: None,
            description: None,
        }
    }
}

/// Four-bucket view of every job the server knows about.
///
/// The server partitions jobs across buckets; the client keeps each bucket in
/// server order and never merges or de-duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatusSnapshot {
    #[serde(default)]
    pub queued: Vec<TaskRecord>,
    #[serde(default)]
    pub started: Vec<TaskRecord>,
    #[serde(default)]
    pub finished: Vec<TaskRecord>,
    #[serde(default)]
    pub failed: Vec<TaskRecord>,
}

impl TaskStatusSnapshot {
    pub fn bucket(&self, bucket: TaskBucket) -> &[TaskRecord] {
        match bucket {
            TaskBucket::Queued => &self.queued,
            TaskBucket::Started => &self.started,
            TaskBucket::Finished => &self.finished,
            TaskBucket::Failed => &self.failed,
        }
    }

    pub fn count(&self, bucket: TaskBucket) -> usize {
        self.bucket(bucket).len()
    }

    pub fn total(&self) -> usize {
        TaskBucket::ALL.iter().map(|bucket| self.count(*bucket)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
