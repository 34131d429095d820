/*
[INPUT]:  Task kinds, target entity names, clear scopes
[OUTPUT]: Task status snapshots and enqueue/clear acknowledgements
[POS]:    HTTP layer - background task endpoints
[UPDATE]: When adding new task kinds or changing the status payload
*/

use reqwest::Method;
use tracing::info;

use crate::http::{BatteryClient, Result};
use crate::types::{ClearScope, TaskKind, TaskMessage, TaskStatusSnapshot};

impl BatteryClient {
    /// Fetch the four-bucket task snapshot
    ///
    /// GET /tasks/status
    ///
    /// Returns `None` when the server answers with a `null` or empty body.
    pub async fn task_status(&self) -> Result<Option<TaskStatusSnapshot>> {
        let builder = self.request(Method::GET, &["tasks", "status"])?;
        self.send_json(builder).await
    }

    /// Enqueue a cell task
    ///
    /// POST /tasks/trs/update/{cell}, /tasks/trs/reset/{cell},
    /// POST /tasks/cell/create/{cell}, /tasks/cell/process/{cell}
    pub async fn enqueue_task(&self, kind: TaskKind, cell_name: &str) -> Result<TaskMessage> {
        let [group, action] = kind.endpoint();
        let builder = self.request(Method::POST, &["tasks", group, action, cell_name])?;
        let message: Option<TaskMessage> = self.send_json(builder).await?;
        info!(kind = %kind, cell = cell_name, "task enqueued");
        Ok(message.unwrap_or_default())
    }

    /// Enqueue a project-level update task
    ///
    /// POST /tasks/project/update/{project}
    pub async fn enqueue_project_update(&self, project_name: &str) -> Result<TaskMessage> {
        let builder =
            self.request(Method::POST, &["tasks", "project", "update", project_name])?;
        let message: Option<TaskMessage> = self.send_json(builder).await?;
        info!(project = project_name, "project update task enqueued");
        Ok(message.unwrap_or_default())
    }

    /// Clear task history
    ///
    /// POST /tasks/clear, /tasks/clear/finished, /tasks/clear/failed
    pub async fn clear_tasks(&self, scope: ClearScope) -> Result<TaskMessage> {
        let mut segments = vec!["tasks"];
        segments.extend_from_slice(scope.endpoint());
        let builder = self.request(Method::POST, &segments)?;
        let message: Option<TaskMessage> = self.send_json(builder).await?;
        info!(scope = %scope, "task history cleared");
        Ok(message.unwrap_or_default())
    }
}
