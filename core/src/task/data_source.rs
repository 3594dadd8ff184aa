//! Data source trait
//!
//! Shared contract of the remote, local and fake task stores.

use async_trait::async_trait;

use super::model::Task;
use crate::Result;

/// Read/write interface implemented by every task data source
///
/// Writes are idempotent: saving an existing id overwrites it, and deleting
/// or completing a missing id succeeds without effect.
#[async_trait]
pub trait TasksDataSource: Send + Sync {
    /// Get all tasks
    async fn get_tasks(&self) -> Result<Vec<Task>>;

    /// Get a task by ID
    async fn get_task(&self, task_id: &str) -> Result<Task>;

    /// Insert or replace a task
    async fn save_task(&self, task: &Task) -> Result<()>;

    /// Mark a task as completed
    async fn complete_task(&self, task: &Task) -> Result<()>;

    /// Mark the task with the given ID as completed
    async fn complete_task_by_id(&self, task_id: &str) -> Result<()>;

    /// Mark a task as active
    async fn activate_task(&self, task: &Task) -> Result<()>;

    /// Mark the task with the given ID as active
    async fn activate_task_by_id(&self, task_id: &str) -> Result<()>;

    /// Delete a task by ID
    async fn delete_task(&self, task_id: &str) -> Result<()>;

    /// Delete every task
    async fn delete_all_tasks(&self) -> Result<()>;

    /// Delete every completed task
    async fn clear_completed_tasks(&self) -> Result<()>;
}
