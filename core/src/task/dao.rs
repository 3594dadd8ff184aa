//! Persistent store trait
//!
//! Table-level operations over task records keyed by identifier.

use async_trait::async_trait;

use super::model::Task;
use crate::Result;

/// Data access interface for the tasks table
#[async_trait]
pub trait TasksDao: Send + Sync {
    /// Select all tasks
    async fn tasks(&self) -> Result<Vec<Task>>;

    /// Select a task by id
    async fn task_by_id(&self, task_id: &str) -> Result<Option<Task>>;

    /// Insert a task, replacing any record with the same id
    async fn insert_task(&self, task: Task) -> Result<()>;

    /// Update a full record. Returns the number of rows updated (0 or 1).
    async fn update_task(&self, task: Task) -> Result<usize>;

    /// Update only the completion flag. Returns the number of rows updated.
    async fn update_completed(&self, task_id: &str, completed: bool) -> Result<usize>;

    /// Delete a task by id. Returns the number of rows deleted.
    async fn delete_task_by_id(&self, task_id: &str) -> Result<usize>;

    /// Delete all tasks
    async fn delete_tasks(&self) -> Result<()>;

    /// Delete all completed tasks. Returns the number of rows deleted.
    async fn delete_completed_tasks(&self) -> Result<usize>;
}
