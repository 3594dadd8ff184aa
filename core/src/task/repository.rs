//! Task repository trait
//!
//! Defines the interface consumers use to read and write tasks.

use async_trait::async_trait;
use serde::Serialize;

use super::model::Task;
use crate::Result;

/// Result of a write on one data source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum WriteStatus {
    Applied,
    /// The write was not attempted
    Skipped,
    Failed(String),
}

impl WriteStatus {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl From<Result<()>> for WriteStatus {
    fn from(result: Result<()>) -> Self {
        match result {
            Ok(()) => Self::Applied,
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}

/// Per-source report of a write dispatched to both remote and local
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteOutcome {
    pub remote: WriteStatus,
    pub local: WriteStatus,
}

impl WriteOutcome {
    pub fn new(remote: impl Into<WriteStatus>, local: impl Into<WriteStatus>) -> Self {
        Self {
            remote: remote.into(),
            local: local.into(),
        }
    }

    /// Both sides applied
    pub fn applied() -> Self {
        Self::new(WriteStatus::Applied, WriteStatus::Applied)
    }

    /// Neither side attempted
    pub fn skipped() -> Self {
        Self::new(WriteStatus::Skipped, WriteStatus::Skipped)
    }

    /// True when both remote and local applied the write
    pub fn is_complete(&self) -> bool {
        self.remote.is_applied() && self.local.is_applied()
    }

    /// True when exactly one side failed, leaving the stores diverged
    pub fn is_partial(&self) -> bool {
        self.remote.is_failed() != self.local.is_failed()
    }

    pub fn is_skipped(&self) -> bool {
        self.remote == WriteStatus::Skipped && self.local == WriteStatus::Skipped
    }
}

/// Repository interface for task reads and writes
///
/// Reads return `Err` when the request cannot be served. Writes never fail
/// the call; they report per-source results in a [`WriteOutcome`].
#[async_trait]
pub trait TasksRepository: Send + Sync {
    /// Get all tasks, bypassing the cache when `force_update` is set
    async fn get_tasks(&self, force_update: bool) -> Result<Vec<Task>>;

    /// Get a task by ID, bypassing the cache when `force_update` is set
    async fn get_task(&self, task_id: &str, force_update: bool) -> Result<Task>;

    /// Save a new or edited task
    async fn save_task(&self, task: Task) -> WriteOutcome;

    /// Mark a task as completed
    async fn complete_task(&self, task: &Task) -> WriteOutcome;

    /// Mark the task with the given ID as completed
    async fn complete_task_by_id(&self, task_id: &str) -> WriteOutcome;

    /// Mark a task as active
    async fn activate_task(&self, task: &Task) -> WriteOutcome;

    /// Mark the task with the given ID as active
    async fn activate_task_by_id(&self, task_id: &str) -> WriteOutcome;

    /// Delete every completed task
    async fn clear_completed_tasks(&self) -> WriteOutcome;

    /// Delete every task
    async fn delete_all_tasks(&self) -> WriteOutcome;

    /// Delete a task by ID
    async fn delete_task(&self, task_id: &str) -> WriteOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_outcome_from_results() {
        let remote: crate::Result<()> = Ok(());
        let local: crate::Result<()> = Err(Error::LocalUnavailable("full".into()));
        let outcome = WriteOutcome::new(remote, local);

        assert!(!outcome.is_complete());
        assert!(outcome.is_partial());
        assert_eq!(
            outcome.local,
            WriteStatus::Failed("Local data source unavailable: full".to_string())
        );
    }

    #[test]
    fn test_outcome_states() {
        assert!(WriteOutcome::applied().is_complete());
        assert!(!WriteOutcome::applied().is_partial());
        assert!(WriteOutcome::skipped().is_skipped());
        assert!(!WriteOutcome::skipped().is_complete());

        let both_failed = WriteOutcome::new(
            WriteStatus::Failed("a".into()),
            WriteStatus::Failed("b".into()),
        );
        assert!(!both_failed.is_partial());
    }

    #[test]
    fn test_outcome_serializes_status_tags() {
        let outcome = WriteOutcome::new(WriteStatus::Applied, WriteStatus::Failed("disk".into()));
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["remote"]["status"], "applied");
        assert_eq!(json["local"]["status"], "failed");
        assert_eq!(json["local"]["error"], "disk");
    }
}
