//! Local data source backed by the persistent task store

use async_trait::async_trait;
use std::sync::Arc;

use super::dao::TasksDao;
use super::data_source::TasksDataSource;
use super::model::Task;
use crate::{Error, Result};

/// Data source over an on-device [`TasksDao`]
///
/// Store failures surface as [`Error::LocalUnavailable`]; a missing id on
/// read is [`Error::NotFound`].
pub struct LocalTasksDataSource {
    dao: Arc<dyn TasksDao>,
}

impl LocalTasksDataSource {
    pub fn new(dao: Arc<dyn TasksDao>) -> Self {
        Self { dao }
    }
}

fn unavailable(err: Error) -> Error {
    match err {
        Error::LocalUnavailable(_) => err,
        other => Error::LocalUnavailable(other.to_string()),
    }
}

#[async_trait]
impl TasksDataSource for LocalTasksDataSource {
    async fn get_tasks(&self) -> Result<Vec<Task>> {
        self.dao.tasks().await.map_err(unavailable)
    }

    async fn get_task(&self, task_id: &str) -> Result<Task> {
        self.dao
            .task_by_id(task_id)
            .await
            .map_err(unavailable)?
            .ok_or_else(|| Error::NotFound(task_id.to_string()))
    }

    async fn save_task(&self, task: &Task) -> Result<()> {
        self.dao.insert_task(task.clone()).await.map_err(unavailable)
    }

    async fn complete_task(&self, task: &Task) -> Result<()> {
        self.complete_task_by_id(&task.id).await
    }

    async fn complete_task_by_id(&self, task_id: &str) -> Result<()> {
        self.dao
            .update_completed(task_id, true)
            .await
            .map(|_| ())
            .map_err(unavailable)
    }

    async fn activate_task(&self, task: &Task) -> Result<()> {
        self.activate_task_by_id(&task.id).await
    }

    async fn activate_task_by_id(&self, task_id: &str) -> Result<()> {
        self.dao
            .update_completed(task_id, false)
            .await
            .map(|_| ())
            .map_err(unavailable)
    }

    async fn delete_task(&self, task_id: &str) -> Result<()> {
        self.dao
            .delete_task_by_id(task_id)
            .await
            .map(|_| ())
            .map_err(unavailable)
    }

    async fn delete_all_tasks(&self) -> Result<()> {
        self.dao.delete_tasks().await.map_err(unavailable)
    }

    async fn clear_completed_tasks(&self) -> Result<()> {
        self.dao
            .delete_completed_tasks()
            .await
            .map(|_| ())
            .map_err(unavailable)
    }
}
