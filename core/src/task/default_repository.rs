//! Cached two-tier task repository
//!
//! The remote data source is the source of truth. The local data source is
//! only read when the remote fails, and is overwritten after every successful
//! remote fetch.

use async_trait::async_trait;
use futures::future::join_all;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

use super::cache::TaskCache;
use super::data_source::TasksDataSource;
use super::model::Task;
use super::repository::{TasksRepository, WriteOutcome};
use crate::{Error, Result};

/// Repository that loads tasks from the data sources into a cache
pub struct DefaultTasksRepository {
    remote: Arc<dyn TasksDataSource>,
    local: Arc<dyn TasksDataSource>,
    cache: TaskCache,
}

impl DefaultTasksRepository {
    pub fn new(remote: Arc<dyn TasksDataSource>, local: Arc<dyn TasksDataSource>) -> Self {
        Self {
            remote,
            local,
            cache: TaskCache::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn cache(&self) -> &TaskCache {
        &self.cache
    }

    async fn fetch_tasks_from_remote_or_local(&self, force_update: bool) -> Result<Vec<Task>> {
        match self.remote.get_tasks().await {
            Ok(tasks) => {
                self.refresh_local_data_source(&tasks).await;
                return Ok(tasks);
            }
            Err(e) if force_update => {
                warn!("Can't force refresh, remote data source failed: {}", e);
                return Err(e);
            }
            Err(e) => warn!("Remote data source fetch failed, falling back to local: {}", e),
        }

        self.local.get_tasks().await.inspect_err(|e| {
            warn!("Error fetching tasks from remote and local: {}", e);
        })
    }

    async fn fetch_task_from_remote_or_local(&self, task_id: &str, force_update: bool) -> Result<Task> {
        match self.remote.get_task(task_id).await {
            Ok(task) => {
                if let Err(e) = self.local.save_task(&task).await {
                    warn!("Failed to refresh local copy of task {}: {}", task_id, e);
                }
                return Ok(task);
            }
            Err(e) if force_update => {
                warn!("Can't force refresh task {}, remote fetch failed: {}", task_id, e);
                return Err(e);
            }
            Err(e) => warn!("Remote fetch of task {} failed, falling back to local: {}", task_id, e),
        }

        self.local.get_task(task_id).await.inspect_err(|e| {
            warn!("Error fetching task {} from remote and local: {}", task_id, e);
        })
    }

    /// Overwrite the local store with the given tasks
    async fn refresh_local_data_source(&self, tasks: &[Task]) {
        if let Err(e) = self.local.delete_all_tasks().await {
            warn!("Failed to clear local data source before refresh: {}", e);
        }

        let saves = tasks.iter().map(|task| self.local.save_task(task));
        let failed = join_all(saves).await.into_iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            warn!("{} of {} tasks failed to save during local refresh", failed, tasks.len());
        }
    }

    /// Run the same write against remote and local concurrently
    async fn dual_write(
        &self,
        operation: &str,
        remote: impl Future<Output = Result<()>>,
        local: impl Future<Output = Result<()>>,
    ) -> WriteOutcome {
        let (remote, local) = tokio::join!(remote, local);

        if let Err(e) = &remote {
            warn!("Remote {} failed: {}", operation, e);
        }
        if let Err(e) = &local {
            warn!("Local {} failed: {}", operation, e);
        }

        WriteOutcome::new(remote, local)
    }
}

#[async_trait]
impl TasksRepository for DefaultTasksRepository {
    async fn get_tasks(&self, force_update: bool) -> Result<Vec<Task>> {
        // Respond immediately with cache if available
        if !force_update {
            if let Some(tasks) = self.cache.snapshot().await {
                debug!("Serving {} tasks from cache", tasks.len());
                return Ok(tasks);
            }
        }

        let tasks = self.fetch_tasks_from_remote_or_local(force_update).await?;
        debug!("Refreshing cache with {} tasks", tasks.len());
        self.cache.replace(tasks).await;

        self.cache
            .snapshot()
            .await
            .ok_or_else(|| Error::IllegalState("cache missing after refresh".to_string()))
    }

    async fn get_task(&self, task_id: &str, force_update: bool) -> Result<Task> {
        if !force_update {
            if let Some(task) = self.cache.get(task_id).await {
                debug!("Serving task {} from cache", task_id);
                return Ok(task);
            }
        }

        let task = self.fetch_task_from_remote_or_local(task_id, force_update).await?;
        self.cache.put(task.clone()).await;
        Ok(task)
    }

    async fn save_task(&self, task: Task) -> WriteOutcome {
        self.cache.put(task.clone()).await;
        self.dual_write(
            "save",
            self.remote.save_task(&task),
            self.local.save_task(&task),
        )
        .await
    }

    async fn complete_task(&self, task: &Task) -> WriteOutcome {
        let completed = task.completed();
        self.cache.put(completed.clone()).await;
        self.dual_write(
            "complete",
            self.remote.complete_task(&completed),
            self.local.complete_task(&completed),
        )
        .await
    }

    async fn complete_task_by_id(&self, task_id: &str) -> WriteOutcome {
        match self.cache.get(task_id).await {
            Some(task) => self.complete_task(&task).await,
            None => {
                debug!("Task {} not cached, complete skipped", task_id);
                WriteOutcome::skipped()
            }
        }
    }

    async fn activate_task(&self, task: &Task) -> WriteOutcome {
        let active = task.activated();
        self.cache.put(active.clone()).await;
        self.dual_write(
            "activate",
            self.remote.activate_task(&active),
            self.local.activate_task(&active),
        )
        .await
    }

    async fn activate_task_by_id(&self, task_id: &str) -> WriteOutcome {
        match self.cache.get(task_id).await {
            Some(task) => self.activate_task(&task).await,
            None => {
                debug!("Task {} not cached, activate skipped", task_id);
                WriteOutcome::skipped()
            }
        }
    }

    async fn clear_completed_tasks(&self) -> WriteOutcome {
        let outcome = self
            .dual_write(
                "clear completed",
                self.remote.clear_completed_tasks(),
                self.local.clear_completed_tasks(),
            )
            .await;
        self.cache.remove_completed().await;
        outcome
    }

    async fn delete_all_tasks(&self) -> WriteOutcome {
        let outcome = self
            .dual_write(
                "delete all",
                self.remote.delete_all_tasks(),
                self.local.delete_all_tasks(),
            )
            .await;
        self.cache.clear().await;
        outcome
    }

    async fn delete_task(&self, task_id: &str) -> WriteOutcome {
        let outcome = self
            .dual_write(
                "delete",
                self.remote.delete_task(task_id),
                self.local.delete_task(task_id),
            )
            .await;
        self.cache.remove(task_id).await;
        outcome
    }
}
