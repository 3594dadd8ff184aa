//! Simulated remote task service
//!
//! Holds tasks in memory and delays every read to emulate network latency.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

use super::data_source::TasksDataSource;
use super::model::Task;
use crate::{Error, Result};

/// Default delay applied to every remote read
pub const SERVICE_LATENCY: Duration = Duration::from_millis(2000);

/// In-memory stand-in for a network-backed task service
pub struct RemoteTasksDataSource {
    tasks: RwLock<BTreeMap<String, Task>>,
    latency: Duration,
    available: AtomicBool,
}

impl RemoteTasksDataSource {
    /// Create a remote source holding the given tasks
    pub fn new(seed: impl IntoIterator<Item = Task>) -> Self {
        Self {
            tasks: RwLock::new(seed.into_iter().map(|t| (t.id.clone(), t)).collect()),
            latency: SERVICE_LATENCY,
            available: AtomicBool::new(true),
        }
    }

    /// Create a remote source holding the two sample tasks
    pub fn seeded() -> Self {
        Self::new(sample_tasks())
    }

    /// Set the read latency
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Read latency applied to `get_tasks` and `get_task`
    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Simulate the service going down or coming back
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(Error::RemoteUnavailable("service is offline".to_string()))
        }
    }

    async fn set_completed(&self, task_id: &str, completed: bool) -> Result<()> {
        self.ensure_available()?;
        let mut tasks = self.tasks.write().await;
        if let Some(updated) = tasks.get(task_id).map(|t| t.clone().with_completed(completed)) {
            tasks.insert(updated.id.clone(), updated);
        }
        Ok(())
    }
}

/// Tasks the remote service starts with when seeded
pub fn sample_tasks() -> Vec<Task> {
    vec![
        Task::new(
            "Build tower in Pisa",
            "Ground looks good, no foundation work required.",
        ),
        Task::new(
            "Finish bridge in Tacoma",
            "Found awesome girders at half the cost!",
        ),
    ]
}

#[async_trait]
impl TasksDataSource for RemoteTasksDataSource {
    async fn get_tasks(&self) -> Result<Vec<Task>> {
        let tasks: Vec<Task> = self.tasks.read().await.values().cloned().collect();
        tokio::time::sleep(self.latency).await;
        self.ensure_available()?;
        Ok(tasks)
    }

    async fn get_task(&self, task_id: &str) -> Result<Task> {
        tokio::time::sleep(self.latency).await;
        self.ensure_available()?;
        self.tasks
            .read()
            .await
            .get(task_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(task_id.to_string()))
    }

    async fn save_task(&self, task: &Task) -> Result<()> {
        self.ensure_available()?;
        self.tasks.write().await.insert(task.id.clone(), task.clone());
        Ok(())
    }

    async fn complete_task(&self, task: &Task) -> Result<()> {
        self.ensure_available()?;
        self.tasks.write().await.insert(task.id.clone(), task.completed());
        Ok(())
    }

    async fn complete_task_by_id(&self, task_id: &str) -> Result<()> {
        self.set_completed(task_id, true).await
    }

    async fn activate_task(&self, task: &Task) -> Result<()> {
        self.ensure_available()?;
        self.tasks.write().await.insert(task.id.clone(), task.activated());
        Ok(())
    }

    async fn activate_task_by_id(&self, task_id: &str) -> Result<()> {
        self.set_completed(task_id, false).await
    }

    async fn delete_task(&self, task_id: &str) -> Result<()> {
        self.ensure_available()?;
        self.tasks.write().await.remove(task_id);
        Ok(())
    }

    async fn delete_all_tasks(&self) -> Result<()> {
        self.ensure_available()?;
        self.tasks.write().await.clear();
        Ok(())
    }

    async fn clear_completed_tasks(&self) -> Result<()> {
        self.ensure_available()?;
        self.tasks.write().await.retain(|_, t| t.is_active());
        Ok(())
    }
}
