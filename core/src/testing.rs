//! In-memory fakes for tests
//!
//! Deterministic stand-ins for the data sources and the repository, with
//! no latency and switchable failure.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

use crate::task::{Task, TasksDataSource, TasksRepository, WriteOutcome};
use crate::{Error, Result};

/// Data source over an optional list of tasks
///
/// While the list is `None` every operation fails.
pub struct FakeDataSource {
    tasks: RwLock<Option<Vec<Task>>>,
    reads: AtomicUsize,
    local: bool,
}

impl FakeDataSource {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks: RwLock::new(Some(tasks)),
            reads: AtomicUsize::new(0),
            local: false,
        }
    }

    /// A source whose every operation fails
    pub fn unavailable() -> Self {
        Self {
            tasks: RwLock::new(None),
            reads: AtomicUsize::new(0),
            local: false,
        }
    }

    /// Report failures as [`Error::LocalUnavailable`] instead of remote ones
    pub fn as_local(mut self) -> Self {
        self.local = true;
        self
    }

    /// Replace the backing list; `None` makes the source fail
    pub async fn set_tasks(&self, tasks: Option<Vec<Task>>) {
        *self.tasks.write().await = tasks;
    }

    /// Current backing list
    pub async fn tasks(&self) -> Option<Vec<Task>> {
        self.tasks.read().await.clone()
    }

    /// Number of `get_tasks` and `get_task` calls made so far
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn unavailable_error(&self) -> Error {
        let message = "Tasks not found".to_string();
        if self.local {
            Error::LocalUnavailable(message)
        } else {
            Error::RemoteUnavailable(message)
        }
    }

    async fn update<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut Vec<Task>) + Send,
    {
        let mut guard = self.tasks.write().await;
        let tasks = guard.as_mut().ok_or_else(|| self.unavailable_error())?;
        apply(tasks);
        Ok(())
    }

    async fn set_completed(&self, task_id: &str, completed: bool) -> Result<()> {
        self.update(|tasks| {
            if let Some(slot) = tasks.iter_mut().find(|t| t.id == task_id) {
                *slot = slot.clone().with_completed(completed);
            }
        })
        .await
    }
}

#[async_trait]
impl TasksDataSource for FakeDataSource {
    async fn get_tasks(&self) -> Result<Vec<Task>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.tasks
            .read()
            .await
            .clone()
            .ok_or_else(|| self.unavailable_error())
    }

    async fn get_task(&self, task_id: &str) -> Result<Task> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let guard = self.tasks.read().await;
        let tasks = guard.as_ref().ok_or_else(|| self.unavailable_error())?;
        tasks
            .iter()
            .find(|t| t.id == task_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(task_id.to_string()))
    }

    async fn save_task(&self, task: &Task) -> Result<()> {
        let task = task.clone();
        self.update(move |tasks| match tasks.iter().position(|t| t.id == task.id) {
            Some(index) => tasks[index] = task,
            None => tasks.push(task),
        })
        .await
    }

    async fn complete_task(&self, task: &Task) -> Result<()> {
        self.set_completed(&task.id, true).await
    }

    async fn complete_task_by_id(&self, task_id: &str) -> Result<()> {
        self.set_completed(task_id, true).await
    }

    async fn activate_task(&self, task: &Task) -> Result<()> {
        self.set_completed(&task.id, false).await
    }

    async fn activate_task_by_id(&self, task_id: &str) -> Result<()> {
        self.set_completed(task_id, false).await
    }

    async fn delete_task(&self, task_id: &str) -> Result<()> {
        self.update(|tasks| tasks.retain(|t| t.id != task_id)).await
    }

    async fn delete_all_tasks(&self) -> Result<()> {
        self.update(|tasks| tasks.clear()).await
    }

    async fn clear_completed_tasks(&self) -> Result<()> {
        self.update(|tasks| tasks.retain(Task::is_active)).await
    }
}

/// Repository over a plain map, with switchable read failure
#[derive(Default)]
pub struct FakeRepository {
    tasks_service_data: RwLock<BTreeMap<String, Task>>,
    should_return_error: AtomicBool,
}

impl FakeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every read fail until reset
    pub fn set_return_error(&self, value: bool) {
        self.should_return_error.store(value, Ordering::SeqCst);
    }

    pub async fn add_tasks(&self, tasks: impl IntoIterator<Item = Task>) {
        let mut data = self.tasks_service_data.write().await;
        for task in tasks {
            data.insert(task.id.clone(), task);
        }
    }

    fn check_error(&self) -> Result<()> {
        if self.should_return_error.load(Ordering::SeqCst) {
            Err(Error::RemoteUnavailable("Test exception".to_string()))
        } else {
            Ok(())
        }
    }

    async fn set_completed(&self, task_id: &str, completed: bool) -> WriteOutcome {
        let mut data = self.tasks_service_data.write().await;
        match data.get(task_id).map(|t| t.clone().with_completed(completed)) {
            Some(updated) => {
                data.insert(updated.id.clone(), updated);
                WriteOutcome::applied()
            }
            None => WriteOutcome::skipped(),
        }
    }
}

#[async_trait]
impl TasksRepository for FakeRepository {
    async fn get_tasks(&self, _force_update: bool) -> Result<Vec<Task>> {
        self.check_error()?;
        Ok(self.tasks_service_data.read().await.values().cloned().collect())
    }

    async fn get_task(&self, task_id: &str, _force_update: bool) -> Result<Task> {
        self.check_error()?;
        self.tasks_service_data
            .read()
            .await
            .get(task_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(task_id.to_string()))
    }

    async fn save_task(&self, task: Task) -> WriteOutcome {
        self.tasks_service_data.write().await.insert(task.id.clone(), task);
        WriteOutcome::applied()
    }

    async fn complete_task(&self, task: &Task) -> WriteOutcome {
        self.tasks_service_data
            .write()
            .await
            .insert(task.id.clone(), task.completed());
        WriteOutcome::applied()
    }

    async fn complete_task_by_id(&self, task_id: &str) -> WriteOutcome {
        self.set_completed(task_id, true).await
    }

    async fn activate_task(&self, task: &Task) -> WriteOutcome {
        self.tasks_service_data
            .write()
            .await
            .insert(task.id.clone(), task.activated());
        WriteOutcome::applied()
    }

    async fn activate_task_by_id(&self, task_id: &str) -> WriteOutcome {
        self.set_completed(task_id, false).await
    }

    async fn clear_completed_tasks(&self) -> WriteOutcome {
        self.tasks_service_data.write().await.retain(|_, t| t.is_active());
        WriteOutcome::applied()
    }

    async fn delete_all_tasks(&self) -> WriteOutcome {
        self.tasks_service_data.write().await.clear();
        WriteOutcome::applied()
    }

    async fn delete_task(&self, task_id: &str) -> WriteOutcome {
        self.tasks_service_data.write().await.remove(task_id);
        WriteOutcome::applied()
    }
}
