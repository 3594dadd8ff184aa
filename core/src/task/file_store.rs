//! File-based task storage implementation
//!
//! Stores tasks as JSON in a file on disk.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use super::dao::TasksDao;
use super::model::Task;
use crate::Result;

/// File-based task store using JSON
pub struct FileTaskStore {
    /// Path to the JSON file, `None` for a purely in-memory store
    path: Option<PathBuf>,
    /// In-memory copy of the table
    rows: RwLock<HashMap<String, Task>>,
}

impl FileTaskStore {
    /// Create a new FileTaskStore
    ///
    /// If the file doesn't exist, it will be created on first write.
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let rows = if path.exists() {
            let content = tokio::fs::read_to_string(&path).await?;
            let tasks: Vec<Task> = serde_json::from_str(&content)?;
            tasks.into_iter().map(|t| (t.id.clone(), t)).collect()
        } else {
            HashMap::new()
        };

        Ok(Self {
            path: Some(path),
            rows: RwLock::new(rows),
        })
    }

    /// Create a store that never touches disk
    pub fn in_memory() -> Self {
        Self {
            path: None,
            rows: RwLock::new(HashMap::new()),
        }
    }

    /// Path of the backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Apply `change` to a copy of the rows, keeping it only once it is on disk
    async fn commit<T, F>(&self, rows: &mut HashMap<String, Task>, change: F) -> Result<T>
    where
        T: Send,
        F: FnOnce(&mut HashMap<String, Task>) -> T + Send,
    {
        let mut next = rows.clone();
        let value = change(&mut next);
        self.persist(&next).await?;
        *rows = next;
        Ok(value)
    }

    /// Write the given rows to disk
    async fn persist(&self, rows: &HashMap<String, Task>) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let mut tasks: Vec<&Task> = rows.values().collect();
        tasks.sort_by(|a, b| a.id.cmp(&b.id));
        let content = serde_json::to_string_pretty(&tasks)?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl TasksDao for FileTaskStore {
    async fn tasks(&self) -> Result<Vec<Task>> {
        let rows = self.rows.read().await;
        Ok(rows.values().cloned().collect())
    }

    async fn task_by_id(&self, task_id: &str) -> Result<Option<Task>> {
        let rows = self.rows.read().await;
        Ok(rows.get(task_id).cloned())
    }

    async fn insert_task(&self, task: Task) -> Result<()> {
        let mut rows = self.rows.write().await;
        self.commit(&mut rows, |rows| {
            rows.insert(task.id.clone(), task);
        })
        .await
    }

    async fn update_task(&self, task: Task) -> Result<usize> {
        let mut rows = self.rows.write().await;
        if !rows.contains_key(&task.id) {
            return Ok(0);
        }
        self.commit(&mut rows, |rows| {
            rows.insert(task.id.clone(), task);
            1
        })
        .await
    }

    async fn update_completed(&self, task_id: &str, completed: bool) -> Result<usize> {
        let mut rows = self.rows.write().await;
        let Some(updated) = rows.get(task_id).map(|t| t.clone().with_completed(completed)) else {
            return Ok(0);
        };
        self.commit(&mut rows, |rows| {
            rows.insert(updated.id.clone(), updated);
            1
        })
        .await
    }

    async fn delete_task_by_id(&self, task_id: &str) -> Result<usize> {
        let mut rows = self.rows.write().await;
        if !rows.contains_key(task_id) {
            return Ok(0);
        }
        self.commit(&mut rows, |rows| {
            rows.remove(task_id);
            1
        })
        .await
    }

    async fn delete_tasks(&self) -> Result<()> {
        let mut rows = self.rows.write().await;
        self.commit(&mut rows, HashMap::clear).await
    }

    async fn delete_completed_tasks(&self) -> Result<usize> {
        let mut rows = self.rows.write().await;
        if rows.values().all(Task::is_active) {
            return Ok(0);
        }
        self.commit(&mut rows, |rows| {
            let before = rows.len();
            rows.retain(|_, t| t.is_active());
            before - rows.len()
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_store() -> (FileTaskStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tasks.json");
        let store = FileTaskStore::new(&path).await.unwrap();
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_insert_and_select() {
        let (store, _temp) = create_test_store().await;

        let task = Task::new("Test task", "A test description");
        store.insert_task(task.clone()).await.unwrap();

        let retrieved = store.task_by_id(&task.id).await.unwrap().unwrap();
        assert_eq!(retrieved.title, "Test task");
        assert_eq!(retrieved.description, "A test description");

        assert!(store.task_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_replaces_on_conflict() {
        let (store, _temp) = create_test_store().await;

        let task = Task::new("Original title", "");
        store.insert_task(task.clone()).await.unwrap();

        let mut replaced = task.clone();
        replaced.title = "Replaced title".to_string();
        store.insert_task(replaced).await.unwrap();

        let tasks = store.tasks().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Replaced title");
    }

    #[tokio::test]
    async fn test_update_task() {
        let (store, _temp) = create_test_store().await;

        let task = Task::new("Original title", "");
        store.insert_task(task.clone()).await.unwrap();

        let mut updated = task.clone();
        updated.title = "Updated title".to_string();
        assert_eq!(store.update_task(updated).await.unwrap(), 1);
        assert_eq!(
            store.task_by_id(&task.id).await.unwrap().unwrap().title,
            "Updated title"
        );

        // Updating a missing row touches nothing
        assert_eq!(store.update_task(Task::new("Ghost", "")).await.unwrap(), 0);
        assert_eq!(store.tasks().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_completed() {
        let (store, _temp) = create_test_store().await;

        let task = Task::new("Title", "Description");
        store.insert_task(task.clone()).await.unwrap();

        assert_eq!(store.update_completed(&task.id, true).await.unwrap(), 1);
        let stored = store.task_by_id(&task.id).await.unwrap().unwrap();
        assert!(stored.is_completed());
        assert_eq!(stored.title, "Title");

        assert_eq!(store.update_completed("missing", true).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_operations() {
        let (store, _temp) = create_test_store().await;

        let active = Task::new("Active", "");
        let done = Task::new("Done", "").with_completed(true);
        let other = Task::new("Other", "");
        store.insert_task(active.clone()).await.unwrap();
        store.insert_task(done).await.unwrap();
        store.insert_task(other.clone()).await.unwrap();

        assert_eq!(store.delete_completed_tasks().await.unwrap(), 1);
        assert_eq!(store.tasks().await.unwrap().len(), 2);

        assert_eq!(store.delete_task_by_id(&other.id).await.unwrap(), 1);
        assert_eq!(store.delete_task_by_id(&other.id).await.unwrap(), 0);

        store.delete_tasks().await.unwrap();
        assert!(store.tasks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_persistence_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("tasks.json");

        let task = Task::new("Persistent task", "Should survive reload").with_completed(true);

        {
            let store = FileTaskStore::new(&path).await.unwrap();
            store.insert_task(task.clone()).await.unwrap();
        }

        {
            let store = FileTaskStore::new(&path).await.unwrap();
            assert_eq!(store.path(), Some(path.as_path()));
            let reloaded = store.task_by_id(&task.id).await.unwrap().unwrap();
            assert_eq!(reloaded.title, "Persistent task");
            assert_eq!(reloaded.description, "Should survive reload");
            assert!(reloaded.is_completed());
        }
    }

    #[tokio::test]
    async fn test_corrupt_file_fails_to_open() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tasks.json");
        std::fs::write(&path, "not json").unwrap();

        let result = FileTaskStore::new(&path).await;
        assert!(matches!(result, Err(crate::Error::Serialization(_))));
    }

    #[tokio::test]
    async fn test_failed_write_leaves_rows_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("data");
        let store = FileTaskStore::new(data_dir.join("tasks.json")).await.unwrap();

        let kept = Task::new("Kept", "").with_completed(true);
        store.insert_task(kept.clone()).await.unwrap();

        // Replace the data directory with a regular file so every write fails
        std::fs::remove_dir_all(&data_dir).unwrap();
        std::fs::write(&data_dir, "not a directory").unwrap();

        let task = Task::new("Lost", "");
        assert!(store.insert_task(task.clone()).await.is_err());
        assert!(store.task_by_id(&task.id).await.unwrap().is_none());

        assert!(store.update_completed(&kept.id, false).await.is_err());
        assert!(store.delete_completed_tasks().await.is_err());
        assert!(store.delete_task_by_id(&kept.id).await.is_err());
        assert!(store.delete_tasks().await.is_err());

        let rows = store.tasks().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_completed());
    }

    #[tokio::test]
    async fn test_in_memory_store_has_no_path() {
        let store = FileTaskStore::in_memory();
        store.insert_task(Task::new("Title", "")).await.unwrap();

        assert!(store.path().is_none());
        assert_eq!(store.tasks().await.unwrap().len(), 1);
    }
}
