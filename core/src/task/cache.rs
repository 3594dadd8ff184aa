//! In-memory task cache held by the repository

use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::model::Task;

/// Identifier-ordered map of tasks, absent until first populated
///
/// Every mutation holds the write lock for its whole duration, so readers
/// never observe a partially replaced cache.
#[derive(Default)]
pub struct TaskCache {
    entries: RwLock<Option<BTreeMap<String, Task>>>,
}

impl TaskCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the cache has been populated at least once
    #[cfg(test)]
    pub(crate) async fn is_present(&self) -> bool {
        self.entries.read().await.is_some()
    }

    /// All cached tasks sorted by id, or `None` if never populated
    pub async fn snapshot(&self) -> Option<Vec<Task>> {
        self.entries
            .read()
            .await
            .as_ref()
            .map(|entries| entries.values().cloned().collect())
    }

    pub async fn get(&self, task_id: &str) -> Option<Task> {
        self.entries
            .read()
            .await
            .as_ref()
            .and_then(|entries| entries.get(task_id).cloned())
    }

    /// Cache a task, creating the cache if needed
    pub async fn put(&self, task: Task) {
        self.entries
            .write()
            .await
            .get_or_insert_with(BTreeMap::new)
            .insert(task.id.clone(), task);
    }

    /// Replace the whole cache with exactly the given tasks
    pub async fn replace(&self, tasks: impl IntoIterator<Item = Task>) {
        let fresh: BTreeMap<String, Task> =
            tasks.into_iter().map(|t| (t.id.clone(), t)).collect();
        *self.entries.write().await = Some(fresh);
    }

    pub async fn remove(&self, task_id: &str) {
        if let Some(entries) = self.entries.write().await.as_mut() {
            entries.remove(task_id);
        }
    }

    /// Remove every entry, keeping the cache present
    pub async fn clear(&self) {
        if let Some(entries) = self.entries.write().await.as_mut() {
            entries.clear();
        }
    }

    pub async fn remove_completed(&self) {
        if let Some(entries) = self.entries.write().await.as_mut() {
            entries.retain(|_, t| t.is_active());
        }
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.entries.read().await.as_ref().map_or(0, BTreeMap::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_absent_until_first_write() {
        let cache = TaskCache::new();
        assert!(!cache.is_present().await);
        assert!(cache.snapshot().await.is_none());

        // Removing from an absent cache does not create it
        cache.clear().await;
        cache.remove("id").await;
        assert!(!cache.is_present().await);

        cache.put(Task::new("Title", "")).await;
        assert!(cache.is_present().await);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_snapshot_sorted_by_id() {
        let cache = TaskCache::new();
        cache
            .replace(vec![
                Task::new("C", "").with_id("c"),
                Task::new("A", "").with_id("a"),
                Task::new("B", "").with_id("b"),
            ])
            .await;

        let ids: Vec<String> = cache.snapshot().await.unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_replace_drops_previous_entries() {
        let cache = TaskCache::new();
        let old = Task::new("Old", "");
        cache.put(old.clone()).await;

        cache.replace(Vec::new()).await;
        assert!(cache.is_present().await);
        assert!(cache.get(&old.id).await.is_none());
    }

    #[tokio::test]
    async fn test_remove_completed_and_clear() {
        let cache = TaskCache::new();
        let active = Task::new("Active", "");
        cache
            .replace(vec![active.clone(), Task::new("Done", "").with_completed(true)])
            .await;

        cache.remove_completed().await;
        assert_eq!(cache.snapshot().await.unwrap(), vec![active]);

        cache.clear().await;
        assert!(cache.is_present().await);
        assert_eq!(cache.len().await, 0);
    }
}
