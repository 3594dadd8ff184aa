//! Application state

use std::path::PathBuf;
use std::sync::Arc;

use todo_core::task::{
    DefaultTasksRepository, FileTaskStore, LocalTasksDataSource, RemoteTasksDataSource,
    TasksRepository,
};

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    repository: Arc<dyn TasksRepository>,
    data_dir: PathBuf,
}

impl AppState {
    /// Wire the remote service, the on-disk store and the repository
    pub async fn new(config: &Config) -> todo_core::Result<Self> {
        let store = FileTaskStore::new(config.tasks_path()).await?;
        let local = LocalTasksDataSource::new(Arc::new(store));

        let remote = if config.seed_remote {
            RemoteTasksDataSource::seeded()
        } else {
            RemoteTasksDataSource::new(Vec::new())
        }
        .with_latency(config.remote_latency);

        let repository = DefaultTasksRepository::new(Arc::new(remote), Arc::new(local));
        Ok(Self::with_repository(
            Arc::new(repository),
            config.data_dir.clone(),
        ))
    }

    /// Build state around an existing repository
    pub fn with_repository(repository: Arc<dyn TasksRepository>, data_dir: PathBuf) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                repository,
                data_dir,
            }),
        }
    }

    pub fn repository(&self) -> &dyn TasksRepository {
        self.inner.repository.as_ref()
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.inner.data_dir
    }
}
