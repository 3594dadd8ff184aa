//! Task module
//!
//! This module contains the task model, the data sources and the repository.

mod cache;
mod dao;
mod data_source;
mod default_repository;
mod file_store;
mod filter;
mod local;
mod model;
mod remote;
mod repository;
mod statistics;

pub use dao::TasksDao;
pub use data_source::TasksDataSource;
pub use default_repository::DefaultTasksRepository;
pub use file_store::FileTaskStore;
pub use filter::{filter_tasks, TasksFilterType};
pub use local::LocalTasksDataSource;
pub use model::*;
pub use remote::{sample_tasks, RemoteTasksDataSource, SERVICE_LATENCY};
pub use repository::{TasksRepository, WriteOutcome, WriteStatus};
pub use statistics::{active_and_completed_stats, StatsResult};
