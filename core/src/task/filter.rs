//! Task list filtering

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::model::Task;
use crate::Error;

/// Which tasks a list view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TasksFilterType {
    #[default]
    All,
    Active,
    Completed,
}

impl TasksFilterType {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => task.is_active(),
            Self::Completed => task.is_completed(),
        }
    }
}

impl FromStr for TasksFilterType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(Error::InvalidInput(format!("unknown filter: {}", other))),
        }
    }
}

/// Keep only the tasks matching `filter`, preserving order
pub fn filter_tasks(tasks: &[Task], filter: TasksFilterType) -> Vec<Task> {
    tasks.iter().filter(|t| filter.matches(t)).cloned().collect()
}
