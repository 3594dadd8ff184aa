//! Active/completed statistics over a task list

use serde::Serialize;

use super::model::Task;

/// Share of active and completed tasks, in percent
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResult {
    pub active_tasks_percent: f32,
    pub completed_tasks_percent: f32,
}

/// Percentages of active and completed tasks; both zero for an empty list
pub fn active_and_completed_stats(tasks: &[Task]) -> StatsResult {
    if tasks.is_empty() {
        return StatsResult::default();
    }

    let total = tasks.len() as f32;
    let active = tasks.iter().filter(|t| t.is_active()).count() as f32;

    StatsResult {
        active_tasks_percent: 100.0 * active / total,
        completed_tasks_percent: 100.0 * (total - active) / total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(completed: bool) -> Task {
        Task::new("Title", "Description").with_completed(completed)
    }

    #[test]
    fn test_no_completed() {
        let stats = active_and_completed_stats(&[task(false)]);
        assert_eq!(stats.active_tasks_percent, 100.0);
        assert_eq!(stats.completed_tasks_percent, 0.0);
    }

    #[test]
    fn test_no_active() {
        let stats = active_and_completed_stats(&[task(true)]);
        assert_eq!(stats.active_tasks_percent, 0.0);
        assert_eq!(stats.completed_tasks_percent, 100.0);
    }

    #[test]
    fn test_both() {
        let tasks = [task(true), task(true), task(false), task(false), task(false)];
        let stats = active_and_completed_stats(&tasks);
        assert_eq!(stats.active_tasks_percent, 60.0);
        assert_eq!(stats.completed_tasks_percent, 40.0);
    }

    #[test]
    fn test_empty() {
        assert_eq!(active_and_completed_stats(&[]), StatsResult::default());
    }
}
