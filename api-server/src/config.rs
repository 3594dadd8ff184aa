//! Server configuration read from the environment

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use todo_core::task::SERVICE_LATENCY;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `tasks.json`
    pub data_dir: PathBuf,
    pub port: u16,
    /// Simulated read latency of the remote service
    pub remote_latency: Duration,
    /// Start the remote service with the sample tasks
    pub seed_remote: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".todo-data"),
            port: 8081,
            remote_latency: SERVICE_LATENCY,
            seed_remote: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let data_dir = lookup("TODO_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let port = parse_or(&lookup, "TODO_PORT", defaults.port);
        let latency_ms = parse_or(
            &lookup,
            "TODO_REMOTE_LATENCY_MS",
            defaults.remote_latency.as_millis() as u64,
        );
        let seed_remote = lookup("TODO_SEED_REMOTE")
            .and_then(|raw| parse_flag(&raw))
            .unwrap_or(defaults.seed_remote);

        Self {
            data_dir,
            port,
            remote_latency: Duration::from_millis(latency_ms),
            seed_remote,
        }
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.data_dir.join("tasks.json")
    }
}

fn parse_or<T: FromStr + Copy>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> T {
    match lookup(name) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}={:?}, using default", name, raw);
            default
        }),
        None => default,
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.data_dir, PathBuf::from(".todo-data"));
        assert_eq!(config.port, 8081);
        assert_eq!(config.remote_latency, Duration::from_millis(2000));
        assert!(config.seed_remote);
        assert_eq!(config.tasks_path(), PathBuf::from(".todo-data/tasks.json"));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("TODO_DATA_DIR", "/tmp/todo"),
            ("TODO_PORT", "9000"),
            ("TODO_REMOTE_LATENCY_MS", "0"),
            ("TODO_SEED_REMOTE", "off"),
        ]);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/todo"));
        assert_eq!(config.port, 9000);
        assert_eq!(config.remote_latency, Duration::ZERO);
        assert!(!config.seed_remote);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[("TODO_PORT", "eighty"), ("TODO_SEED_REMOTE", "maybe")]);
        assert_eq!(config.port, 8081);
        assert!(config.seed_remote);
    }
}
