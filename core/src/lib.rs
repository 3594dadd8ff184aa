//! Core library for the todo repository
//!
//! This crate contains the task data layer:
//! - Task model, filtering and statistics
//! - Remote, local and persistent data sources
//! - The cached two-tier task repository

pub mod error;
pub mod task;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
