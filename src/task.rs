//! Task records and their input preconditions.
//!
//! The optimizer itself never inspects field ranges: a task list is only
//! checked for emptiness. Callers that accept tasks from users or files
//! should run [`validate_tasks`] before handing the list to an engine.

use crate::error::TaskError;

/// A unit of work to be ordered.
///
/// Deadlines and durations are expressed in hours, with deadlines measured
/// from "now" (time 0 of the simulated schedule).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Task {
    /// Display name. Names need not be unique.
    pub name: String,

    /// Hours from now by which the task should be finished.
    pub deadline: f64,

    /// Hours of work the task takes.
    pub duration: f64,

    /// Difficulty rating in `1..=5`. Amplifies the lateness penalty.
    pub difficulty: u8,
}

impl Task {
    pub fn new(name: impl Into<String>, deadline: f64, duration: f64, difficulty: u8) -> Self {
        Self {
            name: name.into(),
            deadline,
            duration,
            difficulty,
        }
    }

    /// Checks the field ranges the cost model assumes.
    pub fn validate(&self) -> Result<(), TaskError> {
        if self.name.trim().is_empty() {
            return Err(TaskError::EmptyName);
        }
        if !self.deadline.is_finite() || self.deadline < 0.0 {
            return Err(TaskError::InvalidDeadline {
                name: self.name.clone(),
                value: self.deadline,
            });
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(TaskError::InvalidDuration {
                name: self.name.clone(),
                value: self.duration,
            });
        }
        if !(1..=5).contains(&self.difficulty) {
            return Err(TaskError::DifficultyOutOfRange {
                name: self.name.clone(),
                value: self.difficulty,
            });
        }
        Ok(())
    }
}

/// Validates every task, reporting the first violation with its position.
pub fn validate_tasks(tasks: &[Task]) -> Result<(), TaskError> {
    for (index, task) in tasks.iter().enumerate() {
        task.validate().map_err(|source| TaskError::AtIndex {
            index,
            source: Box::new(source),
        })?;
    }
    Ok(())
}
