//! Crate-wide error types.

use thiserror::Error;

/// A task record violating the ranges the cost model assumes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TaskError {
    #[error("task name must not be empty")]
    EmptyName,

    #[error("task `{name}`: deadline must be a finite, non-negative number of hours, got {value}")]
    InvalidDeadline { name: String, value: f64 },

    #[error("task `{name}`: duration must be a finite, non-negative number of hours, got {value}")]
    InvalidDuration { name: String, value: f64 },

    #[error("task `{name}`: difficulty must be in 1..=5, got {value}")]
    DifficultyOutOfRange { name: String, value: u8 },

    #[error("task #{index}: {source}")]
    AtIndex {
        index: usize,
        #[source]
        source: Box<TaskError>,
    },
}

/// An annealing configuration that cannot drive a terminating search.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("T_max must be positive, got {0}")]
    NonPositiveMaxTemperature(f64),

    #[error("T_min must be positive, got {0}")]
    NonPositiveMinTemperature(f64),

    #[error("T_min ({t_min}) must be less than T_max ({t_max})")]
    MinNotBelowMax { t_min: f64, t_max: f64 },

    #[error("alpha must be in (0, 1), got {0}")]
    AlphaOutOfRange(f64),

    #[error("iter_per_T must be at least 1")]
    ZeroIterationsPerTemperature,

    #[error("progress interval must be at least 1")]
    ZeroProgressInterval,

    #[error("batch size must be at least 1")]
    ZeroBatchSize,

    #[error("cost weight `{name}` must be finite and non-negative, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },
}

/// Failure of a run driven by [`SaRunner`](crate::sa::SaRunner).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SaError {
    #[error("there are no tasks to optimize")]
    EmptyInput,

    #[error("invalid annealing configuration: {0}")]
    Config(#[from] ConfigError),
}
