//! Task ordering by simulated annealing.
//!
//! Orders a list of tasks, each with a deadline, a duration and a
//! difficulty rating, to minimize a weighted penalty of lateness amplified
//! by difficulty, plus a small makespan term.
//!
//! - [`cost`]: the schedule cost model and per-task breakdown.
//! - [`neighbour`]: swap / segment-reverse / relocate perturbations.
//! - [`sa`]: the incremental annealing engine, its event stream and a
//!   blocking runner.
//!
//! # Example
//!
//! ```
//! use task_anneal::sa::{AnnealConfig, SaRunner};
//! use task_anneal::Task;
//!
//! let tasks = vec![
//!     Task::new("essay", 6.0, 3.0, 4),
//!     Task::new("quiz prep", 2.0, 1.0, 2),
//!     Task::new("laundry", 24.0, 0.5, 1),
//! ];
//! let result = SaRunner::run_silent(&tasks, &AnnealConfig::default().with_seed(1)).unwrap();
//! assert_eq!(result.best_schedule[0], "quiz prep");
//! ```

pub mod cost;
pub mod error;
pub mod neighbour;
pub mod sa;
pub mod task;

pub use cost::{compute_cost, schedule, CostWeights, ScheduledTask};
pub use error::{ConfigError, SaError, TaskError};
pub use task::{validate_tasks, Task};
