//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use task_anneal::sa::AnnealConfig;
use task_anneal::CostWeights;

/// Orders tasks by simulated annealing and streams JSON events on stdout.
#[derive(Debug, Parser)]
#[command(name = "task-anneal", version, about)]
pub struct Cli {
    /// JSON file holding an array of `{name, deadline, duration, difficulty}`.
    #[arg(env = "TASK_ANNEAL_TASKS")]
    pub tasks_file: PathBuf,

    /// Starting temperature.
    #[arg(long, env = "TASK_ANNEAL_T_MAX", default_value_t = 100.0)]
    pub t_max: f64,

    /// Temperature at which the run finishes.
    #[arg(long, env = "TASK_ANNEAL_T_MIN", default_value_t = 0.1)]
    pub t_min: f64,

    /// Geometric cooling factor in (0, 1).
    #[arg(long, env = "TASK_ANNEAL_ALPHA", default_value_t = 0.95)]
    pub alpha: f64,

    /// Iterations per temperature level.
    #[arg(long, env = "TASK_ANNEAL_ITER_PER_T", default_value_t = 10)]
    pub iter_per_t: usize,

    /// Iterations per engine step.
    #[arg(long, env = "TASK_ANNEAL_BATCH_SIZE", default_value_t = 50)]
    pub batch_size: usize,

    /// Emit a progress event every N iterations.
    #[arg(long, env = "TASK_ANNEAL_PROGRESS_INTERVAL", default_value_t = 50)]
    pub progress_interval: usize,

    /// Lateness weight.
    #[arg(long, env = "TASK_ANNEAL_W_DEADLINE", default_value_t = 5.0)]
    pub w_deadline: f64,

    /// Lateness-times-difficulty weight.
    #[arg(long, env = "TASK_ANNEAL_W_DIFFICULTY", default_value_t = 2.5)]
    pub w_difficulty: f64,

    /// Total schedule length weight.
    #[arg(long, env = "TASK_ANNEAL_W_MAKESPAN", default_value_t = 0.05)]
    pub w_makespan: f64,

    /// Random seed for a reproducible run.
    #[arg(long, env = "TASK_ANNEAL_SEED")]
    pub seed: Option<u64>,

    /// Milliseconds to sleep between steps.
    #[arg(long, env = "TASK_ANNEAL_PAUSE_MS", default_value_t = 0)]
    pub pause_ms: u64,

    /// Log the best schedule, task by task, when the run finishes.
    #[arg(long)]
    pub report: bool,

    /// Log level (overrides TASK_ANNEAL_LOG).
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Cli {
    pub fn anneal_config(&self) -> AnnealConfig {
        let mut config = AnnealConfig::default()
            .with_max_temperature(self.t_max)
            .with_min_temperature(self.t_min)
            .with_alpha(self.alpha)
            .with_iterations_per_temperature(self.iter_per_t)
            .with_batch_size(self.batch_size)
            .with_progress_interval(self.progress_interval)
            .with_weights(CostWeights {
                deadline: self.w_deadline,
                difficulty: self.w_difficulty,
                makespan: self.w_makespan,
            });
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}
