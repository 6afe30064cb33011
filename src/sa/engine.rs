//! Incremental annealing engine.
//!
//! The engine never loops on its own. Its owner calls [`AnnealingEngine::start`]
//! once and then [`AnnealingEngine::step`] with a batch size until it returns
//! `false`. Small batches keep an embedding event loop responsive; large ones
//! favour throughput. The event log for a given seed is the same whatever
//! batch sizes are used.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace, warn};

use super::config::AnnealConfig;
use super::event::{Event, EventSink};
use super::types::{EngineState, Phase, Solution};
use crate::cost::compute_cost;
use crate::error::SaError;
use crate::neighbour::neighbour;
use crate::task::Task;

/// Simulated-annealing controller for one task list.
///
/// # Examples
///
/// ```
/// use task_anneal::sa::{AnnealConfig, AnnealingEngine, RecordingSink};
/// use task_anneal::Task;
///
/// let tasks = vec![Task::new("A", 2.0, 1.0, 1), Task::new("B", 1.0, 1.0, 5)];
/// let config = AnnealConfig::default().with_seed(42);
/// let mut engine = AnnealingEngine::new(tasks, config, RecordingSink::new());
///
/// engine.start();
/// while engine.step(50) {}
///
/// assert_eq!(engine.best().map(|s| s.order()), Some(&[1, 0][..]));
/// assert!(engine.sink().events.last().is_some_and(|e| e.kind() == "finish"));
/// ```
#[derive(Debug)]
pub struct AnnealingEngine<S, R = StdRng> {
    tasks: Vec<Task>,
    config: AnnealConfig,
    sink: S,
    rng: R,
    phase: Phase,
}

impl<S: EventSink> AnnealingEngine<S, StdRng> {
    /// Creates an engine seeded from `config.seed`, or from a random seed
    /// when none is set.
    ///
    /// `config` is expected to pass [`AnnealConfig::validate`].
    pub fn new(tasks: Vec<Task>, config: AnnealConfig, sink: S) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self::with_rng(tasks, config, sink, StdRng::seed_from_u64(seed))
    }
}

impl<S: EventSink, R: Rng> AnnealingEngine<S, R> {
    /// Creates an engine drawing randomness from `rng`. `config.seed` is
    /// ignored.
    pub fn with_rng(tasks: Vec<Task>, config: AnnealConfig, sink: S, rng: R) -> Self {
        Self {
            tasks,
            config,
            sink,
            rng,
            phase: Phase::Idle,
        }
    }

    /// Seeds the search and enters `Running`.
    ///
    /// With no tasks an `error` event is emitted and the engine becomes
    /// `Rejected`. Calling `start()` on an engine that is not idle does
    /// nothing.
    pub fn start(&mut self) {
        if !matches!(self.phase, Phase::Idle) {
            return;
        }

        if self.tasks.is_empty() {
            warn!("annealing rejected: empty task list");
            self.phase = Phase::Rejected;
            self.sink.receive(Event::Error {
                message: SaError::EmptyInput.to_string(),
            });
            return;
        }

        // Earliest deadline first. A seed for the search, not a solution.
        let mut order: Vec<usize> = (0..self.tasks.len()).collect();
        order.sort_by(|&a, &b| self.tasks[a].deadline.total_cmp(&self.tasks[b].deadline));
        let cost = compute_cost(&order, &self.tasks, &self.config.weights);
        let initial = Solution::new(order, cost);

        debug!(
            tasks = self.tasks.len(),
            t_max = self.config.max_temperature,
            t_min = self.config.min_temperature,
            alpha = self.config.alpha,
            iter_per_t = self.config.iterations_per_temperature,
            initial_cost = cost,
            "annealing started"
        );

        self.phase = Phase::Running(EngineState {
            temperature: self.config.max_temperature,
            iterations_at_temperature: 0,
            global_iteration: 0,
            current: initial.clone(),
            best: initial,
            accepted_moves: 0,
            improving_moves: 0,
        });

        self.sink.receive(Event::Start {
            t_max: self.config.max_temperature,
            t_min: self.config.min_temperature,
            alpha: self.config.alpha,
            iter_per_t: self.config.iterations_per_temperature,
            initial_cost: cost,
        });
    }

    /// Runs up to `batch_size` iterations.
    ///
    /// Returns `false` when the engine is not running. If the temperature
    /// has already reached `T_min`, the engine finishes, emits `finish` and
    /// returns `false`; callers stop stepping after the first `false`.
    pub fn step(&mut self, batch_size: usize) -> bool {
        let Phase::Running(state) = &mut self.phase else {
            return false;
        };

        if state.temperature <= self.config.min_temperature {
            self.finish();
            return false;
        }

        let config = &self.config;
        for _ in 0..batch_size {
            if state.iterations_at_temperature >= config.iterations_per_temperature {
                state.temperature *= config.alpha;
                state.iterations_at_temperature = 0;
                debug!(temperature = state.temperature, "temperature lowered");
                self.sink.receive(Event::TempChange {
                    temperature: state.temperature,
                });

                if state.temperature <= config.min_temperature {
                    // Finish is reported by the next step() call.
                    break;
                }
            }

            let candidate = neighbour(state.current.order(), &mut self.rng);
            let candidate_cost = compute_cost(&candidate, &self.tasks, &config.weights);
            let delta = candidate_cost - state.current.cost();

            // Metropolis acceptance criterion
            let accepted = if delta < 0.0 {
                state.improving_moves += 1;
                true
            } else {
                let probability = (-delta / state.temperature).exp();
                self.rng.random::<f64>() < probability
            };

            if accepted {
                state.current = Solution::new(candidate, candidate_cost);
                state.accepted_moves += 1;
            }

            if state.current.cost() < state.best.cost() {
                state.best = state.current.clone();
            }

            state.global_iteration += 1;
            state.iterations_at_temperature += 1;

            if state.global_iteration.is_multiple_of(config.progress_interval) {
                trace!(
                    iter = state.global_iteration,
                    temperature = state.temperature,
                    current_cost = state.current.cost(),
                    best_cost = state.best.cost(),
                    accepted,
                    "progress"
                );
                self.sink.receive(Event::Progress {
                    iter: state.global_iteration,
                    temperature: state.temperature,
                    current_cost: state.current.cost(),
                    best_cost: state.best.cost(),
                    accepted,
                });
            }
        }

        true
    }

    /// Cooperative cancellation: a running engine becomes `Cancelled` and
    /// ignores further `step()` calls. No event is emitted.
    pub fn stop(&mut self) {
        if !self.phase.is_running() {
            return;
        }
        if let Phase::Running(state) = std::mem::replace(&mut self.phase, Phase::Idle) {
            debug!(iter = state.global_iteration, "annealing cancelled");
            self.phase = Phase::Cancelled(state);
        }
    }

    fn finish(&mut self) {
        let Phase::Running(state) = std::mem::replace(&mut self.phase, Phase::Idle) else {
            return;
        };

        let best_schedule = state
            .best
            .order()
            .iter()
            .map(|&i| self.tasks[i].name.clone())
            .collect();
        let event = Event::Finish {
            best_cost: state.best.cost(),
            best_order: state.best.order().to_vec(),
            best_schedule,
        };

        debug!(
            iterations = state.global_iteration,
            final_temperature = state.temperature,
            best_cost = state.best.cost(),
            "annealing finished"
        );

        self.phase = Phase::Finished(state);
        self.sink.receive(event);
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }

    pub fn state(&self) -> Option<&EngineState> {
        self.phase.state()
    }

    pub fn best(&self) -> Option<&Solution> {
        self.state().map(|s| &s.best)
    }

    pub fn current(&self) -> Option<&Solution> {
        self.state().map(|s| &s.current)
    }

    pub fn temperature(&self) -> Option<f64> {
        self.state().map(|s| s.temperature)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn config(&self) -> &AnnealConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
