//! Blocking drivers for the annealing engine.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use super::config::AnnealConfig;
use super::engine::AnnealingEngine;
use super::event::{Event, EventSink, NullSink};
use super::types::Phase;
use crate::error::SaError;
use crate::task::Task;

/// Result of a completed (or cancelled) annealing run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SaResult {
    /// The best order found.
    pub best_order: Vec<usize>,

    /// Cost of the best order.
    pub best_cost: f64,

    /// Task names in `best_order` order.
    pub best_schedule: Vec<String>,

    /// Total number of iterations (neighbour evaluations).
    pub iterations: usize,

    /// Temperature when the run stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of improving moves.
    pub improving_moves: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// `(iteration, best cost)` at start, at every progress event, and at
    /// the final iteration.
    pub cost_history: Vec<(usize, f64)>,
}

/// Forwards events to the caller's sink while sampling the best cost.
struct HistorySink<'a, S: ?Sized> {
    inner: &'a mut S,
    history: Vec<(usize, f64)>,
}

impl<S: EventSink + ?Sized> EventSink for HistorySink<'_, S> {
    fn receive(&mut self, event: Event) {
        match &event {
            Event::Start { initial_cost, .. } => self.history.push((0, *initial_cost)),
            Event::Progress {
                iter, best_cost, ..
            } => self.history.push((*iter, *best_cost)),
            _ => {}
        }
        self.inner.receive(event);
    }
}

/// Drives an [`AnnealingEngine`] to completion on the calling thread.
pub struct SaRunner;

impl SaRunner {
    /// Runs the optimization, forwarding every event to `sink`.
    pub fn run<S: EventSink + ?Sized>(
        tasks: &[Task],
        config: &AnnealConfig,
        sink: &mut S,
    ) -> Result<SaResult, SaError> {
        Self::run_with_cancel(tasks, config, sink, None)
    }

    /// Runs the optimization without observing events.
    pub fn run_silent(tasks: &[Task], config: &AnnealConfig) -> Result<SaResult, SaError> {
        Self::run(tasks, config, &mut NullSink)
    }

    /// Runs with an optional cancellation token, checked between batches.
    ///
    /// A cancelled run returns the best solution found so far with
    /// `cancelled` set; no `finish` event is emitted.
    pub fn run_with_cancel<S: EventSink + ?Sized>(
        tasks: &[Task],
        config: &AnnealConfig,
        sink: &mut S,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SaResult, SaError> {
        config.validate()?;

        let history = HistorySink {
            inner: sink,
            history: Vec::new(),
        };
        let mut engine = AnnealingEngine::new(tasks.to_vec(), config.clone(), history);
        engine.start();

        let mut cancelled = false;
        loop {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    engine.stop();
                    cancelled = true;
                    break;
                }
            }
            if !engine.step(config.batch_size) {
                break;
            }
        }

        let state = match engine.phase() {
            Phase::Finished(state) | Phase::Cancelled(state) => state.clone(),
            Phase::Rejected | Phase::Idle | Phase::Running(_) => return Err(SaError::EmptyInput),
        };
        let best_schedule = state
            .best
            .order()
            .iter()
            .map(|&i| tasks[i].name.clone())
            .collect();

        let mut cost_history = engine.into_sink().history;
        let best_cost = state.best.cost();
        if cost_history
            .last()
            .is_none_or(|&(iter, _)| iter != state.global_iteration)
        {
            cost_history.push((state.global_iteration, best_cost));
        }

        debug!(
            iterations = state.global_iteration,
            best_cost, cancelled, "annealing run complete"
        );

        Ok(SaResult {
            best_order: state.best.into_order(),
            best_cost,
            best_schedule,
            iterations: state.global_iteration,
            final_temperature: state.temperature,
            accepted_moves: state.accepted_moves,
            improving_moves: state.improving_moves,
            cancelled,
            cost_history,
        })
    }

    /// Runs `starts` independent searches in parallel and keeps the best.
    ///
    /// Start `k` is seeded with `seed + k` (a random base seed when
    /// `config.seed` is unset), so results are reproducible for a fixed seed.
    #[cfg(feature = "parallel")]
    pub fn run_multi_start(
        tasks: &[Task],
        config: &AnnealConfig,
        starts: usize,
    ) -> Result<SaResult, SaError> {
        use rayon::prelude::*;

        config.validate()?;
        let base = config.seed.unwrap_or_else(rand::random);

        let results: Vec<Result<SaResult, SaError>> = (0..starts.max(1))
            .into_par_iter()
            .map(|k| {
                let config = config.clone().with_seed(base.wrapping_add(k as u64));
                Self::run_silent(tasks, &config)
            })
            .collect();

        let mut best: Option<SaResult> = None;
        for result in results {
            let result = result?;
            if best.as_ref().is_none_or(|b| result.best_cost < b.best_cost) {
                best = Some(result);
            }
        }
        best.ok_or(SaError::EmptyInput)
    }
}
