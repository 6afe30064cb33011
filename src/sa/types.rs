//! Engine state types.

/// A task order together with its cost.
///
/// Only the engine constructs solutions, always from a freshly computed
/// cost, so `cost` is never stale.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    order: Vec<usize>,
    cost: f64,
}

impl Solution {
    pub(crate) fn new(order: Vec<usize>, cost: f64) -> Self {
        Self { order, cost }
    }

    /// Permutation of task indices.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn into_order(self) -> Vec<usize> {
        self.order
    }
}

/// Mutable search state of a started engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineState {
    /// Current temperature. Non-increasing.
    pub temperature: f64,

    /// Iterations completed at the current temperature.
    pub iterations_at_temperature: usize,

    /// Iterations completed since `start()`.
    pub global_iteration: usize,

    pub current: Solution,

    /// Lowest-cost solution seen so far.
    pub best: Solution,

    /// Accepted moves, including improving ones.
    pub accepted_moves: usize,

    /// Moves that lowered the current cost.
    pub improving_moves: usize,
}

/// Lifecycle of an engine.
///
/// ```text
/// Idle --start()--> Running --step()--> Finished
///   |                  |
///   | (no tasks)       +--stop()--> Cancelled
///   v
/// Rejected
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// Constructed, `start()` not called yet.
    Idle,
    /// Searching.
    Running(EngineState),
    /// Cooled to `T_min`; the `finish` event has been emitted.
    Finished(EngineState),
    /// Cancelled by the owner before finishing.
    Cancelled(EngineState),
    /// `start()` was called with no tasks; the `error` event has been emitted.
    Rejected,
}

impl Phase {
    pub fn is_running(&self) -> bool {
        matches!(self, Phase::Running(_))
    }

    /// True once no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Phase::Finished(_) | Phase::Cancelled(_) | Phase::Rejected
        )
    }

    /// Search state, if the engine has been started successfully.
    pub fn state(&self) -> Option<&EngineState> {
        match self {
            Phase::Running(s) | Phase::Finished(s) | Phase::Cancelled(s) => Some(s),
            Phase::Idle | Phase::Rejected => None,
        }
    }
}
