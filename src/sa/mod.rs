//! Simulated Annealing (SA) over task orders.
//!
//! A single-solution trajectory metaheuristic inspired by the physical
//! annealing process. Worsening moves are accepted with probability
//! `exp(-delta / T)` (Metropolis criterion); as the temperature `T` cools
//! geometrically the search shifts from exploration to convergence.
//!
//! The [`AnnealingEngine`] is stepped by its owner in batches and reports
//! through a closed set of [`Event`]s. [`SaRunner`] is a ready-made blocking
//! driver.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast
//!   Computing Machines"

mod config;
mod engine;
mod event;
mod runner;
mod types;

pub use config::AnnealConfig;
pub use engine::AnnealingEngine;
#[cfg(feature = "serde")]
pub use event::JsonLinesSink;
pub use event::{Event, EventSink, NullSink, RecordingSink};
pub use runner::{SaResult, SaRunner};
pub use types::{EngineState, Phase, Solution};
