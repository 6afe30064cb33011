//! Annealing configuration.

use crate::cost::CostWeights;
use crate::error::ConfigError;

/// Configuration for an annealing run.
///
/// Cooling is geometric: every `iterations_per_temperature` iterations the
/// temperature is multiplied by `alpha`, and the run finishes once it drops
/// to `min_temperature` or below.
///
/// # Examples
///
/// ```
/// use task_anneal::sa::AnnealConfig;
///
/// let config = AnnealConfig::default()
///     .with_max_temperature(50.0)
///     .with_min_temperature(0.01)
///     .with_alpha(0.98)
///     .with_iterations_per_temperature(20)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AnnealConfig {
    /// Starting temperature (`T_max`). Higher values allow more exploration.
    pub max_temperature: f64,

    /// Terminal temperature (`T_min`).
    pub min_temperature: f64,

    /// Geometric cooling factor in (0, 1). Higher = slower cooling.
    pub alpha: f64,

    /// Number of iterations at each temperature level (`iter_per_T`).
    pub iterations_per_temperature: usize,

    /// A `progress` event is emitted whenever the global iteration count is
    /// a multiple of this value.
    pub progress_interval: usize,

    /// Iterations per `step()` call used by the bundled drivers.
    pub batch_size: usize,

    /// Objective weights.
    pub weights: CostWeights,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            max_temperature: 100.0,
            min_temperature: 0.1,
            alpha: 0.95,
            iterations_per_temperature: 10,
            progress_interval: 50,
            batch_size: 50,
            weights: CostWeights::default(),
            seed: None,
        }
    }
}

impl AnnealConfig {
    pub fn with_max_temperature(mut self, t: f64) -> Self {
        self.max_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_progress_interval(mut self, n: usize) -> Self {
        self.progress_interval = n;
        self
    }

    pub fn with_batch_size(mut self, n: usize) -> Self {
        self.batch_size = n;
        self
    }

    pub fn with_weights(mut self, weights: CostWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of cooling steps a run takes before finishing.
    ///
    /// Returns 0 when cooling would never terminate (`alpha` outside (0, 1)
    /// or a non-positive `T_min`).
    pub fn temperature_levels(&self) -> usize {
        if !(self.alpha > 0.0 && self.alpha < 1.0) || !(self.min_temperature > 0.0) {
            return 0;
        }
        let mut t = self.max_temperature;
        let mut levels = 0;
        while t > self.min_temperature {
            t *= self.alpha;
            levels += 1;
        }
        levels
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_temperature > 0.0) {
            return Err(ConfigError::NonPositiveMaxTemperature(self.max_temperature));
        }
        if !(self.min_temperature > 0.0) {
            return Err(ConfigError::NonPositiveMinTemperature(self.min_temperature));
        }
        if self.min_temperature >= self.max_temperature {
            return Err(ConfigError::MinNotBelowMax {
                t_min: self.min_temperature,
                t_max: self.max_temperature,
            });
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(ConfigError::AlphaOutOfRange(self.alpha));
        }
        if self.iterations_per_temperature == 0 {
            return Err(ConfigError::ZeroIterationsPerTemperature);
        }
        if self.progress_interval == 0 {
            return Err(ConfigError::ZeroProgressInterval);
        }
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        for (name, value) in [
            ("deadline", self.weights.deadline),
            ("difficulty", self.weights.difficulty),
            ("makespan", self.weights.makespan),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }
}
