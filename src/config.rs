//! Optimizer configuration.
//!
//! [`ParameterSpec`] is the raw, defaultable parameter record as it arrives
//! from a caller or a TOML file. [`GaParameters`] is the validated,
//! immutable form the optimizer consumes; the only way to obtain one is
//! through [`ParameterSpec::validate`] (directly, via `TryFrom`, or by
//! deserializing a `GaParameters`, which runs the same checks).
//!
//! # Example
//!
//! ```
//! use ayni_plan::config::{GaParameters, ParameterSpec};
//!
//! let params = ParameterSpec::default()
//!     .with_population_size(10)
//!     .with_seed(42)
//!     .validate()
//!     .unwrap();
//! assert_eq!(params.population_size(), 10);
//!
//! let from_toml = GaParameters::from_toml_str("maxGenerations = 5").unwrap();
//! assert_eq!(from_toml.max_generations(), 5);
//! assert_eq!(from_toml.population_size(), 30);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parameter range violation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("population size must be at least 2, got {0}")]
    PopulationTooSmall(usize),

    #[error("max generations must be at least 1")]
    NoGenerations,

    #[error("{name} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error("{name} must be a non-negative number, got {value}")]
    NegativeWeight { name: &'static str, value: f64 },

    #[error("max hours per household must be a non-negative number, got {0}")]
    NegativeHourCap(f64),
}

/// Configuration loading error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ParameterError),
}

/// Relative importance of the three fitness sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessWeights {
    /// Weight of the equilibrium (given vs. received balance) score.
    pub equilibrium: f64,
    /// Weight of the request coverage score.
    pub coverage: f64,
    /// Weight of the load-fairness score.
    pub load: f64,
}

impl FitnessWeights {
    /// Creates a weight triple.
    pub fn new(equilibrium: f64, coverage: f64, load: f64) -> Self {
        Self {
            equilibrium,
            coverage,
            load,
        }
    }

    /// All three sub-scores weighted equally.
    pub fn equal() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    /// Sum of the weights.
    #[inline]
    pub fn total(&self) -> f64 {
        self.equilibrium + self.coverage + self.load
    }
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self::new(0.5, 0.3, 0.2)
    }
}

/// Unvalidated optimizer parameters.
///
/// Every field has a default, so partial documents deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParameterSpec {
    /// Plans per generation (≥ 2).
    pub population_size: usize,
    /// Generations to run (≥ 1).
    pub max_generations: usize,
    /// Probability that two parents are crossed instead of cloned.
    pub crossover_probability: f64,
    /// Per-gene mutation probability.
    pub mutation_probability: f64,
    /// Equilibrium weight.
    pub equilibrium_weight: f64,
    /// Coverage weight.
    pub coverage_weight: f64,
    /// Load-fairness weight.
    pub load_weight: f64,
    /// Soft cap on plan hours given by any single household.
    pub max_hours_per_household: Option<f64>,
    /// Random seed; `None` runs non-deterministically.
    pub seed: Option<u64>,
}

impl Default for ParameterSpec {
    fn default() -> Self {
        let weights = FitnessWeights::default();
        Self {
            population_size: 30,
            max_generations: 50,
            crossover_probability: 0.7,
            mutation_probability: 0.1,
            equilibrium_weight: weights.equilibrium,
            coverage_weight: weights.coverage,
            load_weight: weights.load,
            max_hours_per_household: None,
            seed: None,
        }
    }
}

impl ParameterSpec {
    /// Sets the population size.
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    /// Sets the generation budget.
    pub fn with_max_generations(mut self, max_generations: usize) -> Self {
        self.max_generations = max_generations;
        self
    }

    /// Sets the crossover probability.
    pub fn with_crossover_probability(mut self, p: f64) -> Self {
        self.crossover_probability = p;
        self
    }

    /// Sets the per-gene mutation probability.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p;
        self
    }

    /// Sets all three fitness weights.
    pub fn with_weights(mut self, weights: FitnessWeights) -> Self {
        self.equilibrium_weight = weights.equilibrium;
        self.coverage_weight = weights.coverage;
        self.load_weight = weights.load;
        self
    }

    /// Sets the per-household hour cap.
    pub fn with_max_hours_per_household(mut self, hours: f64) -> Self {
        self.max_hours_per_household = Some(hours);
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks every range constraint and freezes the parameters.
    pub fn validate(self) -> Result<GaParameters, ParameterError> {
        if self.population_size < 2 {
            return Err(ParameterError::PopulationTooSmall(self.population_size));
        }
        if self.max_generations < 1 {
            return Err(ParameterError::NoGenerations);
        }
        check_probability("crossover probability", self.crossover_probability)?;
        check_probability("mutation probability", self.mutation_probability)?;
        check_weight("equilibrium weight", self.equilibrium_weight)?;
        check_weight("coverage weight", self.coverage_weight)?;
        check_weight("load weight", self.load_weight)?;
        if let Some(cap) = self.max_hours_per_household {
            if cap.is_nan() || cap < 0.0 {
                return Err(ParameterError::NegativeHourCap(cap));
            }
        }

        Ok(GaParameters {
            population_size: self.population_size,
            max_generations: self.max_generations,
            crossover_probability: self.crossover_probability,
            mutation_probability: self.mutation_probability,
            weights: FitnessWeights::new(
                self.equilibrium_weight,
                self.coverage_weight,
                self.load_weight,
            ),
            max_hours_per_household: self.max_hours_per_household,
            seed: self.seed,
        })
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ParameterError> {
    // NaN fails the range test as well
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ParameterError::ProbabilityOutOfRange { name, value })
    }
}

fn check_weight(name: &'static str, value: f64) -> Result<(), ParameterError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ParameterError::NegativeWeight { name, value })
    }
}

/// Validated, immutable optimizer parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ParameterSpec", into = "ParameterSpec")]
pub struct GaParameters {
    population_size: usize,
    max_generations: usize,
    crossover_probability: f64,
    mutation_probability: f64,
    weights: FitnessWeights,
    max_hours_per_household: Option<f64>,
    seed: Option<u64>,
}

impl GaParameters {
    /// Loads parameters from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses parameters from a TOML string. Missing keys take defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let spec: ParameterSpec = toml::from_str(s)?;
        Ok(spec.validate()?)
    }

    /// Plans per generation.
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// Generation budget.
    pub fn max_generations(&self) -> usize {
        self.max_generations
    }

    /// Crossover probability.
    pub fn crossover_probability(&self) -> f64 {
        self.crossover_probability
    }

    /// Per-gene mutation probability.
    pub fn mutation_probability(&self) -> f64 {
        self.mutation_probability
    }

    /// Fitness weights.
    pub fn weights(&self) -> FitnessWeights {
        self.weights
    }

    /// Optional per-household hour cap.
    pub fn max_hours_per_household(&self) -> Option<f64> {
        self.max_hours_per_household
    }

    /// Optional random seed.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Default for GaParameters {
    fn default() -> Self {
        let spec = ParameterSpec::default();
        Self {
            population_size: spec.population_size,
            max_generations: spec.max_generations,
            crossover_probability: spec.crossover_probability,
            mutation_probability: spec.mutation_probability,
            weights: FitnessWeights::default(),
            max_hours_per_household: None,
            seed: None,
        }
    }
}

impl TryFrom<ParameterSpec> for GaParameters {
    type Error = ParameterError;

    fn try_from(spec: ParameterSpec) -> Result<Self, Self::Error> {
        spec.validate()
    }
}

impl From<GaParameters> for ParameterSpec {
    fn from(params: GaParameters) -> Self {
        Self {
            population_size: params.population_size,
            max_generations: params.max_generations,
            crossover_probability: params.crossover_probability,
            mutation_probability: params.mutation_probability,
            equilibrium_weight: params.weights.equilibrium,
            coverage_weight: params.weights.coverage,
            load_weight: params.weights.load,
            max_hours_per_household: params.max_hours_per_household,
            seed: params.seed,
        }
    }
}
