//! GA-based aid-plan optimization.
//!
//! Searches for a plan that balances three objectives: equilibrium of
//! given vs. received hours, coverage of requests, and fair load across
//! providers. Constraint breaches (dates outside a window, hour cap
//! exceeded) are penalized rather than rejected.
//!
//! # Encoding
//!
//! A plan is a vector of gene slots index-aligned with the request list;
//! each gene names the providing household and the date of the aid.
//!
//! # Submodules
//!
//! - [`candidates`]: eligible provider pool per request
//! - [`builder`]: random plan construction under an optional hour cap
//! - [`fitness`]: weighted multi-objective evaluation
//! - [`operators`]: tournament selection, uniform crossover, mutation
//! - [`runner`]: elitist generational loop
//!
//! # Reference
//! Goldberg (1989), "Genetic Algorithms in Search, Optimization and Machine Learning"

pub mod builder;
pub mod candidates;
pub mod fitness;
pub mod operators;
pub mod runner;

pub use builder::build_plan;
pub use candidates::candidates;
pub use fitness::{evaluate, FitnessDetail, VIOLATION_PENALTY};
pub use operators::{mutate, tournament_select, uniform_crossover, ScoredPlan, TOURNAMENT_SIZE};
pub use runner::{GaOutcome, GaRunner};
