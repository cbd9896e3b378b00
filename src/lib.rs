//! Reciprocal-labor (ayni) aid planning.
//!
//! Allocates help assignments among households organized in communities,
//! given a set of time-bounded help requests. A genetic algorithm balances
//! three objectives: fairness of exchange, coverage of requests and load
//! distribution across helping households.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Household`, `Request`, `TimeWindow`,
//!   `Urgency`, `AidAssignment`, `Plan`
//! - **`validation`**: Input integrity checks (empty sets, duplicate IDs,
//!   unknown households, invalid hours)
//! - **`config`**: Validated optimizer parameters, TOML loading
//! - **`ga`**: Candidate selection, plan builder, fitness, operators, runner
//! - **`scheduler`**: Greedy baseline planner and plan KPIs
//! - **`service`**: Request/response facade for a transport layer
//!
//! # Determinism
//!
//! A run with a fixed seed threads one `ChaCha8Rng` through every random
//! decision and reproduces the same plan, fitness and detail.
//!
//! # References
//!
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and Machine Learning"
//! - Mayer (2002), "The Articulated Peasant: Household Economies in the Andes"

pub mod config;
pub mod ga;
pub mod models;
pub mod scheduler;
pub mod service;
pub mod validation;
