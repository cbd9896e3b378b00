//! Greedy baseline planner and plan KPIs.
//!
//! # Algorithm
//!
//! `SimplePlanner` uses a greedy, urgency-driven, largest-deficit-first
//! heuristic. It is not optimal, but provides a fast deterministic
//! baseline next to the genetic optimizer.
//!
//! # KPI
//!
//! `PlanKpi` summarizes a plan: hours, coverage gaps, load per provider
//! and projected household balances.

mod kpi;
mod simple;

pub use kpi::{PlanKpi, ProjectedBalance};
pub use simple::SimplePlanner;
