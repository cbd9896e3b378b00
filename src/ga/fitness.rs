//! Plan fitness evaluation.
//!
//! Scores a plan on three normalized sub-metrics and subtracts soft
//! constraint penalties.
//!
//! | Sub-score | Definition |
//! |-----------|-----------|
//! | Equilibrium | 1 / (1 + σ) over household balances (given − received) |
//! | Coverage | distinct requests assigned / total requests |
//! | Load fairness | 1 − max provider hours / total plan hours |
//!
//! Each assignment dated outside its request window, and each assignment
//! that leaves its provider over the hour cap (baseline hours given plus
//! plan hours so far), costs [`VIOLATION_PENALTY`].

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::config::FitnessWeights;
use crate::models::{Household, HouseholdId, Plan, Request, RequestId};

/// Fitness deducted per soft-constraint violation.
pub const VIOLATION_PENALTY: f64 = 0.05;

/// Breakdown of a plan's fitness.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitnessDetail {
    /// Balance equilibrium score in (0, 1].
    pub equilibrium: f64,
    /// Fraction of requests covered, in [0, 1].
    pub coverage: f64,
    /// Load-fairness score in [0, 1].
    pub load_fairness: f64,
    /// Population standard deviation of household balances.
    pub balance_std_dev: f64,
    /// Largest absolute deviation of a balance from the mean balance.
    pub max_imbalance: f64,
    /// 1-based generation at which this plan was found (0 if not from a run).
    pub generation: usize,
}

/// Evaluates `plan` against the baseline household history.
///
/// Household totals are copied into local accumulators; neither the
/// households nor the plan are modified, so evaluating twice yields the
/// same result.
///
/// # Returns
/// `(fitness, detail)` where fitness is the weighted mean of the three
/// sub-scores minus penalties, floored at 0. `detail.generation` is 0.
pub fn evaluate(
    households: &[Household],
    requests: &[Request],
    plan: &Plan,
    weights: &FitnessWeights,
    max_hours_per_household: Option<f64>,
) -> (f64, FitnessDetail) {
    let slot: HashMap<HouseholdId, usize> = households
        .iter()
        .enumerate()
        .map(|(i, h)| (h.id, i))
        .rev()
        .collect();
    let request_by_id: HashMap<RequestId, &Request> =
        requests.iter().rev().map(|r| (r.id, r)).collect();

    let mut given: Vec<f64> = households.iter().map(|h| h.hours_given).collect();
    let mut received: Vec<f64> = households.iter().map(|h| h.hours_received).collect();
    let mut plan_given: BTreeMap<HouseholdId, f64> = BTreeMap::new();
    let mut covered: HashSet<RequestId> = HashSet::new();
    let mut penalty = 0.0;

    for a in plan.assignments() {
        if let Some(&i) = slot.get(&a.provider_id) {
            given[i] += a.hours;
        }
        if let Some(&i) = slot.get(&a.recipient_id) {
            received[i] += a.hours;
        }

        if let Some(request) = request_by_id.get(&a.request_id) {
            covered.insert(a.request_id);
            if !request.window.contains(a.date) {
                penalty += VIOLATION_PENALTY;
            }
        }

        let provided = plan_given.entry(a.provider_id).or_insert(0.0);
        *provided += a.hours;
        // Cap applies to history plus plan; unknown providers only have plan hours.
        let accumulated = slot.get(&a.provider_id).map_or(*provided, |&i| given[i]);
        if max_hours_per_household.is_some_and(|cap| accumulated > cap) {
            penalty += VIOLATION_PENALTY;
        }
    }

    // Equilibrium
    let balances: Vec<f64> = given.iter().zip(&received).map(|(g, r)| g - r).collect();
    let (equilibrium, balance_std_dev, max_imbalance) = if balances.is_empty() {
        (0.0, 0.0, 0.0)
    } else {
        let n = balances.len() as f64;
        let mean = balances.iter().sum::<f64>() / n;
        let variance = balances.iter().map(|b| (b - mean).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();
        let max_dev = balances
            .iter()
            .map(|b| (b - mean).abs())
            .fold(0.0_f64, f64::max);
        (1.0 / (1.0 + std_dev), std_dev, max_dev)
    };

    // Coverage
    let coverage = if requests.is_empty() {
        0.0
    } else {
        covered.len() as f64 / requests.len() as f64
    };

    // Load fairness
    let total_hours: f64 = plan_given.values().sum();
    let max_hours = plan_given.values().copied().fold(0.0_f64, f64::max);
    let load_fairness = if total_hours > 0.0 {
        (1.0 - max_hours / total_hours).clamp(0.0, 1.0)
    } else {
        1.0
    };

    let weighted = (weights.equilibrium * equilibrium
        + weights.coverage * coverage
        + weights.load * load_fairness)
        / weights.total().max(f64::EPSILON);
    let fitness = (weighted - penalty).max(0.0);

    let detail = FitnessDetail {
        equilibrium,
        coverage,
        load_fairness,
        balance_std_dev,
        max_imbalance,
        generation: 0,
    };
    (fitness, detail)
}
