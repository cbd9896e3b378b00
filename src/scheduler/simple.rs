//! Greedy urgency-driven baseline planner.
//!
//! # Algorithm
//!
//! 1. Order requests by urgency (High first), keeping input order within
//!    the same urgency.
//! 2. For each request, take the candidate pool and pick the household
//!    with the largest deficit (received − given), counting the hours it
//!    has already been given in this plan.
//! 3. Date the aid at the midpoint of the request window.
//!
//! It is not optimal, but gives a fast, deterministic plan to compare the
//! genetic optimizer against or to fall back on.
//!
//! # Complexity
//! O(r log r + r · h log h) where r = requests, h = households.

use std::collections::HashMap;

use crate::ga::candidates;
use crate::models::{AidAssignment, Household, HouseholdId, Plan, Request};

/// Greedy baseline planner.
///
/// # Example
///
/// ```
/// use ayni_plan::models::{Household, Request, TimeWindow};
/// use ayni_plan::scheduler::SimplePlanner;
/// use chrono::{Duration, Utc};
///
/// let start = Utc::now();
/// let window = TimeWindow::new(start, start + Duration::days(2));
/// let households = vec![
///     Household::new(1, 10).with_history(0.0, 6.0),
///     Household::new(2, 10),
///     Household::new(3, 10).with_history(0.0, 2.0),
/// ];
/// let requests = vec![Request::new(1, 2, "SOWING", 4.0, window)];
///
/// let plan = SimplePlanner::new().plan(&households, &requests);
/// // Household 1 owes the most hours, so it helps first.
/// assert_eq!(plan.assignments().next().map(|a| a.provider_id), Some(1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimplePlanner;

impl SimplePlanner {
    /// Creates a new planner.
    pub fn new() -> Self {
        Self
    }

    /// Builds a plan. Gene slots follow the input request order.
    pub fn plan(&self, households: &[Household], requests: &[Request]) -> Plan {
        let mut genes: Vec<Option<AidAssignment>> = vec![None; requests.len()];
        let mut given_in_plan: HashMap<HouseholdId, f64> = HashMap::new();

        for idx in urgency_order(requests) {
            let request = &requests[idx];
            let deficit = |h: &Household| {
                h.deficit() - given_in_plan.get(&h.id).copied().unwrap_or(0.0)
            };

            let mut pool = candidates(request, households);
            // Stable: equal deficits keep candidate order.
            pool.sort_by(|a, b| deficit(*b).total_cmp(&deficit(*a)));
            let Some(provider) = pool.first() else {
                continue;
            };

            *given_in_plan.entry(provider.id).or_insert(0.0) += request.estimated_hours;
            genes[idx] = Some(AidAssignment::for_request(
                request,
                provider.id,
                request.window.midpoint(),
            ));
        }

        Plan::from_genes(genes)
    }
}

/// Request indices, most urgent first.
fn urgency_order(requests: &[Request]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..requests.len()).collect();
    order.sort_by(|&a, &b| requests[b].urgency.cmp(&requests[a].urgency));
    order
}
