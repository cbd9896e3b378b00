//! Plan summary metrics (KPIs).
//!
//! Computes what a plan would do to the exchange if it were carried out.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total hours | Sum of assigned hours |
//! | Assignments | Number of assigned genes |
//! | Unassigned | Requests with no assignment in the plan |
//! | Hours by provider | Plan hours given per household |
//! | Projected balance | (given + plan given) − (received + plan received) |

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::{Household, HouseholdId, Plan, Request, RequestId};

/// A household's standing after the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedBalance {
    /// Household.
    pub household_id: HouseholdId,
    /// Given hours including the plan.
    pub hours_given: f64,
    /// Received hours including the plan.
    pub hours_received: f64,
    /// `hours_given − hours_received`.
    pub balance: f64,
}

/// Plan performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanKpi {
    /// Sum of assigned hours.
    pub total_hours: f64,
    /// Number of assignments.
    pub assignment_count: usize,
    /// Requests left without an assignment, in request order.
    pub unassigned_requests: Vec<RequestId>,
    /// Plan hours given, per providing household.
    pub hours_by_provider: BTreeMap<HouseholdId, f64>,
    /// Projected balances, in household order.
    pub balances: Vec<ProjectedBalance>,
}

impl PlanKpi {
    /// Computes KPIs for `plan`.
    pub fn calculate(households: &[Household], requests: &[Request], plan: &Plan) -> Self {
        let mut hours_by_provider: BTreeMap<HouseholdId, f64> = BTreeMap::new();
        let mut received_by: BTreeMap<HouseholdId, f64> = BTreeMap::new();
        let mut covered: HashSet<RequestId> = HashSet::new();

        for a in plan.assignments() {
            *hours_by_provider.entry(a.provider_id).or_insert(0.0) += a.hours;
            *received_by.entry(a.recipient_id).or_insert(0.0) += a.hours;
            covered.insert(a.request_id);
        }

        let unassigned_requests = requests
            .iter()
            .filter(|r| !covered.contains(&r.id))
            .map(|r| r.id)
            .collect();

        let balances = households
            .iter()
            .map(|h| {
                let hours_given =
                    h.hours_given + hours_by_provider.get(&h.id).copied().unwrap_or(0.0);
                let hours_received =
                    h.hours_received + received_by.get(&h.id).copied().unwrap_or(0.0);
                ProjectedBalance {
                    household_id: h.id,
                    hours_given,
                    hours_received,
                    balance: hours_given - hours_received,
                }
            })
            .collect();

        Self {
            total_hours: plan.total_hours(),
            assignment_count: plan.assignment_count(),
            unassigned_requests,
            hours_by_provider,
            balances,
        }
    }

    /// Whether every request is assigned.
    pub fn is_complete(&self) -> bool {
        self.unassigned_requests.is_empty()
    }

    /// Largest plan load carried by a single household.
    pub fn max_provider_hours(&self) -> f64 {
        self.hours_by_provider.values().copied().fold(0.0, f64::max)
    }
}
