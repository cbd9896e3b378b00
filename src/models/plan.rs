//! Plan (solution) model.
//!
//! A plan resolves help requests into concrete aid assignments: who helps
//! whom, for which request, on which date and for how many hours.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{HouseholdId, Request, RequestId};

/// One resolved aid: `provider` helps `recipient` on `date`.
///
/// This is the gene of the genetic optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AidAssignment {
    /// Household giving the help.
    pub provider_id: HouseholdId,
    /// Household receiving the help (the requester).
    pub recipient_id: HouseholdId,
    /// Source request.
    pub request_id: RequestId,
    /// Task tag copied from the request.
    pub task_type: String,
    /// Date the help takes place.
    pub date: DateTime<Utc>,
    /// Hours copied from the request estimate.
    pub hours: f64,
}

impl AidAssignment {
    /// Creates an assignment fulfilling `request` by `provider_id` on `date`.
    pub fn for_request(request: &Request, provider_id: HouseholdId, date: DateTime<Utc>) -> Self {
        Self {
            provider_id,
            recipient_id: request.household_id,
            request_id: request.id,
            task_type: request.task_type.clone(),
            date,
            hours: request.estimated_hours,
        }
    }

    /// Whether the provider is helping itself.
    #[inline]
    pub fn is_self_help(&self) -> bool {
        self.provider_id == self.recipient_id
    }
}

/// A candidate plan (individual).
///
/// Genes are index-aligned with the request list the plan was built from;
/// `None` marks a request that had no eligible provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// One slot per request.
    pub genes: Vec<Option<AidAssignment>>,
}

impl Plan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a plan from gene slots.
    pub fn from_genes(genes: Vec<Option<AidAssignment>>) -> Self {
        Self { genes }
    }

    /// Number of gene slots (assigned or not).
    #[inline]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the plan has no gene slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Iterates over the assigned genes in slot order.
    pub fn assignments(&self) -> impl Iterator<Item = &AidAssignment> {
        self.genes.iter().flatten()
    }

    /// Number of assigned genes.
    pub fn assignment_count(&self) -> usize {
        self.assignments().count()
    }

    /// Total planned hours.
    pub fn total_hours(&self) -> f64 {
        self.assignments().map(|a| a.hours).sum()
    }

    /// Consumes the plan, returning its assignments in slot order.
    pub fn into_assignments(self) -> Vec<AidAssignment> {
        self.genes.into_iter().flatten().collect()
    }
}
