//! Household model.
//!
//! Households are the participants of the reciprocal-labor exchange. Each
//! belongs to a community and carries running totals of hours it has given
//! to and received from other households.

use serde::{Deserialize, Serialize};

/// Household identifier.
pub type HouseholdId = u64;

/// Community identifier.
pub type CommunityId = u64;

/// A household taking part in the exchange.
///
/// `hours_given` and `hours_received` are a read-only baseline for
/// planning: evaluation adds plan-induced hours on top of them in local
/// accumulators and never writes them back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Household {
    /// Unique household identifier.
    pub id: HouseholdId,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Community the household belongs to.
    pub community_id: CommunityId,
    /// Number of household members.
    #[serde(default)]
    pub members: u32,
    /// Cumulative hours given to other households.
    #[serde(default)]
    pub hours_given: f64,
    /// Cumulative hours received from other households.
    #[serde(default)]
    pub hours_received: f64,
}

impl Household {
    /// Creates a household with no history.
    pub fn new(id: HouseholdId, community_id: CommunityId) -> Self {
        Self {
            id,
            name: String::new(),
            community_id,
            members: 1,
            hours_given: 0.0,
            hours_received: 0.0,
        }
    }

    /// Sets the household name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the member count.
    pub fn with_members(mut self, members: u32) -> Self {
        self.members = members;
        self
    }

    /// Sets the baseline given/received hours.
    pub fn with_history(mut self, hours_given: f64, hours_received: f64) -> Self {
        self.hours_given = hours_given;
        self.hours_received = hours_received;
        self
    }

    /// Baseline balance: given − received.
    ///
    /// Positive means the household has helped more than it was helped.
    #[inline]
    pub fn balance(&self) -> f64 {
        self.hours_given - self.hours_received
    }

    /// Baseline deficit: received − given.
    #[inline]
    pub fn deficit(&self) -> f64 {
        -self.balance()
    }
}
