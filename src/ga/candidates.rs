//! Provider candidate selection.
//!
//! Households sharing the requester's community are preferred; when none
//! exist the pool widens to every other household. The requester only
//! helps itself when it is the sole household available.

use crate::models::{Household, Request};

/// Returns the households eligible to provide aid for `request`.
///
/// Order follows `households` so that a seeded run stays reproducible;
/// callers that want a random order shuffle the result themselves.
///
/// # Rules
/// 1. The requesting household is excluded.
/// 2. If the requester's community resolves and other members exist,
///    they are the whole pool.
/// 3. Otherwise every other household is eligible.
/// 4. If there is no other household, the requester itself is returned.
///
/// The result is empty only when no household at all is available.
pub fn candidates<'a>(request: &Request, households: &'a [Household]) -> Vec<&'a Household> {
    let requester_id = request.household_id;
    let requester = households.iter().find(|h| h.id == requester_id);
    let others: Vec<&Household> = households.iter().filter(|h| h.id != requester_id).collect();

    if let Some(requester) = requester {
        let local: Vec<&Household> = others
            .iter()
            .copied()
            .filter(|h| h.community_id == requester.community_id)
            .collect();
        if !local.is_empty() {
            return local;
        }
    }

    if !others.is_empty() {
        return others;
    }

    requester.into_iter().collect()
}
