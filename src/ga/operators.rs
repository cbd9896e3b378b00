//! Genetic operators over whole plans.
//!
//! - [`tournament_select`]: best of a small random sample
//! - [`uniform_crossover`]: independent per-slot coin flips
//! - [`mutate`]: per-gene provider reassignment with date repair
//!
//! # Reference
//! Goldberg (1989), "Genetic Algorithms in Search, Optimization and Machine Learning"

use rand::Rng;
use rand::prelude::IndexedRandom;
use rand::seq::index;

use super::candidates::candidates;
use super::fitness::FitnessDetail;
use crate::models::{AidAssignment, Household, Plan, Request};

/// Plans drawn per tournament.
pub const TOURNAMENT_SIZE: usize = 3;

/// A plan together with its evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPlan {
    /// The plan.
    pub plan: Plan,
    /// Scalar fitness (higher = better).
    pub fitness: f64,
    /// Fitness breakdown.
    pub detail: FitnessDetail,
}

/// Tournament selection.
///
/// Samples `min(TOURNAMENT_SIZE, len)` plans without replacement and
/// returns the fittest; ties go to the earlier draw. Returns `None` only
/// for an empty population.
pub fn tournament_select<'a, R: Rng>(
    scored: &'a [ScoredPlan],
    rng: &mut R,
) -> Option<&'a ScoredPlan> {
    let amount = TOURNAMENT_SIZE.min(scored.len());
    let mut winner: Option<&ScoredPlan> = None;
    for i in index::sample(rng, scored.len(), amount) {
        let contender = &scored[i];
        match winner {
            Some(best) if contender.fitness <= best.fitness => {}
            _ => winner = Some(contender),
        }
    }
    winner
}

/// Uniform crossover.
///
/// Walks every slot up to the longer parent. Where both parents carry a
/// gene, a fair coin picks one; where only one does, that gene is taken.
pub fn uniform_crossover<R: Rng>(parent_a: &Plan, parent_b: &Plan, rng: &mut R) -> Plan {
    let len = parent_a.len().max(parent_b.len());
    let genes = (0..len)
        .map(|i| match (gene_at(parent_a, i), gene_at(parent_b, i)) {
            (Some(a), Some(b)) => {
                if rng.random_bool(0.5) {
                    Some(a.clone())
                } else {
                    Some(b.clone())
                }
            }
            (Some(only), None) | (None, Some(only)) => Some(only.clone()),
            (None, None) => None,
        })
        .collect();
    Plan::from_genes(genes)
}

fn gene_at(plan: &Plan, i: usize) -> Option<&AidAssignment> {
    plan.genes.get(i).and_then(Option::as_ref)
}

/// Per-gene mutation.
///
/// Each assigned gene mutates with `probability`: its request is looked up
/// again, a provider is drawn uniformly from the request's candidate pool
/// and the date is redrawn inside the window (repairing out-of-window
/// dates). Recipient and hours are kept. Genes whose request is gone or
/// whose pool is empty stay as they are.
pub fn mutate<R: Rng>(
    plan: Plan,
    households: &[Household],
    requests: &[Request],
    probability: f64,
    rng: &mut R,
) -> Plan {
    let genes = plan
        .genes
        .into_iter()
        .map(|slot| {
            let mut gene = slot?;
            if !rng.random_bool(probability) {
                return Some(gene);
            }
            let Some(request) = requests.iter().find(|r| r.id == gene.request_id) else {
                return Some(gene);
            };
            if let Some(provider) = candidates(request, households).choose(rng) {
                gene.provider_id = provider.id;
                gene.date = request.window.sample(rng);
            }
            Some(gene)
        })
        .collect();
    Plan::from_genes(genes)
}
