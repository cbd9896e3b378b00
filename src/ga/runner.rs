//! Generational GA loop.
//!
//! # Algorithm
//!
//! 1. Build `population_size` random plans.
//! 2. For each generation `1..=max_generations`:
//!    - score every plan;
//!    - fold the scored plans into the best-ever plan (strictly better
//!      fitness replaces it, so the earliest generation wins ties);
//!    - unless this was the last generation, breed the next population:
//!      the fittest plan survives unchanged, the remaining slots are
//!      filled by tournament selection, crossover (or cloning) and
//!      mutation.
//! 3. Return the best-ever plan.
//!
//! There is no early stopping; the run always spans `max_generations`.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use super::builder::build_plan;
use super::fitness::{evaluate, FitnessDetail};
use super::operators::{mutate, tournament_select, uniform_crossover, ScoredPlan};
use crate::config::GaParameters;
use crate::models::{Household, Plan, Request};

/// Result of an optimizer run.
#[derive(Debug, Clone, PartialEq)]
pub struct GaOutcome {
    /// Best plan seen across all generations.
    pub plan: Plan,
    /// Fitness of the best plan.
    pub fitness: f64,
    /// Breakdown of the best plan, including the generation it was found in.
    pub detail: FitnessDetail,
    /// Generations run.
    pub generations: usize,
    /// Best-ever fitness after each generation (non-decreasing).
    pub history: Vec<f64>,
}

impl GaOutcome {
    fn empty() -> Self {
        Self {
            plan: Plan::new(),
            fitness: 0.0,
            detail: FitnessDetail::default(),
            generations: 0,
            history: Vec::new(),
        }
    }
}

/// Runs the aid-planning genetic algorithm.
///
/// # Example
/// ```
/// use ayni_plan::config::ParameterSpec;
/// use ayni_plan::ga::GaRunner;
/// use ayni_plan::models::{Household, Request, TimeWindow};
/// use chrono::{Duration, Utc};
///
/// let start = Utc::now();
/// let households = vec![
///     Household::new(1, 10).with_history(10.0, 0.0),
///     Household::new(2, 10).with_history(0.0, 10.0),
/// ];
/// let requests = vec![Request::new(1, 2, "HARVEST", 5.0,
///     TimeWindow::new(start, start + Duration::days(1)))];
/// let params = ParameterSpec::default()
///     .with_population_size(4)
///     .with_max_generations(5)
///     .with_seed(42)
///     .validate()
///     .unwrap();
///
/// let outcome = GaRunner::run(&households, &requests, &params);
/// assert_eq!(outcome.plan.assignment_count(), 1);
/// assert_eq!(outcome.detail.coverage, 1.0);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the optimizer with a random stream derived from `params.seed()`.
    ///
    /// A fixed seed makes the whole run (shuffles, coin flips, mutation
    /// draws) reproducible bit for bit.
    pub fn run(households: &[Household], requests: &[Request], params: &GaParameters) -> GaOutcome {
        let mut rng = match params.seed() {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        Self::run_with_rng(households, requests, params, &mut rng)
    }

    /// Runs the optimizer on a caller-supplied random stream.
    ///
    /// `params.seed()` is ignored.
    pub fn run_with_rng<R: Rng>(
        households: &[Household],
        requests: &[Request],
        params: &GaParameters,
        rng: &mut R,
    ) -> GaOutcome {
        info!(
            event = "optimize_start",
            households = households.len(),
            requests = requests.len(),
            population_size = params.population_size(),
            max_generations = params.max_generations(),
            seed = ?params.seed(),
        );

        if households.is_empty() {
            info!(event = "optimize_end", reason = "no households", fitness = 0.0);
            return GaOutcome::empty();
        }

        let cap = params.max_hours_per_household();
        let weights = params.weights();
        let score = |plan: Plan| {
            let (fitness, detail) = evaluate(households, requests, &plan, &weights, cap);
            ScoredPlan {
                plan,
                fitness,
                detail,
            }
        };

        let mut population: Vec<Plan> = (0..params.population_size())
            .map(|_| build_plan(households, requests, cap, rng))
            .collect();
        let mut best: Option<ScoredPlan> = None;
        let mut history = Vec::with_capacity(params.max_generations());

        for generation in 1..=params.max_generations() {
            let scored: Vec<ScoredPlan> = population.drain(..).map(&score).collect();
            let generation_best = scored
                .iter()
                .map(|s| s.fitness)
                .fold(f64::NEG_INFINITY, f64::max);

            best = scored
                .iter()
                .fold(best, |best, candidate| keep_better(best, candidate, generation));
            let best_fitness = best.as_ref().map_or(0.0, |b| b.fitness);
            history.push(best_fitness);

            debug!(
                event = "generation",
                generation,
                generation_best,
                best_fitness,
            );

            if generation < params.max_generations() {
                population = breed(scored, households, requests, params, rng);
            }
        }

        let Some(best) = best else {
            return GaOutcome::empty();
        };

        info!(
            event = "optimize_end",
            fitness = best.fitness,
            found_in_generation = best.detail.generation,
            assignments = best.plan.assignment_count(),
        );

        GaOutcome {
            plan: best.plan,
            fitness: best.fitness,
            detail: best.detail,
            generations: params.max_generations(),
            history,
        }
    }
}

/// Keeps the incumbent unless `candidate` is strictly fitter.
fn keep_better(
    best: Option<ScoredPlan>,
    candidate: &ScoredPlan,
    generation: usize,
) -> Option<ScoredPlan> {
    match best {
        Some(best) if candidate.fitness <= best.fitness => Some(best),
        _ => {
            debug!(event = "new_best", generation, fitness = candidate.fitness);
            let mut found = candidate.clone();
            found.detail.generation = generation;
            Some(found)
        }
    }
}

/// Produces the next population: one elite plus bred offspring.
fn breed<R: Rng>(
    mut scored: Vec<ScoredPlan>,
    households: &[Household],
    requests: &[Request],
    params: &GaParameters,
    rng: &mut R,
) -> Vec<Plan> {
    scored.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));

    let size = params.population_size();
    let mut next = Vec::with_capacity(size);
    if let Some(elite) = scored.first() {
        next.push(elite.plan.clone());
    }

    while next.len() < size {
        let (Some(first), Some(second)) = (
            tournament_select(&scored, rng),
            tournament_select(&scored, rng),
        ) else {
            break;
        };
        let child = if rng.random_bool(params.crossover_probability()) {
            uniform_crossover(&first.plan, &second.plan, rng)
        } else {
            first.plan.clone()
        };
        next.push(mutate(
            child,
            households,
            requests,
            params.mutation_probability(),
            rng,
        ));
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FitnessWeights, ParameterSpec};
    use crate::models::{AidAssignment, TimeWindow};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, d, 0, 0, 0).unwrap()
    }

    fn params(population: usize, generations: usize, seed: u64) -> GaParameters {
        ParameterSpec::default()
            .with_population_size(population)
            .with_max_generations(generations)
            .with_seed(seed)
            .validate()
            .unwrap()
    }

    fn village() -> (Vec<Household>, Vec<Request>) {
        let households = vec![
            Household::new(1, 10).with_history(12.0, 2.0),
            Household::new(2, 10).with_history(0.0, 8.0),
            Household::new(3, 10).with_history(4.0, 4.0),
            Household::new(4, 20).with_history(1.0, 6.0),
            Household::new(5, 20).with_history(9.0, 0.0),
            Household::new(6, 20),
        ];
        let requests = (0..12)
            .map(|i| {
                let start = day(1) + Duration::days(i as i64);
                Request::new(
                    100 + i,
                    1 + i % 6,
                    if i % 2 == 0 { "SOWING" } else { "HARVEST" },
                    2.0 + (i % 4) as f64,
                    TimeWindow::new(start, start + Duration::days(3)),
                )
            })
            .collect();
        (households, requests)
    }

    /// Five distinct plans over the village requests, best at index 2.
    fn scored_population(requests: &[Request]) -> Vec<ScoredPlan> {
        [0.3, 0.1, 0.4, 0.0, 0.2]
            .into_iter()
            .enumerate()
            .map(|(shift, fitness)| {
                let genes = requests
                    .iter()
                    .map(|r| {
                        let provider = 1 + (r.household_id + shift as u64) % 6;
                        Some(AidAssignment::for_request(r, provider, r.window.start))
                    })
                    .collect();
                ScoredPlan {
                    plan: Plan::from_genes(genes),
                    fitness,
                    detail: FitnessDetail::default(),
                }
            })
            .collect()
    }

    #[test]
    fn test_breed_keeps_elite_and_size() {
        let (households, requests) = village();
        let population = scored_population(&requests);
        let p = ParameterSpec::default()
            .with_population_size(5)
            .with_crossover_probability(1.0)
            .with_mutation_probability(1.0)
            .validate()
            .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        for _ in 0..10 {
            let next = breed(population.clone(), &households, &requests, &p, &mut rng);
            assert_eq!(next.len(), 5);
            assert_eq!(next[0], population[2].plan);
        }
    }

    #[test]
    fn test_breed_without_variation_clones_tournament_winners() {
        let (households, requests) = village();
        let population = scored_population(&requests);
        let p = ParameterSpec::default()
            .with_population_size(5)
            .with_crossover_probability(0.0)
            .with_mutation_probability(0.0)
            .validate()
            .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(21);

        let next = breed(population.clone(), &households, &requests, &p, &mut rng);
        assert_eq!(next.len(), 5);
        assert_eq!(next[0], population[2].plan);
        // The two weakest plans can never win a 3-way tournament.
        let weakest = [&population[3].plan, &population[1].plan];
        for child in &next[1..] {
            assert!(population.iter().any(|s| &s.plan == child));
            assert!(!weakest.contains(&child));
        }
    }

    #[test]
    fn test_concrete_pair_scenario() {
        let households = vec![
            Household::new(1, 10).with_history(10.0, 0.0),
            Household::new(2, 10).with_history(0.0, 10.0),
        ];
        let requests = vec![Request::new(100, 2, "HARVEST", 5.0, TimeWindow::new(day(1), day(2)))];
        let params = ParameterSpec::default()
            .with_population_size(4)
            .with_max_generations(5)
            .with_weights(FitnessWeights::equal())
            .with_seed(42)
            .validate()
            .unwrap();

        let outcome = GaRunner::run(&households, &requests, &params);

        let genes: Vec<_> = outcome.plan.assignments().collect();
        assert_eq!(genes.len(), 1);
        assert_eq!(genes[0].provider_id, 1);
        assert_eq!(genes[0].recipient_id, 2);
        assert!((genes[0].hours - 5.0).abs() < 1e-10);
        assert!(requests[0].window.contains(genes[0].date));

        assert!((outcome.detail.coverage - 1.0).abs() < 1e-10);
        assert!((outcome.detail.balance_std_dev - 15.0).abs() < 1e-10);
        assert!((outcome.detail.equilibrium - 1.0 / 16.0).abs() < 1e-10);
        assert!((outcome.detail.load_fairness - 0.0).abs() < 1e-10);
        assert!((outcome.fitness - (1.0 / 16.0 + 1.0) / 3.0).abs() < 1e-10);
        // Every plan is identical in score, so generation 1 holds the best.
        assert_eq!(outcome.detail.generation, 1);
        assert_eq!(outcome.history.len(), 5);
    }

    #[test]
    fn test_single_household_self_assignment() {
        let households = vec![Household::new(1, 10)];
        let requests = vec![Request::new(100, 1, "SOWING", 3.0, TimeWindow::new(day(1), day(2)))];

        let outcome = GaRunner::run(&households, &requests, &params(2, 1, 7));

        let genes: Vec<_> = outcome.plan.assignments().collect();
        assert_eq!(genes.len(), 1);
        assert_eq!(genes[0].provider_id, 1);
        assert_eq!(genes[0].recipient_id, 1);
        assert_eq!(outcome.generations, 1);
    }

    #[test]
    fn test_no_households_short_circuits() {
        let requests = vec![Request::new(100, 1, "SOWING", 3.0, TimeWindow::new(day(1), day(2)))];

        let outcome = GaRunner::run(&[], &requests, &params(10, 10, 1));

        assert!(outcome.plan.is_empty());
        assert_eq!(outcome.fitness, 0.0);
        assert_eq!(outcome.detail, FitnessDetail::default());
        assert_eq!(outcome.generations, 0);
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let (households, requests) = village();
        let a = GaRunner::run(&households, &requests, &params(12, 15, 2024));
        let b = GaRunner::run(&households, &requests, &params(12, 15, 2024));
        assert_eq!(a, b);
    }

    #[test]
    fn test_history_is_monotone_and_bounded() {
        let (households, requests) = village();
        let outcome = GaRunner::run(&households, &requests, &params(10, 20, 11));

        assert_eq!(outcome.history.len(), 20);
        assert!(outcome.history.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(outcome.history.last().copied(), Some(outcome.fitness));
        assert!((0.0..=1.0).contains(&outcome.fitness));
        assert!((0.0..=1.0).contains(&outcome.detail.equilibrium));
        assert!((0.0..=1.0).contains(&outcome.detail.coverage));
        assert!((1..=20).contains(&outcome.detail.generation));
    }

    #[test]
    fn test_more_generations_never_worse() {
        let (households, requests) = village();
        let short = GaRunner::run(&households, &requests, &params(8, 5, 99));
        let long = GaRunner::run(&households, &requests, &params(8, 25, 99));

        assert!(long.fitness >= short.fitness);
        assert_eq!(&long.history[..5], &short.history[..]);
    }

    #[test]
    fn test_full_coverage_and_reported_fitness() {
        let (households, requests) = village();
        let p = params(10, 10, 5);
        let outcome = GaRunner::run(&households, &requests, &p);

        assert_eq!(outcome.plan.assignment_count(), requests.len());
        assert!((outcome.detail.coverage - 1.0).abs() < 1e-10);

        let (fitness, mut detail) = evaluate(
            &households,
            &requests,
            &outcome.plan,
            &p.weights(),
            p.max_hours_per_household(),
        );
        detail.generation = outcome.detail.generation;
        assert_eq!(fitness, outcome.fitness);
        assert_eq!(detail, outcome.detail);
    }

    #[test]
    fn test_unseeded_run_completes() {
        let (households, requests) = village();
        let p = ParameterSpec::default()
            .with_population_size(4)
            .with_max_generations(3)
            .validate()
            .unwrap();
        let outcome = GaRunner::run(&households, &requests, &p);
        assert_eq!(outcome.history.len(), 3);
    }
}
