//! self-play evaluation harness: plays the blueprint's average strategy
//! against itself and reports each seat's win rate in milli-big-blinds per
//! hand (mbb/hand), the standard unit for comparing poker strategies
//! regardless of stake. button/small-blind/big-blind have structurally
//! different EV even under one shared bucket-indexed strategy, so all three
//! are tracked rather than just seat 0. because self-play hands are not
//! independent draws in the usual sense (shared strategy, same RNG stream
//! family), the standard error is estimated by block bootstrap rather than
//! a naive sqrt(n) estimate.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::bucket::Bucketer;
use crate::game::state::{GameState, Phase};
use crate::mccfr::{Blueprint, InfoSetKey, Path};
use crate::{Probability, B_BLIND, N};

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub hands: u64,
    pub mean_mbb_per_hand: [f64; N],
    pub stderr_mbb_per_hand: [f64; N],
}

pub fn evaluate(blueprint: &Blueprint, bucketer: &dyn Bucketer, hands: u64, seed: u64) -> EvaluationReport {
    let samples: Vec<[f64; N]> = (0..hands)
        .map(|h| play_one_hand(blueprint, bucketer, seed ^ h))
        .collect();

    let mut mean = [0.0; N];
    let mut stderr = [0.0; N];
    for seat in 0..N {
        let seat_samples: Vec<f64> = samples.iter().map(|s| s[seat]).collect();
        mean[seat] = seat_samples.iter().sum::<f64>() / hands.max(1) as f64;
        stderr[seat] = block_bootstrap_stderr(&seat_samples);
    }
    EvaluationReport { hands, mean_mbb_per_hand: mean, stderr_mbb_per_hand: stderr }
}

fn play_one_hand(blueprint: &Blueprint, bucketer: &dyn Bucketer, seed: u64) -> [f64; N] {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut state = GameState::deal(&mut rng);
    let mut path = Path::root();

    while !state.is_terminal() {
        let acting = state.to_act;
        let edges = state.legal_edges();
        let bucket = bucketer.bucket(state.street, &state.hole_cards(acting), &state.visible_board());
        let key = InfoSetKey::new(bucket, path);

        let probs = resolve_policy(blueprint.policy(&key), &edges);
        let choice = sample(&probs, &mut rng);

        let next = state.apply_edge(&mut rng, edges[choice]);
        path = advance_path(&path, &state, &next, edges[choice]);
        state = next;
    }

    let payoffs = state.settle();
    let mut mbb = [0.0; N];
    for seat in 0..N {
        mbb[seat] = payoffs[seat] as f64 / B_BLIND as f64 * 1000.0;
    }
    mbb
}

fn resolve_policy(policy: Option<&[Probability; crate::NUM_ACTIONS]>, edges: &[crate::game::action::Edge]) -> Vec<Probability> {
    match policy {
        Some(packed) => {
            let weights: Vec<Probability> = edges.iter().map(|e| packed[e.to_index() as usize]).collect();
            let total: Probability = weights.iter().sum();
            if total > 0.0 {
                weights.iter().map(|&w| w / total).collect()
            } else {
                vec![1.0 / edges.len() as Probability; edges.len()]
            }
        }
        None => vec![1.0 / edges.len() as Probability; edges.len()],
    }
}

fn advance_path(path: &Path, before: &GameState, after: &GameState, edge: crate::game::action::Edge) -> Path {
    let pushed = path.push_edge(edge);
    if after.street != before.street && after.phase == Phase::Betting {
        pushed.push_street_delimiter()
    } else {
        pushed
    }
}

fn sample(probs: &[Probability], rng: &mut SmallRng) -> usize {
    use rand::Rng;
    let mut roll: Probability = rng.random_range(0.0..1.0);
    for (i, &p) in probs.iter().enumerate() {
        if roll < p {
            return i;
        }
        roll -= p;
    }
    probs.len() - 1
}

/// standard error of the mean via block bootstrap: samples are chunked
/// into blocks of size `sqrt(n)`, block means are treated as the
/// (approximately independent) observations, and the usual sample-mean
/// standard error formula is applied to those.
fn block_bootstrap_stderr(samples: &[f64]) -> f64 {
    let n = samples.len();
    if n < 2 {
        return 0.0;
    }
    let block_size = (n as f64).sqrt().round().max(1.0) as usize;
    let blocks: Vec<f64> = samples
        .chunks(block_size)
        .map(|chunk| chunk.iter().sum::<f64>() / chunk.len() as f64)
        .collect();
    let b = blocks.len();
    if b < 2 {
        return 0.0;
    }
    let mean = blocks.iter().sum::<f64>() / b as f64;
    let variance = blocks.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (b as f64 - 1.0);
    (variance / b as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_bootstrap_is_zero_for_constant_samples() {
        let samples = vec![5.0; 64];
        assert_eq!(block_bootstrap_stderr(&samples), 0.0);
    }

    #[test]
    fn block_bootstrap_is_positive_for_noisy_samples() {
        let samples: Vec<f64> = (0..100).map(|i| if i % 2 == 0 { 10.0 } else { -10.0 }).collect();
        assert!(block_bootstrap_stderr(&samples) > 0.0);
    }

    #[test]
    fn evaluate_runs_with_an_untrained_blueprint() {
        use crate::bucket::heuristic::fallback_bucket;
        struct Fallback;
        impl Bucketer for Fallback {
            fn bucket(&self, street: crate::cards::street::Street, hole: &crate::cards::hand::Hand, board: &crate::cards::hand::Hand) -> u16 {
                fallback_bucket(street, hole, board)
            }
        }
        let blueprint = Blueprint::default();
        let report = evaluate(&blueprint, &Fallback, 20, 7);
        assert_eq!(report.hands, 20);
    }

    #[test]
    fn per_seat_means_sum_to_zero() {
        use crate::bucket::heuristic::fallback_bucket;
        struct Fallback;
        impl Bucketer for Fallback {
            fn bucket(&self, street: crate::cards::street::Street, hole: &crate::cards::hand::Hand, board: &crate::cards::hand::Hand) -> u16 {
                fallback_bucket(street, hole, board)
            }
        }
        let blueprint = Blueprint::default();
        let report = evaluate(&blueprint, &Fallback, 50, 11);
        let total: f64 = report.mean_mbb_per_hand.iter().sum();
        assert!(total.abs() < 1e-6);
    }
}
