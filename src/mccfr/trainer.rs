use std::path::Path as FsPath;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::bucket::{BucketTable, Bucketer};
use crate::config::Config;
use crate::error::Result;
use crate::game::state::{GameState, Phase};
use crate::mccfr::blueprint::Blueprint;
use crate::mccfr::infoset::InfoSetKey;
use crate::mccfr::path::Path;
use crate::mccfr::regret::RegretTable;
use crate::{Probability, Utility, N};

/// fallback abstraction used when the config names no trained bucket table:
/// every lookup goes straight to the deterministic heuristic.
struct HeuristicBucketer;
impl Bucketer for HeuristicBucketer {
    fn bucket(&self, street: crate::cards::street::Street, hole: &crate::cards::hand::Hand, board: &crate::cards::hand::Hand) -> u16 {
        crate::bucket::heuristic::fallback_bucket(street, hole, board)
    }
}

pub struct Trainer {
    config: Config,
    table: RegretTable,
    bucketer: Box<dyn Bucketer>,
    start_iteration: u64,
}

impl Trainer {
    /// builds a trainer, resuming from `config.checkpoint_path` if it
    /// already holds a regret-table checkpoint, so a second `run()` with
    /// the same path continues the same iteration and weight sequence
    /// instead of starting over.
    pub fn new(config: Config) -> Result<Self> {
        let bucketer: Box<dyn Bucketer> = match &config.bucket_table_path {
            Some(path) => Box::new(BucketTable::load(FsPath::new(path))?),
            None => {
                log::warn!("no bucket table configured, training against the heuristic abstraction");
                Box::new(HeuristicBucketer)
            }
        };
        let checkpoint_path = FsPath::new(&config.checkpoint_path);
        let (table, start_iteration) = if checkpoint_path.exists() {
            let (table, iteration) = RegretTable::load(checkpoint_path)?;
            log::info!("resuming from checkpoint at iteration {iteration}");
            (table, iteration)
        } else {
            (RegretTable::new(), 0)
        };
        Ok(Self { config, table, bucketer, start_iteration })
    }

    pub fn table(&self) -> &RegretTable {
        &self.table
    }

    /// runs external-sampling linear MCCFR for `config.iterations` further
    /// iterations beyond wherever the loaded checkpoint left off, one
    /// traversal per seat per iteration, checkpointing the live regret
    /// table periodically. returns the averaged blueprint. the only
    /// weighting applied to regret/strategy-sum accumulators is the linear
    /// `weight = iteration` term inside `traverse`; nothing here shrinks
    /// them back down, so `strategy_sum` stays monotone non-decreasing
    /// across iterations.
    pub fn run(&self) -> Result<Blueprint> {
        let mut iteration = self.start_iteration;
        let target = self.start_iteration + self.config.iterations;
        let bar = crate::progress(self.config.iterations);

        while iteration < target {
            let batch_end = (iteration + self.config.batch_size).min(target);

            (iteration..batch_end).into_par_iter().for_each(|i| {
                let mut rng = SmallRng::seed_from_u64(self.config.seed ^ i);
                for traverser in 0..N {
                    let state = GameState::deal(&mut rng);
                    self.traverse(&state, &mut rng, traverser, Path::root(), i + 1);
                }
                bar.inc(1);
            });

            if batch_end % self.config.checkpoint_every == 0 || batch_end == target {
                self.table.save(FsPath::new(&self.config.checkpoint_path), batch_end)?;
                log::info!("checkpoint at iteration {batch_end}: {} infosets", self.table.len());
            }
            iteration = batch_end;
        }
        bar.finish_with_message("training complete");
        Ok(Blueprint::from_table(&self.table))
    }

    /// recursive external-sampling CFR: every legal action is explored for
    /// `traverser`'s own decisions (to compute exact counterfactual
    /// regret), while every other seat's decision is sampled once from its
    /// current strategy, matching the external-sampling MCCFR variant.
    fn traverse(
        &self,
        state: &GameState,
        rng: &mut SmallRng,
        traverser: usize,
        path: Path,
        iteration: u64,
    ) -> Utility {
        if state.is_terminal() {
            return state.settle()[traverser] as Utility;
        }

        let acting = state.to_act;
        let edges = state.legal_edges();
        let n = edges.len();
        // indices into the fixed 10-edge alphabet, not positions in `edges`:
        // `legal_edges()` omits Fold when there's nothing to face and drops
        // raise sizes that fail the min-raise check, so position-in-`edges`
        // drifts from one node to the next while `Edge::to_index()` doesn't.
        let legal: Vec<usize> = edges.iter().map(|e| e.to_index() as usize).collect();

        let bucket = self
            .bucketer
            .bucket(state.street, &state.hole_cards(acting), &state.visible_board());
        let key = InfoSetKey::new(bucket, path);

        if acting != traverser {
            let strategy = self.table.with_entry(key, |e| e.current_strategy(&legal));
            let choice = sample(&strategy, rng);
            let next_state = state.apply_edge(rng, edges[choice]);
            let next_path = self.advance_path(&path, state, &next_state, edges[choice]);
            return self.traverse(&next_state, rng, traverser, next_path, iteration);
        }

        let strategy = self.table.with_entry(key, |e| e.current_strategy(&legal));
        let weight = iteration as Utility;
        let pruning_active = iteration > self.config.prune_after;

        let mut utilities = vec![0.0 as Utility; n];
        for i in 0..n {
            if pruning_active && strategy[i] == 0.0 {
                let skip = self.table.with_entry(key, |e| e.regret[legal[i]] < self.config.prune_threshold);
                if skip {
                    continue; // strategy[i] is already zero, so this contributes nothing below
                }
            }
            let next_state = state.apply_edge(rng, edges[i]);
            let next_path = self.advance_path(&path, state, &next_state, edges[i]);
            utilities[i] = self.traverse(&next_state, rng, traverser, next_path, iteration);
        }

        let node_value: Utility = strategy.iter().zip(&utilities).map(|(&p, &u)| p * u).sum();

        self.table.with_entry_mut(key, |e| {
            for i in 0..n {
                e.accumulate_regret(legal[i], utilities[i] - node_value, weight);
                e.accumulate_strategy(legal[i], strategy[i], weight);
            }
        });

        node_value
    }

    fn advance_path(&self, path: &Path, before: &GameState, after: &GameState, edge: crate::game::action::Edge) -> Path {
        let pushed = path.push_edge(edge);
        if after.street != before.street && after.phase == Phase::Betting {
            pushed.push_street_delimiter()
        } else {
            pushed
        }
    }
}

fn sample(strategy: &[Probability], rng: &mut SmallRng) -> usize {
    use rand::Rng;
    let mut roll: Probability = rng.random_range(0.0..1.0);
    for (i, &p) in strategy.iter().enumerate() {
        if roll < p {
            return i;
        }
        roll -= p;
    }
    strategy.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_handful_of_iterations_trains_without_panicking() {
        let config = Config {
            iterations: 8,
            batch_size: 4,
            checkpoint_every: 1_000,
            checkpoint_path: std::env::temp_dir()
                .join("nlhe-blueprint-test-trainer.json")
                .to_string_lossy()
                .into_owned(),
            prune_after: 1_000,
            ..Config::default()
        };
        let trainer = Trainer::new(config.clone()).unwrap();
        let blueprint = trainer.run().unwrap();
        assert!(!blueprint.is_empty());
        std::fs::remove_file(&config.checkpoint_path).ok();
    }

    #[test]
    fn resuming_from_a_checkpoint_continues_the_same_iteration_sequence() {
        let checkpoint_path = std::env::temp_dir()
            .join("nlhe-blueprint-test-trainer-resume.json")
            .to_string_lossy()
            .into_owned();
        std::fs::remove_file(&checkpoint_path).ok();

        let base_config = Config {
            batch_size: 4,
            checkpoint_every: 4,
            checkpoint_path: checkpoint_path.clone(),
            prune_after: 1_000,
            ..Config::default()
        };

        let first = Trainer::new(Config { iterations: 4, ..base_config.clone() }).unwrap();
        let first_blueprint = first.run().unwrap();
        assert!(!first_blueprint.is_empty());

        let resumed = Trainer::new(Config { iterations: 4, ..base_config.clone() }).unwrap();
        assert_eq!(resumed.start_iteration, 4);
        let second_blueprint = resumed.run().unwrap();
        assert!(!second_blueprint.is_empty());
        assert!(second_blueprint.len() >= first_blueprint.len());

        let (_, iteration) = RegretTable::load(FsPath::new(&checkpoint_path)).unwrap();
        assert_eq!(iteration, 8);

        let one_shot = Trainer::new(Config {
            iterations: 8,
            checkpoint_path: std::env::temp_dir()
                .join("nlhe-blueprint-test-trainer-oneshot.json")
                .to_string_lossy()
                .into_owned(),
            ..base_config
        })
        .unwrap();
        let one_shot_blueprint = one_shot.run().unwrap();
        assert!(!one_shot_blueprint.is_empty());

        std::fs::remove_file(&checkpoint_path).ok();
        std::fs::remove_file(one_shot.config.checkpoint_path.clone()).ok();
    }

    #[test]
    fn sample_always_returns_a_valid_index() {
        let mut rng = SmallRng::seed_from_u64(1);
        let strategy = vec![0.2, 0.3, 0.5];
        for _ in 0..50 {
            let i = sample(&strategy, &mut rng);
            assert!(i < 3);
        }
    }
}
