use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::path::Path as FsPath;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::mccfr::infoset::InfoSetKey;
use crate::{Probability, Utility, NUM_ACTIONS, POLICY_MIN, REGRET_MAX, REGRET_MIN};

/// per-infoset accumulators: cumulative regret (drives the current
/// strategy via regret matching) and cumulative strategy weight (drives
/// the time-averaged strategy that is actually exported as the blueprint).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegretEntry {
    pub regret: [Utility; NUM_ACTIONS],
    pub strategy_sum: [Probability; NUM_ACTIONS],
}

impl Default for RegretEntry {
    fn default() -> Self {
        Self { regret: [0.0; NUM_ACTIONS], strategy_sum: [0.0; NUM_ACTIONS] }
    }
}

impl RegretEntry {
    /// regret matching over the `n` legal actions at this node: probability
    /// proportional to positive regret, uniform when none is positive.
    pub fn current_strategy(&self, legal: &[usize]) -> Vec<Probability> {
        let positive: Vec<Utility> = legal.iter().map(|&a| self.regret[a].max(0.0)).collect();
        let total: Utility = positive.iter().sum();
        if total > 0.0 {
            positive.iter().map(|&r| r / total).collect()
        } else {
            vec![1.0 / legal.len() as Probability; legal.len()]
        }
    }

    /// the blueprint's actual policy: the time-averaged strategy.
    pub fn average_strategy(&self, legal: &[usize]) -> Vec<Probability> {
        let sums: Vec<Probability> = legal.iter().map(|&a| self.strategy_sum[a]).collect();
        let total: Probability = sums.iter().sum();
        if total > POLICY_MIN {
            sums.iter().map(|&s| s / total).collect()
        } else {
            vec![1.0 / legal.len() as Probability; legal.len()]
        }
    }

    pub fn accumulate_regret(&mut self, action: usize, value: Utility, weight: Utility) {
        let updated = self.regret[action] + value * weight;
        self.regret[action] = updated.clamp(REGRET_MIN, REGRET_MAX);
    }

    pub fn accumulate_strategy(&mut self, action: usize, probability: Probability, weight: Probability) {
        self.strategy_sum[action] += probability * weight;
    }
}

const SHARDS: usize = 32;

/// the shared regret table, sharded across `SHARDS` independent
/// `RwLock<HashMap<_>>`s so concurrent traversals contend only when they
/// happen to hash into the same shard. no concurrent-map crate appears
/// anywhere in the reference corpus, so this is a plain sharded lock
/// rather than a lock-free structure.
pub struct RegretTable {
    shards: Vec<RwLock<HashMap<InfoSetKey, RegretEntry>>>,
}

impl RegretTable {
    pub fn new() -> Self {
        Self { shards: (0..SHARDS).map(|_| RwLock::new(HashMap::new())).collect() }
    }

    fn shard_of(&self, key: &InfoSetKey) -> &RwLock<HashMap<InfoSetKey, RegretEntry>> {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        key.hash(&mut hasher);
        &self.shards[(hasher.finish() as usize) % SHARDS]
    }

    pub fn with_entry<R>(&self, key: InfoSetKey, f: impl FnOnce(&RegretEntry) -> R) -> R {
        let shard = self.shard_of(&key).read().expect("regret table shard poisoned");
        match shard.get(&key) {
            Some(entry) => f(entry),
            None => f(&RegretEntry::default()),
        }
    }

    pub fn with_entry_mut<R>(&self, key: InfoSetKey, f: impl FnOnce(&mut RegretEntry) -> R) -> R {
        let mut shard = self.shard_of(&key).write().expect("regret table shard poisoned");
        let entry = shard.entry(key).or_default();
        f(entry)
    }

    pub fn len(&self) -> usize {
        self.shards.iter().map(|s| s.read().expect("regret table shard poisoned").len()).sum()
    }

    pub fn snapshot(&self) -> HashMap<InfoSetKey, RegretEntry> {
        let mut out = HashMap::with_capacity(self.len());
        for shard in &self.shards {
            let guard = shard.read().expect("regret table shard poisoned");
            out.extend(guard.iter().map(|(k, v)| (*k, v.clone())));
        }
        out
    }

    /// writes the full regret table plus the iteration count reached so
    /// far, so a later `load` resumes the same linear-CFR weight sequence
    /// instead of restarting it from iteration zero.
    pub fn save(&self, path: &FsPath, iteration: u64) -> Result<()> {
        let state = TrainingState { iteration, entries: self.snapshot() };
        let bytes = serde_json::to_vec(&state)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// rebuilds a table from a prior checkpoint and returns the iteration
    /// it left off at.
    pub fn load(path: &FsPath) -> Result<(Self, u64)> {
        let bytes = std::fs::read(path)?;
        let state: TrainingState = serde_json::from_slice(&bytes)?;
        let table = Self::new();
        for (key, entry) in state.entries {
            table.with_entry_mut(key, |e| *e = entry);
        }
        Ok((table, state.iteration))
    }
}

/// the on-disk checkpoint format: every accumulator needed to resume
/// training exactly where it left off, as opposed to `Blueprint`'s
/// averaged-strategy-only export format.
#[derive(Debug, Serialize, Deserialize)]
struct TrainingState {
    iteration: u64,
    entries: HashMap<InfoSetKey, RegretEntry>,
}

impl Default for RegretTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_strategy_is_uniform_with_no_regret() {
        let entry = RegretEntry::default();
        let strat = entry.current_strategy(&[0, 1, 2]);
        assert_eq!(strat, vec![1.0 / 3.0; 3]);
    }

    #[test]
    fn current_strategy_follows_positive_regret() {
        let mut entry = RegretEntry::default();
        entry.accumulate_regret(0, 3.0, 1.0);
        entry.accumulate_regret(1, 1.0, 1.0);
        let strat = entry.current_strategy(&[0, 1]);
        assert!((strat[0] - 0.75).abs() < 1e-6);
        assert!((strat[1] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn negative_regret_contributes_nothing() {
        let mut entry = RegretEntry::default();
        entry.accumulate_regret(0, -5.0, 1.0);
        entry.accumulate_regret(1, -5.0, 1.0);
        let strat = entry.current_strategy(&[0, 1]);
        assert_eq!(strat, vec![0.5, 0.5]);
    }

    #[test]
    fn strategy_sum_is_monotone_non_decreasing_across_iterations() {
        let mut entry = RegretEntry::default();
        let mut previous = entry.strategy_sum[0];
        for iteration in 1..=20u64 {
            entry.accumulate_strategy(0, 0.5, iteration as Probability);
            assert!(entry.strategy_sum[0] >= previous);
            previous = entry.strategy_sum[0];
        }
    }

    #[test]
    fn table_round_trips_an_entry_through_a_shard() {
        let table = RegretTable::new();
        let key = InfoSetKey { bucket: 3, history: 1 };
        table.with_entry_mut(key, |e| e.accumulate_regret(0, 7.0, 1.0));
        let seen = table.with_entry(key, |e| e.regret[0]);
        assert!((seen - 7.0).abs() < 1e-6);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn checkpoint_round_trip_preserves_entries_and_iteration() {
        let table = RegretTable::new();
        let key = InfoSetKey { bucket: 9, history: 2 };
        table.with_entry_mut(key, |e| {
            e.accumulate_regret(1, 4.0, 1.0);
            e.accumulate_strategy(1, 0.5, 1.0);
        });

        let tmp = std::env::temp_dir().join("nlhe-blueprint-test-regret-checkpoint.json");
        table.save(&tmp, 37).unwrap();
        let (loaded, iteration) = RegretTable::load(&tmp).unwrap();
        std::fs::remove_file(&tmp).ok();

        assert_eq!(iteration, 37);
        let regret = loaded.with_entry(key, |e| e.regret[1]);
        assert!((regret - 4.0).abs() < 1e-6);
    }
}
