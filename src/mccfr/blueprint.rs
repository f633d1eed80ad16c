use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::mccfr::infoset::InfoSetKey;
use crate::mccfr::regret::RegretTable;
use crate::{Probability, NUM_ACTIONS};

/// the trained artifact: the time-averaged strategy at every visited
/// information set, detached from the regret accumulators that produced
/// it. this is what `evaluate` and any downstream player load.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Blueprint {
    policies: HashMap<InfoSetKey, [Probability; NUM_ACTIONS]>,
}

impl Blueprint {
    pub fn from_table(table: &RegretTable) -> Self {
        let all_actions: Vec<usize> = (0..NUM_ACTIONS).collect();
        let mut policies = HashMap::new();
        for (key, entry) in table.snapshot() {
            let avg = entry.average_strategy(&all_actions);
            let mut packed = [0.0; NUM_ACTIONS];
            packed.copy_from_slice(&avg);
            policies.insert(key, packed);
        }
        Self { policies }
    }

    pub fn policy(&self, key: &InfoSetKey) -> Option<&[Probability; NUM_ACTIONS]> {
        self.policies.get(key)
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        serde_json::from_slice(&bytes).map_err(|_| crate::error::TrainerError::CorruptBlueprint)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec(self)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mccfr::path::Path as HistoryPath;

    #[test]
    fn empty_table_yields_empty_blueprint() {
        let table = RegretTable::new();
        let blueprint = Blueprint::from_table(&table);
        assert!(blueprint.is_empty());
    }

    #[test]
    fn visited_infoset_survives_the_round_trip() {
        let table = RegretTable::new();
        let key = InfoSetKey::new(5, HistoryPath::root());
        table.with_entry_mut(key, |e| e.accumulate_strategy(2, 1.0, 1.0));
        let blueprint = Blueprint::from_table(&table);

        let tmp = std::env::temp_dir().join("nlhe-blueprint-test-blueprint.json");
        blueprint.save(&tmp).unwrap();
        let loaded = Blueprint::load(&tmp).unwrap();
        std::fs::remove_file(&tmp).ok();

        let policy = loaded.policy(&key).unwrap();
        assert!((policy[2] - 1.0).abs() < 1e-6);
    }
}
