use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;

use crate::bucket::canonical::{self, NUM_CANONICAL};
use crate::cards::hand::Hand;
use crate::cards::street::Street;
use crate::error::Result;

/// a trained abstraction: a direct 169-entry preflop lookup plus a
/// postflop map keyed by `(street, canonical signature)`. postflop
/// signatures are a placeholder for whatever clustering feature vector a
/// separate training job would emit; this crate only consumes the table,
/// it does not learn it — `build-buckets` falls back to the heuristic
/// abstraction when no table is supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketTable {
    #[serde(with = "BigArray")]
    preflop: [u16; NUM_CANONICAL],
    postflop: HashMap<(u8, u64), u16>,
}

impl BucketTable {
    pub fn from_preflop_only(preflop: [u16; NUM_CANONICAL]) -> Self {
        Self { preflop, postflop: HashMap::new() }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(self)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    pub fn lookup(&self, street: Street, hole: &Hand, board: &Hand) -> Option<u16> {
        if street == Street::Pref {
            let index = canonical::canonical_index(hole);
            return Some(self.preflop[index as usize]);
        }
        let key = (street.postflop_index() as u8, hole.union(board).bits());
        self.postflop.get(&key).copied()
    }

    pub fn insert_postflop(&mut self, street: Street, hole: &Hand, board: &Hand, bucket: u16) {
        let key = (street.postflop_index() as u8, hole.union(board).bits());
        self.postflop.insert(key, bucket);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card::Card;
    use crate::cards::rank::Rank;
    use crate::cards::suit::Suit;

    #[test]
    fn roundtrips_through_json() {
        let mut preflop = [0u16; NUM_CANONICAL];
        preflop[12] = 14; // pocket aces -> top bucket
        let table = BucketTable::from_preflop_only(preflop);
        let tmp = std::env::temp_dir().join("nlhe-blueprint-test-bucket-table.json");
        table.save(&tmp).unwrap();
        let loaded = BucketTable::load(&tmp).unwrap();
        std::fs::remove_file(&tmp).ok();

        let aces = Hand::from(vec![Card::new(Rank::Ace, Suit::Club), Card::new(Rank::Ace, Suit::Diamond)]);
        assert_eq!(loaded.lookup(Street::Pref, &aces, &Hand::empty()), Some(14));
    }

    #[test]
    fn missing_postflop_entry_falls_through_to_none() {
        let table = BucketTable::from_preflop_only([0u16; NUM_CANONICAL]);
        let hole = Hand::from(vec![Card::new(Rank::Two, Suit::Club), Card::new(Rank::Three, Suit::Diamond)]);
        let board = Hand::from(vec![
            Card::new(Rank::Four, Suit::Heart),
            Card::new(Rank::Five, Suit::Spade),
            Card::new(Rank::Six, Suit::Club),
        ]);
        assert_eq!(table.lookup(Street::Flop, &hole, &board), None);
    }
}
