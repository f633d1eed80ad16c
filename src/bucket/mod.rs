pub mod canonical;
pub mod heuristic;
pub mod table;

use crate::cards::hand::Hand;
use crate::cards::street::Street;

pub use table::BucketTable;

/// assigns an information-set bucket to a hand on a given street. preflop
/// buckets come from the 169-entry canonical lookup (refined further by a
/// trained `BucketTable` when one is available); postflop buckets come from
/// whichever abstraction is loaded, falling back to the strength-percentile
/// heuristic when it is not.
pub trait Bucketer: Send + Sync {
    fn bucket(&self, street: Street, hole: &Hand, board: &Hand) -> u16;
}

impl Bucketer for BucketTable {
    fn bucket(&self, street: Street, hole: &Hand, board: &Hand) -> u16 {
        self.lookup(street, hole, board)
            .unwrap_or_else(|| heuristic::fallback_bucket(street, hole, board))
    }
}
