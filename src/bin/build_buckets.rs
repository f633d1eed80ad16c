use std::path::PathBuf;

use clap::Parser;
use nlhe_blueprint::bucket::canonical::{self, NUM_CANONICAL};
use nlhe_blueprint::bucket::heuristic;
use nlhe_blueprint::bucket::BucketTable;
use nlhe_blueprint::cards::hand::Hand;
use nlhe_blueprint::cards::suit::Suit;
use nlhe_blueprint::cards::Card;

/// materializes a preflop bucket table from the heuristic abstraction.
/// postflop clustering is not performed here: it is the one abstraction
/// surface this crate does not train, since that requires a separate
/// equity-sampling and k-means pipeline outside this solver's scope.
/// `train`/`evaluate` transparently fall back to the heuristic for
/// postflop buckets when none is loaded.
#[derive(Parser)]
struct Args {
    #[arg(long, default_value = "buckets.json")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    nlhe_blueprint::init_logging();
    let args = Args::parse();

    let mut preflop = [0u16; NUM_CANONICAL];
    for index in 0..NUM_CANONICAL as u8 {
        let (hi, lo) = canonical::ranks_of(index);
        let second_suit = if canonical::is_suited(index) { Suit::Club } else { Suit::Diamond };
        let hole = Hand::from(vec![Card::new(hi, Suit::Club), Card::new(lo, second_suit)]);
        preflop[index as usize] = heuristic::fallback_bucket(nlhe_blueprint::cards::street::Street::Pref, &hole, &Hand::empty());
    }

    let table = BucketTable::from_preflop_only(preflop);
    table.save(&args.out)?;
    log::info!("wrote {} preflop bucket assignments to {}", NUM_CANONICAL, args.out.display());
    Ok(())
}
