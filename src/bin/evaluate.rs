use std::path::PathBuf;

use clap::Parser;
use nlhe_blueprint::bucket::{BucketTable, Bucketer};
use nlhe_blueprint::cards::hand::Hand;
use nlhe_blueprint::cards::street::Street;
use nlhe_blueprint::evaluate::evaluate;
use nlhe_blueprint::mccfr::Blueprint;

struct HeuristicBucketer;
impl Bucketer for HeuristicBucketer {
    fn bucket(&self, street: Street, hole: &Hand, board: &Hand) -> u16 {
        nlhe_blueprint::bucket::heuristic::fallback_bucket(street, hole, board)
    }
}

/// self-plays a trained blueprint and reports each seat's win rate in
/// milli-big-blinds per hand, with a block-bootstrap standard error.
#[derive(Parser)]
struct Args {
    blueprint: PathBuf,

    #[arg(long)]
    bucket_table: Option<PathBuf>,

    #[arg(long, default_value_t = 100_000)]
    hands: u64,

    #[arg(long, default_value_t = 1)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    nlhe_blueprint::init_logging();
    let args = Args::parse();

    let blueprint = Blueprint::load(&args.blueprint)?;
    let bucketer: Box<dyn Bucketer> = match &args.bucket_table {
        Some(path) => Box::new(BucketTable::load(path)?),
        None => Box::new(HeuristicBucketer),
    };

    let report = evaluate(&blueprint, bucketer.as_ref(), args.hands, args.seed);
    println!("{}", serde_json::to_string_pretty(&report)?);
    for (seat, label) in ["button", "small blind", "big blind"].into_iter().enumerate() {
        log::info!(
            "{} hands, seat {seat} ({label}): {:.2} +/- {:.2} mbb/hand",
            report.hands,
            report.mean_mbb_per_hand[seat],
            report.stderr_mbb_per_hand[seat]
        );
    }
    Ok(())
}
