use std::path::PathBuf;

use clap::Parser;
use nlhe_blueprint::config::Config;
use nlhe_blueprint::mccfr::Trainer;

/// runs the MCCFR blueprint trainer. flags override `Config::default()`
/// directly; `--config` overrides both with whatever a saved JSON config
/// specifies, so a prior run's settings can be replayed exactly.
#[derive(Parser)]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    iterations: Option<u64>,

    #[arg(long)]
    workers: Option<usize>,

    #[arg(long)]
    bucket_table: Option<String>,

    /// resumable raw regret-table checkpoint. if it already exists,
    /// training continues from the iteration it was last saved at.
    #[arg(long, default_value = "checkpoint.json")]
    checkpoint: PathBuf,

    /// final averaged-strategy blueprint, written once training completes.
    #[arg(long, default_value = "blueprint.json")]
    out: PathBuf,

    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    nlhe_blueprint::init_logging();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if let Some(path) = args.bucket_table {
        config.bucket_table_path = Some(path);
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.checkpoint_path = args.checkpoint.to_string_lossy().into_owned();

    rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .build_global()
        .ok(); // a second invocation in the same process would error; fine to ignore here

    log::info!("training for {} iterations across {} workers", config.iterations, config.workers);
    let trainer = Trainer::new(config)?;
    let blueprint = trainer.run()?;
    blueprint.save(&args.out)?;
    log::info!("training complete: {} information sets learned, written to {}", blueprint.len(), args.out.display());
    Ok(())
}
