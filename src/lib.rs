pub mod bucket;
pub mod cards;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod game;
pub mod mccfr;

/// dimensional analysis type aliases so the arithmetic in this crate
/// reads the same way everywhere it's used.
pub type Chips = i32;
pub type Probability = f32;
pub type Utility = f32;

/// number of seats at the table. the whole crate is specialized to 3;
/// it is named so the intent of `[x; N]`-shaped arrays is legible.
pub const N: usize = 3;

/// chip-denominated stakes, expressed in half-big-blind units so the
/// 0.5 BB small blind is exact integer arithmetic.
pub const STACK_BB: u32 = 20;
pub const S_BLIND: Chips = 1;
pub const B_BLIND: Chips = 2;
pub const STACK: Chips = (STACK_BB as Chips) * B_BLIND;

/// fixed size of the abstract action alphabet (fold, check/call, seven
/// raise sizes, all-in).
pub const NUM_ACTIONS: usize = 10;
pub const NUM_BUCKETS_PREFLOP: usize = 15;
pub const NUM_BUCKETS_POSTFLOP: usize = 50;
pub const NUM_CANONICAL_PREFLOP: usize = 169;

pub const REGRET_MIN: Utility = -3e5;
pub const REGRET_MAX: Utility = Utility::MAX;
pub const POLICY_MIN: Probability = Probability::MIN_POSITIVE;

/// initialize combined terminal+file logging.
pub fn init_logging() {
    use simplelog::*;
    let config = ConfigBuilder::new()
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    let term = TermLogger::new(
        LevelFilter::Info,
        config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
    let _ = CombinedLogger::init(vec![term]);
}

/// trait for random generation, used for property tests and fuzzing.
pub trait Arbitrary {
    fn random() -> Self;
}

/// a training progress bar.
pub fn progress(len: u64) -> indicatif::ProgressBar {
    let bar = indicatif::ProgressBar::new(len);
    bar.set_style(
        indicatif::ProgressStyle::with_template(
            "{elapsed_precise} {bar:40.cyan/blue} {pos}/{len} iters ({per_sec}, eta {eta})",
        )
        .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar()),
    );
    bar
}
