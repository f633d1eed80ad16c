use serde::{Deserialize, Serialize};

/// trainer hyperparameters. the CLI binaries build one from `clap` flags,
/// optionally overridden by a `--config` JSON file, and pass it down to
/// `mccfr::trainer::Trainer` unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub iterations: u64,
    pub workers: usize,
    pub prune_threshold: f32,
    pub prune_after: u64,
    /// how many iterations a single `rayon` parallel batch covers before
    /// the trainer checks whether it's time to checkpoint.
    pub batch_size: u64,
    pub checkpoint_every: u64,
    pub checkpoint_path: String,
    pub bucket_table_path: Option<String>,
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            iterations: 1_000_000,
            workers: std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
            prune_threshold: crate::REGRET_MIN / 2.0,
            prune_after: 1_000,
            batch_size: 10_000,
            checkpoint_every: 100_000,
            checkpoint_path: "blueprint.json".to_string(),
            bucket_table_path: None,
            seed: 0xC0FFEE,
        }
    }
}

impl Config {
    pub fn load(path: &std::path::Path) -> crate::error::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn save(&self, path: &std::path::Path) -> crate::error::Result<()> {
        let bytes = serde_json::to_vec_pretty(self)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_internally_consistent() {
        let config = Config::default();
        assert!(config.workers >= 1);
        assert!(config.prune_after < config.iterations);
    }

    #[test]
    fn round_trips_through_json() {
        let config = Config { iterations: 42, ..Config::default() };
        let tmp = std::env::temp_dir().join("nlhe-blueprint-test-config.json");
        config.save(&tmp).unwrap();
        let loaded = Config::load(&tmp).unwrap();
        std::fs::remove_file(&tmp).ok();
        assert_eq!(loaded.iterations, 42);
    }
}
