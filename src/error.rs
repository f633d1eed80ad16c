//! illegal-action and invariant violations are fatal and abort the
//! enclosing traversal; missing bucket tables and checkpoint I/O failures
//! are non-fatal and logged.

#[derive(Debug, thiserror::Error)]
pub enum TrainerError {
    #[error("illegal action attempted: {detail}")]
    IllegalAction { detail: String },

    #[error("invariant violation: {detail}")]
    InvariantViolation { detail: String },

    #[error("bucket table missing, falling back to heuristic bucketing")]
    MissingBucketTable,

    #[error("checkpoint I/O failed: {0}")]
    CheckpointIo(#[from] std::io::Error),

    #[error("corrupt blueprint on load")]
    CorruptBlueprint,

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TrainerError>;
