use thiserror::Error;

/// Errors surfaced by the trainer library.
///
/// Unknown intensity tokens and zero or negative tick deltas are not errors.
#[derive(Debug, Error)]
pub enum ThumpError {
    /// Grading was asked to divide by a goal that is zero, negative or not finite.
    #[error("goal duration must be positive, got {0}")]
    InvalidGoalDuration(f64),

    /// A challenge definition broke its own invariants.
    #[error("invalid challenge '{id}': {reason}")]
    InvalidChallenge { id: String, reason: String },

    #[error("unknown challenge: {0}")]
    UnknownChallenge(String),

    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// A bundled asset file is missing from the binary.
    #[error("missing asset: {0}")]
    MissingAsset(String),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for trainer operations.
pub type Result<T> = std::result::Result<T, ThumpError>;
