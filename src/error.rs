// src/error.rs

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal conditions. The binary reports these and exits non-zero.
#[derive(Error, Debug)]
pub enum TrainerError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A row parsed as CSV but its values are unusable.
    #[error("Invalid record at row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    #[error("Problem file not found: {path:?}")]
    PathNotFound { path: PathBuf },

    #[error("Could not determine a data directory; pass --data and --config explicitly")]
    NoDataDir,

    #[error("No problems found, even after resetting progress")]
    Exhausted,

    #[error("No problem found in any repetition tier; the problem store is empty")]
    TierExhausted,

    #[error("Input closed before a valid response was given")]
    PromptClosed,
}

pub type Result<T> = std::result::Result<T, TrainerError>;

impl TrainerError {
    pub fn invalid_record(row: usize, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            row,
            reason: reason.into(),
        }
    }
}

/// A rejected response. The session reports it and prompts again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponseError {
    #[error("Problem not found.")]
    ProblemNotFound(String),

    #[error("Invalid response. Please type 'y', 'n', 'r', or a problem number.")]
    Unrecognized(String),
}
