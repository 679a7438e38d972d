//! Crate error type
//!
//! Only collaborator boundaries can fail: level resolution, tuning files and
//! animation tables. Game conditions (death, game over, win) are state
//! transitions and never show up here.

use std::path::PathBuf;

/// Errors surfaced to the caller of the session controller
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read level {index} from {}: {source}", path.display())]
    LevelIo {
        index: u32,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("level {index} is malformed: {source}")]
    LevelParse {
        index: u32,
        #[source]
        source: serde_json::Error,
    },

    #[error("level {index} is invalid: {reason}")]
    InvalidLevel { index: u32, reason: String },

    #[error("animation set has no idle frames")]
    MissingIdleFrames,

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("failed to read tuning from {}: {source}", path.display())]
    TuningIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("tuning file is malformed: {0}")]
    TuningParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
