//! # Workshop Error Types
//!
//! Every failure the run can report. All of them are unrecoverable at the
//! point of detection: the caller prints a single-line message and exits
//! with code 1. The protocol itself has no recoverable runtime errors.

use std::io;
use thiserror::Error;

/// Errors that abort a workshop run.
#[derive(Error, Debug)]
pub enum WorkshopError {
    /// Wrong number of CLI arguments, or input that is not an integer.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// A parsed CLI value violates its declared bound.
    #[error("argument out of range: {0}")]
    ArgumentOutOfRange(String),

    /// An actor thread could not be spawned. The harness drains and joins
    /// every already-started actor before surfacing this.
    #[error("failed to spawn {role} actor: {source}")]
    ActorSpawn {
        /// Which actor failed to start.
        role: &'static str,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// A joined actor terminated abnormally (panicked) instead of reaching
    /// its terminal state.
    #[error("{role} actor terminated abnormally")]
    ActorFailed {
        /// Which actor failed.
        role: &'static str,
    },

    /// The journal file could not be opened, written, or flushed.
    #[error("journal I/O failure: {0}")]
    Journal(#[from] io::Error),
}

/// Result type for workshop operations.
pub type WorkshopResult<T> = Result<T, WorkshopError>;
