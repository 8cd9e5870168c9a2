//! Command-level failures
//!
//! These are reported as a single `Error: ...` line and never stop the run.
//! Store and I/O failures travel as `anyhow::Error` instead.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Too few tokens for the selected command
    #[error("Invalid {0} command")]
    Invalid(&'static str),

    #[error("Unknown command {0}")]
    Unknown(String),

    #[error("Could not find post or comment with permalink {0}")]
    NotFound(String),

    /// Replies cannot themselves be replied to
    #[error("Cannot add comment to a comment on a comment")]
    NestingTooDeep,
}
