//! Shell error taxonomy.
//!
//! Errors fall into four classes with different recovery behavior:
//! - parse errors: command skipped, session continues
//! - command-not-found: reported, pipeline keeps running, entry still recorded
//! - spawn errors: that pipeline is abandoned, session continues
//! - pipe errors: that pipeline is abandoned, session continues
//!
//! Nothing here is fatal to the session itself.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    /// A pipeline stage contained no tokens after trimming (e.g. `ls | | wc`).
    #[error("empty pipeline stage")]
    EmptyPipelineStage,

    /// More stages than the configured limit.
    #[error("too many pipeline stages (max {max})")]
    TooManyStages { max: usize },

    /// The named program could not be found or executed. Detected at launch
    /// time; the rest of the pipeline still runs and history is still written.
    #[error("{name}: command not found")]
    CommandNotFound { name: String },

    /// Process creation failed for a reason other than a missing program
    /// (e.g. resource exhaustion). The pipeline attempt is abandoned.
    #[error("failed to spawn {name}: {source}")]
    Spawn { name: String, source: io::Error },

    /// Pipe allocation failed. The pipeline attempt is abandoned.
    #[error("failed to create pipe: {0}")]
    Pipe(#[source] io::Error),
}

impl ShellError {
    /// True when the whole pipeline attempt must be abandoned rather than
    /// letting the remaining stages run.
    pub fn abandons_pipeline(&self) -> bool {
        matches!(self, ShellError::Spawn { .. } | ShellError::Pipe(_))
    }
}
