//! Primer design abstraction.
//!
//! Primer selection is delegated entirely to an external constraint-based
//! engine. The engine sits behind the [`PrimerDesign`] trait so any
//! equivalent library can be substituted, and so tests can use an in-memory
//! fake with no subprocess.

use thiserror::Error;

use crate::core::primer::{DesignTask, PrimerPair};

pub mod primer3;

pub use primer3::Primer3Engine;

#[derive(Error, Debug)]
pub enum DesignError {
    #[error("primer3 executable '{executable}' not found; install primer3 or set {}", primer3::PRIMER3_ENV_BIN)]
    EngineNotFound { executable: String },

    #[error("primer3 exited with status {status:?}: {stderr}")]
    EngineFailed {
        status: Option<i32>,
        stderr: String,
    },

    #[error("primer3 reported an error: {0}")]
    Engine(String),

    #[error("could not parse primer3 output: {0}")]
    BadOutput(String),

    #[error(
        "target region {offset}+{len} extends past the template (length {template_len})"
    )]
    TargetOutOfBounds {
        offset: usize,
        len: usize,
        template_len: usize,
    },

    #[error("IO error talking to primer3: {0}")]
    Io(#[from] std::io::Error),
}

/// A primer design engine.
pub trait PrimerDesign {
    /// Design a primer pair for `task`.
    ///
    /// Returns `Ok(None)` when the engine ran but no pair satisfies the
    /// constraints (e.g. low-complexity template); that is a per-guide
    /// outcome, not an infrastructure failure.
    ///
    /// # Errors
    ///
    /// Returns `DesignError` when the engine itself cannot run or produces
    /// output the caller cannot interpret.
    fn design(&self, task: &DesignTask<'_>) -> Result<Option<PrimerPair>, DesignError>;
}
