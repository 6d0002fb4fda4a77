//! HTTP clients for the remote genome services.
//!
//! Both services sit behind narrow traits so the pipeline can be exercised
//! in tests with in-memory fakes instead of live endpoints:
//!
//! - [`AlignmentService`]: resolve genomic hits for a sequence (BLAT)
//! - [`SequenceService`]: fetch raw sequence for an interval (UCSC API)

use std::time::Duration;

use thiserror::Error;

pub mod blat;
pub mod sequence;

pub use blat::{BlatClient, BlatHit};
pub use sequence::SequenceClient;

/// Bound on every remote call, so a stalled service cannot hang a batch.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected {service} response: {message}")]
    BadResponse {
        service: &'static str,
        message: String,
    },
}

/// Resolves genomic alignments for a DNA sequence.
pub trait AlignmentService {
    /// Return all reported hits for `seq`, unfiltered and with the service's
    /// native (0-based) coordinates.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` on network failure, non-2xx status, or a
    /// response the client cannot interpret.
    fn locate(&self, seq: &str) -> Result<Vec<BlatHit>, RemoteError>;
}

/// Fetches raw genomic sequence for an interval.
pub trait SequenceService {
    /// Return the bases covering `chrom:start-end`, as served (no strand
    /// correction, no case normalization).
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` on network failure, non-2xx status, or a
    /// response the client cannot interpret.
    fn fetch(&self, chrom: &str, start: u64, end: u64) -> Result<String, RemoteError>;
}
