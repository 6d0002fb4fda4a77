//! Client for the UCSC sequence-retrieval API (`getData/sequence`).

use serde::Deserialize;

use crate::remote::{RemoteError, SequenceService, REQUEST_TIMEOUT};

pub const SEQUENCE_URL: &str = "https://api.genome.ucsc.edu/getData/sequence";

#[derive(Debug, Deserialize)]
struct SequenceResponse {
    dna: String,
}

pub struct SequenceClient {
    http: reqwest::blocking::Client,
    genome: String,
}

impl SequenceClient {
    /// Build a client targeting the given genome assembly (e.g. `hs1`).
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Http` if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(genome: impl Into<String>) -> Result<Self, RemoteError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            genome: genome.into(),
        })
    }
}

impl SequenceService for SequenceClient {
    fn fetch(&self, chrom: &str, start: u64, end: u64) -> Result<String, RemoteError> {
        let start = start.to_string();
        let end = end.to_string();
        let response = self
            .http
            .get(SEQUENCE_URL)
            .query(&[
                ("genome", self.genome.as_str()),
                ("chrom", chrom),
                ("start", start.as_str()),
                ("end", end.as_str()),
            ])
            .send()?
            .error_for_status()?;
        parse_sequence_response(&response.text()?)
    }
}

/// Extract the `dna` field from a `getData/sequence` JSON body.
///
/// # Errors
///
/// Returns `RemoteError::BadResponse` if the body is not JSON or lacks the
/// `dna` field.
pub fn parse_sequence_response(body: &str) -> Result<String, RemoteError> {
    let response: SequenceResponse =
        serde_json::from_str(body).map_err(|e| RemoteError::BadResponse {
            service: "sequence",
            message: e.to_string(),
        })?;
    Ok(response.dna)
}
