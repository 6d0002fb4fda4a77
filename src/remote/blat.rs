//! Client for the UCSC BLAT web service.
//!
//! BLAT returns a JSON object with a `fields` array naming the PSL columns
//! and a `blat` array of row arrays. Columns are resolved by name rather
//! than position, so field reordering on the server side stays harmless.

use serde::Deserialize;
use serde_json::Value;

use crate::core::locus::Strand;
use crate::remote::{AlignmentService, RemoteError, REQUEST_TIMEOUT};

pub const BLAT_URL: &str = "https://genome.ucsc.edu/cgi-bin/hgBlat";

/// One alignment row, reduced to the columns the pipeline consumes.
///
/// `start` is the service's native 0-based target start; the +1 browser
/// correction is applied later, when a hit is promoted to a `GuideLocus`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlatHit {
    /// Number of matching bases
    pub matches: u64,

    /// Target sequence name (chromosome)
    pub chrom: String,

    /// 0-based target start
    pub start: u64,

    /// Target end (inclusive under the browser's 1-based convention)
    pub end: u64,

    pub strand: Strand,
}

#[derive(Debug, Deserialize)]
struct BlatResponse {
    fields: Vec<String>,
    blat: Vec<Vec<Value>>,
}

pub struct BlatClient {
    http: reqwest::blocking::Client,
    genome: String,
}

impl BlatClient {
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

impl AlignmentService for BlatClient {
    fn locate(&self, seq: &str) -> Result<Vec<BlatHit>, RemoteError> {
        let response = self
            .http
            .get(BLAT_URL)
            .query(&[
                ("userSeq", seq),
                ("type", "DNA"),
                ("db", self.genome.as_str()),
                ("output", "json"),
            ])
            .send()?
            .error_for_status()?;
        parse_blat_response(&response.text()?)
    }
}

/// Parse the BLAT JSON body into hits.
///
/// # Errors
///
/// Returns `RemoteError::BadResponse` if the body is not the expected JSON
/// shape or a row is missing/mistyped in a consumed column.
pub fn parse_blat_response(body: &str) -> Result<Vec<BlatHit>, RemoteError> {
    let response: BlatResponse = serde_json::from_str(body).map_err(|e| bad(e.to_string()))?;

    let col = |name: &str| {
        response
            .fields
            .iter()
            .position(|f| f == name)
            .ok_or_else(|| bad(format!("missing field '{name}'")))
    };
    let matches_col = col("matches")?;
    let strand_col = col("strand")?;
    let chrom_col = col("tName")?;
    let start_col = col("tStart")?;
    let end_col = col("tEnd")?;

    let mut hits = Vec::with_capacity(response.blat.len());
    for row in &response.blat {
        hits.push(BlatHit {
            matches: number_at(row, matches_col, "matches")?,
            chrom: string_at(row, chrom_col, "tName")?,
            start: number_at(row, start_col, "tStart")?,
            end: number_at(row, end_col, "tEnd")?,
            strand: strand_at(row, strand_col)?,
        });
    }
    Ok(hits)
}

fn bad(message: String) -> RemoteError {
    RemoteError::BadResponse {
        service: "BLAT",
        message,
    }
}

fn number_at(row: &[Value], index: usize, name: &str) -> Result<u64, RemoteError> {
    row.get(index)
        .and_then(Value::as_u64)
        .ok_or_else(|| bad(format!("row is missing numeric '{name}'")))
}

fn string_at(row: &[Value], index: usize, name: &str) -> Result<String, RemoteError> {
    row.get(index)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| bad(format!("row is missing '{name}'")))
}

fn strand_at(row: &[Value], index: usize) -> Result<Strand, RemoteError> {
    match row.get(index).and_then(Value::as_str) {
        Some("+") => Ok(Strand::Plus),
        Some("-") => Ok(Strand::Minus),
        other => Err(bad(format!("unrecognized strand {other:?}"))),
    }
}
