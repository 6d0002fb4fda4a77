use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Orientation of a genomic feature relative to the reference sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strand {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
        }
    }
}

/// Where a guide landed in the genome.
///
/// Coordinates follow the genome-browser convention: `start` is 1-based and
/// inclusive (the +1 correction from the aligner's 0-based start has already
/// been applied by the time a locus exists), `end` is inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideLocus {
    /// Chromosome/contig name (e.g. `chr1`)
    pub chrom: String,

    /// 1-based inclusive start of the guide match
    pub start: u64,

    /// Inclusive end of the guide match
    pub end: u64,

    /// Strand the guide matched on
    pub strand: Strand,
}

impl GuideLocus {
    /// Format this locus as `chrom:start-end`.
    #[must_use]
    pub fn coords(&self) -> String {
        format_coords(&self.chrom, self.start, self.end)
    }
}

/// Format a genomic interval as `chrom:start-end`.
///
/// This is the only place the output coordinate string is assembled, so the
/// separator and field order stay consistent across every report column.
pub fn format_coords(chrom: &str, start: impl Display, end: impl Display) -> String {
    format!("{chrom}:{start}-{end}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_coords() {
        assert_eq!(format_coords("chr1", 1000, 1019), "chr1:1000-1019");
        // Projection arithmetic is signed; negative bounds must not panic
        assert_eq!(format_coords("chrX", -5i64, 12i64), "chrX:-5-12");
    }

    #[test]
    fn test_locus_coords() {
        let locus = GuideLocus {
            chrom: "chr1".to_string(),
            start: 1000,
            end: 1019,
            strand: Strand::Plus,
        };
        assert_eq!(locus.coords(), "chr1:1000-1019");
    }

    #[test]
    fn test_strand_display() {
        assert_eq!(Strand::Plus.to_string(), "+");
        assert_eq!(Strand::Minus.to_string(), "-");
    }
}
