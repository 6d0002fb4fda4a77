//! Projection of window-relative primer positions onto genome coordinates,
//! and extraction of the expected amplicon.

use crate::core::locus::{format_coords, GuideLocus};
use crate::core::primer::PrimerPair;
use crate::core::window::FlankingWindow;
use crate::pipeline::PipelineError;

/// Primer coordinates projected onto the genome, as `chrom:start-end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedPair {
    pub left_coords: String,
    pub right_coords: String,
}

/// Translate primer positions (relative to the flanking window) into
/// absolute genome coordinates.
///
/// The guide starts at `target_offset` within the window and at
/// `locus.start` in the genome, so the left primer sits
/// `target_offset - left.start` bases upstream of the guide. The right
/// primer is placed via its spacing from the left primer, with the +1
/// adjustments the genome browser's indexing requires; its end is counted
/// backward from its 5' base.
///
/// The arithmetic assumes plus-strand geometry (left primer upstream of
/// right). Minus-strand loci are run through the same formula rather than a
/// re-derived one, and are flagged by the caller; their reported primer
/// coordinates may be incorrect.
#[must_use]
pub fn project_primer_pair(
    pair: &PrimerPair,
    locus: &GuideLocus,
    target_offset: u64,
) -> ProjectedPair {
    #[allow(clippy::cast_possible_wrap)] // Genome positions are far below i64::MAX
    let (guide_start, target_offset) = (locus.start as i64, target_offset as i64);

    let left_start = guide_start - (target_offset - pair.left.start as i64);
    let left_end = left_start + pair.left.sequence.len() as i64;

    let right_spacing = pair.right.start as i64 - pair.left.start as i64;
    let right_start = left_start + right_spacing + 1;
    let right_end = right_start - pair.right.length as i64 + 1;

    ProjectedPair {
        left_coords: format_coords(&locus.chrom, left_start, left_end),
        right_coords: format_coords(&locus.chrom, right_start, right_end),
    }
}

/// Slice the expected PCR product out of the flanking window: from the left
/// primer's first base through the right primer's 5' base, inclusive, so the
/// product carries both primer sequences.
///
/// # Errors
///
/// Returns `PipelineError::PrimerOutsideWindow` if the engine reported
/// positions that do not fit the window.
pub fn extract_amplicon(
    window: &FlankingWindow,
    pair: &PrimerPair,
) -> Result<String, PipelineError> {
    window
        .sequence
        .get(pair.left.start..=pair.right.start)
        .map(str::to_string)
        .ok_or(PipelineError::PrimerOutsideWindow {
            left: pair.left.start,
            right: pair.right.start,
            window_len: window.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::locus::Strand;
    use crate::core::primer::Primer;

    fn primer(seq: &str, start: usize) -> Primer {
        Primer {
            sequence: seq.to_string(),
            start,
            length: seq.len(),
            gc_percent: 50.0,
        }
    }

    fn locus() -> GuideLocus {
        GuideLocus {
            chrom: "chr1".to_string(),
            start: 1000,
            end: 1019,
            strand: Strand::Plus,
        }
    }

    #[test]
    fn test_project_primer_pair() {
        let pair = PrimerPair {
            left: primer("ACGTACGTACGTACGTACGT", 100),
            right: primer("TTGCATTGCATTGCATTGCA", 280),
        };
        let projected = project_primer_pair(&pair, &locus(), 250);

        // left: 1000 - (250 - 100) = 850, end 850 + 20 = 870
        assert_eq!(projected.left_coords, "chr1:850-870");
        // right: 850 + (280 - 100) + 1 = 1031, end 1031 - 20 + 1 = 1012
        assert_eq!(projected.right_coords, "chr1:1031-1012");
    }

    #[test]
    fn test_extract_amplicon() {
        let window = FlankingWindow::new("AAACCCGGGTTT", 0, 12, Strand::Plus);
        let pair = PrimerPair {
            left: primer("ACC", 2),
            right: primer("AAC", 9),
        };
        // Inclusive of the right primer's 5' base
        assert_eq!(extract_amplicon(&window, &pair).unwrap(), "ACCCGGGT");
    }

    #[test]
    fn test_extract_amplicon_out_of_window() {
        let window = FlankingWindow::new("AAACCC", 0, 6, Strand::Plus);
        let pair = PrimerPair {
            left: primer("ACC", 2),
            right: primer("AAC", 9),
        };
        assert!(matches!(
            extract_amplicon(&window, &pair),
            Err(PipelineError::PrimerOutsideWindow { .. })
        ));
    }
}
