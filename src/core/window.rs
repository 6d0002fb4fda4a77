use crate::core::locus::Strand;
use crate::utils::dna::reverse_complement;

/// Genomic sequence covering a guide plus flanking context on both sides.
///
/// Index 0 of `sequence` corresponds to absolute position `start`
/// (`locus.start - flank`), so on the plus strand the guide sits at offset
/// `flank` within the window. For minus-strand loci the sequence has been
/// reverse-complemented, which shifts the guide's offset within the window;
/// the target offset is NOT re-derived for that case (see
/// `pipeline::project`), matching the behavior this tool reproduces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlankingWindow {
    /// Uppercase, strand-corrected sequence
    pub sequence: String,

    /// Absolute start of the fetched interval
    pub start: u64,

    /// Absolute end of the fetched interval
    pub end: u64,

    /// Strand of the underlying guide match
    pub strand: Strand,
}

impl FlankingWindow {
    /// Build a window from raw fetched sequence, reverse-complementing for
    /// minus-strand loci and uppercasing unconditionally.
    #[must_use]
    pub fn new(raw: &str, start: u64, end: u64, strand: Strand) -> Self {
        let sequence = match strand {
            Strand::Plus => raw.to_ascii_uppercase(),
            Strand::Minus => reverse_complement(raw).to_ascii_uppercase(),
        };
        Self {
            sequence,
            start,
            end,
            strand,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plus_strand_uppercases() {
        let window = FlankingWindow::new("acgtn", 100, 105, Strand::Plus);
        assert_eq!(window.sequence, "ACGTN");
        assert_eq!(window.len(), 5);
    }

    #[test]
    fn test_minus_strand_reverse_complements() {
        let window = FlankingWindow::new("aacg", 100, 104, Strand::Minus);
        assert_eq!(window.sequence, "CGTT");
    }
}
