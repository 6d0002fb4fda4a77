//! Per-guide processing pipeline and batch controller.
//!
//! Each guide walks the same stages strictly in order: locate the guide in
//! the genome, fetch flanking sequence, design primers, project primer
//! coordinates, extract the amplicon, emit a row. A stage failure aborts
//! that guide only; the batch always runs to completion and reports every
//! failure alongside the rows that succeeded.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::guide::GuideRecord;
use crate::core::locus::{GuideLocus, Strand};
use crate::core::primer::{DesignTask, PrimerPair, ProductSizeRange};
use crate::core::report::{DesignRow, GuideFailure, RunReport};
use crate::core::window::FlankingWindow;
use crate::design::{DesignError, PrimerDesign};
use crate::remote::{AlignmentService, RemoteError, SequenceService};

pub mod project;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("alignment lookup failed: {0}")]
    Locate(RemoteError),

    #[error("no exact full-length alignment found")]
    NoAlignmentFound,

    #[error("flanking sequence fetch failed: {0}")]
    Fetch(RemoteError),

    #[error("primer design failed: {0}")]
    Design(DesignError),

    #[error("no primer pair satisfies the design constraints")]
    PrimerDesignFailed,

    #[error("primer positions {left}..{right} fall outside the flanking window (length {window_len})")]
    PrimerOutsideWindow {
        left: usize,
        right: usize,
        window_len: usize,
    },
}

impl PipelineError {
    /// Name of the stage this failure belongs to, for failure reporting.
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Locate(_) | Self::NoAlignmentFound => "locate",
            Self::Fetch(_) => "fetch-flank",
            Self::Design(_) | Self::PrimerDesignFailed => "design-primers",
            Self::PrimerOutsideWindow { .. } => "extract-amplicon",
        }
    }
}

/// Tunables for a batch run.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    /// Bases fetched on each side of the guide match
    pub flank: u64,

    /// Allowed PCR product length range
    pub product_size: ProductSizeRange,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            flank: 250,
            product_size: ProductSizeRange::DEFAULT,
        }
    }
}

/// Batch controller. Owns nothing but borrows the three capabilities each
/// stage needs, so tests can plug in fakes for all of them.
pub struct Pipeline<'a> {
    aligner: &'a dyn AlignmentService,
    sequences: &'a dyn SequenceService,
    engine: &'a dyn PrimerDesign,
    config: PipelineConfig,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        aligner: &'a dyn AlignmentService,
        sequences: &'a dyn SequenceService,
        engine: &'a dyn PrimerDesign,
        config: PipelineConfig,
    ) -> Self {
        Self {
            aligner,
            sequences,
            engine,
            config,
        }
    }

    /// Process every guide, log-and-continue on failure.
    ///
    /// The returned report's `rows` is the append-only output table, in
    /// input order; `failures` records each guide that did not make it.
    #[must_use]
    pub fn run(&self, guides: &[GuideRecord]) -> RunReport {
        let mut report = RunReport::default();
        for guide in guides {
            match self.run_guide(guide) {
                Ok(row) => {
                    info!("designed primers for guide '{}'", guide.name);
                    report.rows.push(row);
                }
                Err(e) => {
                    warn!("guide '{}' failed at {}: {e}", guide.name, e.stage());
                    report.failures.push(GuideFailure {
                        guide: guide.name.clone(),
                        stage: e.stage(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        report
    }

    fn run_guide(&self, guide: &GuideRecord) -> Result<DesignRow, PipelineError> {
        let locus = self.locate(guide)?;
        if locus.strand == Strand::Minus {
            warn!(
                "guide '{}' matched the minus strand; primer coordinates are \
                 projected with plus-strand geometry and may be incorrect",
                guide.name
            );
        }

        let window = self.fetch_window(&locus)?;
        let pair = self.design_primers(guide, &window)?;
        let projected = project::project_primer_pair(&pair, &locus, self.config.flank);
        let amplicon = project::extract_amplicon(&window, &pair)?;

        Ok(DesignRow {
            guide_rna_name: guide.name.clone(),
            guide_rna_seq: guide.sequence.clone(),
            guide_rna_coords: locus.coords(),
            strand: locus.strand.to_string(),
            primer_left_seq: pair.left.sequence.clone(),
            primer_left_coords: projected.left_coords,
            primer_left_gc: pair.left.gc_percent,
            primer_right_seq: pair.right.sequence.clone(),
            primer_right_coords: projected.right_coords,
            primer_right_gc: pair.right.gc_percent,
            amplicon_seq: amplicon,
        })
    }

    /// Locate the guide in the genome: keep only perfect full-length hits,
    /// apply the +1 correction onto the aligner's 0-based start, and take
    /// the first qualifying hit in response order.
    fn locate(&self, guide: &GuideRecord) -> Result<GuideLocus, PipelineError> {
        let hits = self
            .aligner
            .locate(&guide.sequence)
            .map_err(PipelineError::Locate)?;

        let full_length = guide.len() as u64;
        let mut exact = hits.into_iter().filter(|h| h.matches == full_length);

        let hit = exact.next().ok_or(PipelineError::NoAlignmentFound)?;
        let discarded = exact.count();
        if discarded > 0 {
            debug!(
                "guide '{}' has {discarded} additional exact hit(s); using the first",
                guide.name
            );
        }

        Ok(GuideLocus {
            chrom: hit.chrom,
            start: hit.start + 1,
            end: hit.end,
            strand: hit.strand,
        })
    }

    /// Fetch guide ± flank, strand-corrected and uppercased.
    fn fetch_window(&self, locus: &GuideLocus) -> Result<FlankingWindow, PipelineError> {
        let start = locus.start.saturating_sub(self.config.flank);
        let end = locus.end + self.config.flank;
        let raw = self
            .sequences
            .fetch(&locus.chrom, start, end)
            .map_err(PipelineError::Fetch)?;
        Ok(FlankingWindow::new(&raw, start, end, locus.strand))
    }

    /// Run the external engine with the guide pinned inside the product.
    ///
    /// The target region is checked against the template before the engine
    /// is invoked, so no engine ever sees a target extending past the
    /// template (possible when the window was truncated at a chromosome
    /// boundary).
    fn design_primers(
        &self,
        guide: &GuideRecord,
        window: &FlankingWindow,
    ) -> Result<PrimerPair, PipelineError> {
        #[allow(clippy::cast_possible_truncation)] // Flank lengths are small
        let target_offset = self.config.flank as usize;
        let target_len = guide.len();
        if target_offset + target_len > window.len() {
            return Err(PipelineError::Design(DesignError::TargetOutOfBounds {
                offset: target_offset,
                len: target_len,
                template_len: window.len(),
            }));
        }

        let task = DesignTask {
            id: &guide.name,
            template: &window.sequence,
            target_offset,
            target_len,
            product_size: self.config.product_size,
        };
        self.engine
            .design(&task)
            .map_err(PipelineError::Design)?
            .ok_or(PipelineError::PrimerDesignFailed)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::core::primer::Primer;
    use crate::remote::BlatHit;
    use crate::utils::dna::{gc_percent, reverse_complement};

    /// Serves canned hits keyed by guide sequence.
    struct FakeAligner {
        hits: Vec<(String, Vec<BlatHit>)>,
    }

    impl AlignmentService for FakeAligner {
        fn locate(&self, seq: &str) -> Result<Vec<BlatHit>, RemoteError> {
            Ok(self
                .hits
                .iter()
                .find(|(s, _)| s == seq)
                .map(|(_, hits)| hits.clone())
                .unwrap_or_default())
        }
    }

    /// Returns a deterministic sequence of the requested interval length and
    /// records the interval it was asked for.
    struct FakeSequences {
        requested: RefCell<Vec<(String, u64, u64)>>,
    }

    impl FakeSequences {
        fn new() -> Self {
            Self {
                requested: RefCell::new(Vec::new()),
            }
        }
    }

    impl SequenceService for FakeSequences {
        fn fetch(&self, chrom: &str, start: u64, end: u64) -> Result<String, RemoteError> {
            self.requested
                .borrow_mut()
                .push((chrom.to_string(), start, end));
            let len = (end - start) as usize;
            // Non-periodic content so primer slices are distinctive
            Ok((0..len)
                .map(|i| match (i * 7 + i / 13) % 4 {
                    0 => 'a',
                    1 => 'c',
                    2 => 'g',
                    _ => 't',
                })
                .collect())
        }
    }

    /// Slices "primers" straight out of the template it is handed, like the
    /// real engine does, and records the templates it saw.
    struct FakeEngine {
        left_start: usize,
        right_start: usize,
        primer_len: usize,
        invoked: Cell<usize>,
        templates: RefCell<Vec<String>>,
    }

    impl FakeEngine {
        fn new(left_start: usize, right_start: usize, primer_len: usize) -> Self {
            Self {
                left_start,
                right_start,
                primer_len,
                invoked: Cell::new(0),
                templates: RefCell::new(Vec::new()),
            }
        }
    }

    impl PrimerDesign for FakeEngine {
        fn design(&self, task: &DesignTask<'_>) -> Result<Option<PrimerPair>, DesignError> {
            self.invoked.set(self.invoked.get() + 1);
            self.templates.borrow_mut().push(task.template.to_string());

            let left_seq = &task.template[self.left_start..self.left_start + self.primer_len];
            let right_slice =
                &task.template[self.right_start + 1 - self.primer_len..=self.right_start];
            Ok(Some(PrimerPair {
                left: Primer {
                    sequence: left_seq.to_string(),
                    start: self.left_start,
                    length: self.primer_len,
                    gc_percent: gc_percent(left_seq),
                },
                right: Primer {
                    sequence: reverse_complement(right_slice),
                    start: self.right_start,
                    length: self.primer_len,
                    gc_percent: gc_percent(right_slice),
                },
            }))
        }
    }

    /// Engine that always comes up empty.
    struct NoPairEngine;

    impl PrimerDesign for NoPairEngine {
        fn design(&self, _task: &DesignTask<'_>) -> Result<Option<PrimerPair>, DesignError> {
            Ok(None)
        }
    }

    const GUIDE_SEQ: &str = "ACGTACGTACGTACGTACGT";

    fn plus_hit() -> BlatHit {
        BlatHit {
            matches: 20,
            chrom: "chr1".to_string(),
            start: 999,
            end: 1019,
            strand: Strand::Plus,
        }
    }

    #[test]
    fn test_locate_applies_plus_one_and_filters() {
        let aligner = FakeAligner {
            hits: vec![(
                GUIDE_SEQ.to_string(),
                vec![
                    // Partial hit must be skipped even though it comes first
                    BlatHit {
                        matches: 18,
                        chrom: "chr9".to_string(),
                        start: 1,
                        end: 19,
                        strand: Strand::Plus,
                    },
                    plus_hit(),
                ],
            )],
        };
        let sequences = FakeSequences::new();
        let engine = FakeEngine::new(100, 280, 20);
        let pipeline = Pipeline::new(&aligner, &sequences, &engine, PipelineConfig::default());

        let report = pipeline.run(&[GuideRecord::new("g1", GUIDE_SEQ)]);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].guide_rna_coords, "chr1:1000-1019");
        assert_eq!(report.rows[0].strand, "+");
    }

    #[test]
    fn test_full_plus_strand_scenario() {
        let aligner = FakeAligner {
            hits: vec![(GUIDE_SEQ.to_string(), vec![plus_hit()])],
        };
        let sequences = FakeSequences::new();
        let engine = FakeEngine::new(100, 280, 20);
        let pipeline = Pipeline::new(&aligner, &sequences, &engine, PipelineConfig::default());

        let report = pipeline.run(&[GuideRecord::new("g1", GUIDE_SEQ)]);
        assert!(report.failures.is_empty());
        let row = &report.rows[0];

        // Fetch window is guide ± 250
        assert_eq!(
            sequences.requested.borrow().as_slice(),
            &[("chr1".to_string(), 750, 1269)]
        );

        // Amplicon spans left primer start through right primer 5' base
        assert_eq!(row.amplicon_seq.len(), 280 - 100 + 1);
        assert!((150..=250).contains(&row.amplicon_seq.len()));

        // The product carries both primers
        assert!(row.amplicon_seq.starts_with(&row.primer_left_seq));
        let tail = &row.amplicon_seq[row.amplicon_seq.len() - 20..];
        assert_eq!(reverse_complement(tail), row.primer_right_seq);

        // Projection: left = 1000 - (250 - 100) = 850
        assert_eq!(row.primer_left_coords, "chr1:850-870");
        assert_eq!(row.primer_right_coords, "chr1:1031-1012");
    }

    #[test]
    fn test_no_alignment_recorded_batch_continues() {
        let aligner = FakeAligner {
            hits: vec![(GUIDE_SEQ.to_string(), vec![plus_hit()])],
        };
        let sequences = FakeSequences::new();
        let engine = FakeEngine::new(100, 280, 20);
        let pipeline = Pipeline::new(&aligner, &sequences, &engine, PipelineConfig::default());

        let guides = vec![
            GuideRecord::new("lost", "TTTTTTTTTTGGGGGGGGGG"),
            GuideRecord::new("found", GUIDE_SEQ),
        ];
        let report = pipeline.run(&guides);

        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.rows[0].guide_rna_name, "found");
        assert_eq!(report.failed(), 1);
        assert_eq!(report.failures[0].guide, "lost");
        assert_eq!(report.failures[0].stage, "locate");
        assert!(report.failures[0].reason.contains("no exact full-length"));
    }

    #[test]
    fn test_minus_strand_template_is_reverse_complemented() {
        let mut hit = plus_hit();
        hit.strand = Strand::Minus;
        let aligner = FakeAligner {
            hits: vec![(GUIDE_SEQ.to_string(), vec![hit])],
        };
        let sequences = FakeSequences::new();
        let engine = FakeEngine::new(100, 280, 20);
        let pipeline = Pipeline::new(&aligner, &sequences, &engine, PipelineConfig::default());

        let report = pipeline.run(&[GuideRecord::new("g1", GUIDE_SEQ)]);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].strand, "-");

        // The engine must see the reverse complement of what was fetched
        let raw = sequences.fetch("chr1", 750, 1269).unwrap();
        let expected = reverse_complement(&raw).to_ascii_uppercase();
        assert_eq!(engine.templates.borrow()[0], expected);
    }

    #[test]
    fn test_engine_not_invoked_when_target_past_template() {
        let aligner = FakeAligner {
            hits: vec![(
                GUIDE_SEQ.to_string(),
                // Match right at the chromosome start; the fetched window is
                // truncated shorter than flank + guide
                vec![BlatHit {
                    matches: 20,
                    chrom: "chr1".to_string(),
                    start: 9,
                    end: 15,
                    strand: Strand::Plus,
                }],
            )],
        };
        let sequences = FakeSequences::new();
        let engine = FakeEngine::new(0, 100, 20);
        let pipeline = Pipeline::new(&aligner, &sequences, &engine, PipelineConfig::default());

        let report = pipeline.run(&[GuideRecord::new("g1", GUIDE_SEQ)]);
        assert_eq!(engine.invoked.get(), 0);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.failures[0].stage, "design-primers");
        assert!(report.failures[0].reason.contains("target region"));
    }

    #[test]
    fn test_no_primer_pair_is_design_failure() {
        let aligner = FakeAligner {
            hits: vec![(GUIDE_SEQ.to_string(), vec![plus_hit()])],
        };
        let sequences = FakeSequences::new();
        let engine = NoPairEngine;
        let pipeline = Pipeline::new(&aligner, &sequences, &engine, PipelineConfig::default());

        let report = pipeline.run(&[GuideRecord::new("g1", GUIDE_SEQ)]);
        assert!(report.rows.is_empty());
        assert_eq!(report.failures[0].stage, "design-primers");
        assert!(report.failures[0].reason.contains("no primer pair"));
    }
}
