//! # amplidesign
//!
//! A library and CLI for designing PCR validation primers around CRISPR
//! guide-RNA binding sites.
//!
//! After editing a locus with CRISPR, the edit is usually confirmed by PCR
//! amplification and sequencing. That requires a primer pair flanking the
//! guide's binding site, which in turn requires knowing where the guide
//! actually lands in the genome. `amplidesign` automates the whole chain:
//!
//! 1. **Locate**: align each guide sequence against a genome assembly with
//!    the UCSC BLAT service and keep only perfect full-length hits
//! 2. **Fetch**: retrieve flanking genomic sequence around the hit from the
//!    UCSC sequence API, strand-corrected
//! 3. **Design**: hand the flanking sequence to the primer3 engine with the
//!    guide as the mandatory target region
//! 4. **Project**: translate primer positions back to genome coordinates
//! 5. **Report**: emit one CSV row per guide with primers, coordinates,
//!    GC content, and the expected amplicon sequence
//!
//! ## Example
//!
//! ```rust,no_run
//! use amplidesign::pipeline::{Pipeline, PipelineConfig};
//! use amplidesign::design::primer3::Primer3Engine;
//! use amplidesign::remote::blat::BlatClient;
//! use amplidesign::remote::sequence::SequenceClient;
//! use amplidesign::GuideRecord;
//!
//! let blat = BlatClient::new("hs1").unwrap();
//! let sequences = SequenceClient::new("hs1").unwrap();
//! let engine = Primer3Engine::from_env();
//!
//! let pipeline = Pipeline::new(&blat, &sequences, &engine, PipelineConfig::default());
//! let guides = vec![GuideRecord::new("guide1", "ACGTACGTACGTACGTACGT")];
//! let report = pipeline.run(&guides);
//!
//! for row in &report.rows {
//!     println!("{}: {} / {}", row.guide_rna_name, row.primer_left_seq, row.primer_right_seq);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Domain types for guides, loci, primers, and report rows
//! - [`parsing`]: Guide table (TSV) reader
//! - [`remote`]: HTTP clients for the BLAT and sequence-retrieval services
//! - [`design`]: Primer design abstraction and the primer3 engine
//! - [`pipeline`]: Per-guide processing stages and batch controller
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod design;
pub mod parsing;
pub mod pipeline;
pub mod remote;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::guide::GuideRecord;
pub use crate::core::locus::{format_coords, GuideLocus, Strand};
pub use crate::core::primer::{DesignTask, Primer, PrimerPair, ProductSizeRange};
pub use crate::core::report::{DesignRow, GuideFailure, RunReport};
pub use crate::pipeline::{Pipeline, PipelineConfig, PipelineError};
