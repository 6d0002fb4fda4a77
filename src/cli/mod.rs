//! Command-line interface for amplidesign.
//!
//! One invocation processes one guide table:
//!
//! ```text
//! # Design validation primers for every guide in the table
//! amplidesign guides.tsv
//!
//! # Different assembly, wider flanking window, custom output path
//! amplidesign guides.tsv --genome hg38 --flank 400 --output primers.csv
//!
//! # JSON on stdout for scripting
//! amplidesign guides.tsv --format json
//! ```
//!
//! The input is tab-separated with at least `guide_name` and `guide_seq`
//! columns. Results always land in the output CSV; stdout carries the same
//! table in the selected format.

use std::path::PathBuf;

use clap::Parser;

pub mod design;

#[derive(Parser)]
#[command(name = "amplidesign")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Design PCR validation primers flanking CRISPR guide-RNA binding sites")]
#[command(
    long_about = "amplidesign takes a table of CRISPR guide RNAs, locates each guide in a genome assembly via the UCSC BLAT service, fetches flanking sequence, and delegates primer selection to primer3.\n\nEach guide yields one output row with:\n- Guide coordinates (perfect full-length matches only)\n- Left/right primer sequences, genome coordinates, and GC content\n- The expected PCR amplicon sequence"
)]
pub struct Cli {
    /// Input TSV with guide_name and guide_seq columns
    #[arg(required = true)]
    pub input: PathBuf,

    /// Genome assembly used for alignment and sequence retrieval
    #[arg(long, default_value = "hs1")]
    pub genome: String,

    /// Bases of flanking sequence fetched on each side of the guide
    #[arg(long, default_value = "250")]
    pub flank: u64,

    /// Output CSV path
    #[arg(short, long, default_value = "output.csv")]
    pub output: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format for stdout
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}
