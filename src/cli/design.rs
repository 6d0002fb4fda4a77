use std::io;
use std::path::Path;

use crate::cli::{Cli, OutputFormat};
use crate::core::primer::ProductSizeRange;
use crate::core::report::{DesignRow, GuideFailure, RunReport};
use crate::design::primer3::Primer3Engine;
use crate::parsing;
use crate::pipeline::{Pipeline, PipelineConfig};
use crate::remote::blat::BlatClient;
use crate::remote::sequence::SequenceClient;

/// Execute a design run.
///
/// # Errors
///
/// Returns an error if the input cannot be parsed, the output cannot be
/// written, or no guide in the batch could be processed.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let table = parsing::read_guides_file(&cli.input)?;

    if cli.verbose {
        eprintln!(
            "Parsed {} guide(s) from input ({} row(s) rejected)",
            table.guides.len(),
            table.rejected.len()
        );
    }

    let blat = BlatClient::new(&cli.genome)?;
    let sequences = SequenceClient::new(&cli.genome)?;
    let engine = Primer3Engine::from_env();

    let config = PipelineConfig {
        flank: cli.flank,
        product_size: ProductSizeRange::DEFAULT,
    };
    let pipeline = Pipeline::new(&blat, &sequences, &engine, config);

    let mut report = pipeline.run(&table.guides);
    for rejected in table.rejected {
        report.failures.push(GuideFailure {
            guide: rejected
                .name
                .unwrap_or_else(|| format!("line {}", rejected.line)),
            stage: "parse",
            reason: rejected.reason,
        });
    }

    write_csv(&report.rows, &cli.output)?;

    match cli.format {
        OutputFormat::Text => print_text_results(&report, &cli.output),
        OutputFormat::Json => print_json_results(&report)?,
        OutputFormat::Csv => print_csv_results(&report.rows)?,
    }

    if !report.failures.is_empty() {
        eprintln!(
            "{} of {} guide(s) failed:",
            report.failed(),
            report.failed() + report.succeeded()
        );
        for failure in &report.failures {
            eprintln!("  {} [{}]: {}", failure.guide, failure.stage, failure.reason);
        }
    }

    if report.rows.is_empty() {
        anyhow::bail!("no guides could be processed");
    }
    Ok(())
}

fn write_csv(rows: &[DesignRow], path: &Path) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn print_text_results(report: &RunReport, output: &Path) {
    for (i, row) in report.rows.iter().enumerate() {
        if i > 0 {
            println!("\n{}", "─".repeat(60));
        }

        println!(
            "\n#{} {} ({} {})",
            i + 1,
            row.guide_rna_name,
            row.guide_rna_coords,
            row.strand
        );
        println!("   Guide: {}", row.guide_rna_seq);
        println!(
            "   Left primer : {} ({}, GC {:.1}%)",
            row.primer_left_seq, row.primer_left_coords, row.primer_left_gc
        );
        println!(
            "   Right primer: {} ({}, GC {:.1}%)",
            row.primer_right_seq, row.primer_right_coords, row.primer_right_gc
        );
        println!("   Amplicon: {} bp", row.amplicon_seq.len());
    }

    println!("\nsee {} for the results", output.display());
}

fn print_json_results(report: &RunReport) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn print_csv_results(rows: &[DesignRow]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
