//! Convert command CLI handler.

use crate::convert::{self, ConversionReport, ConvertConfig};
use std::path::PathBuf;

pub fn run(
    input: PathBuf,
    output: PathBuf,
    lenient: bool,
    progress: bool,
    dry_run: bool,
) -> anyhow::Result<()> {
    let config = ConvertConfig {
        input: input.clone(),
        output: output.clone(),
        strict: !lenient,
        progress,
        dry_run,
    };

    let report = convert::run(&config)?;

    print_summary(&input, &output, &report, dry_run);

    Ok(())
}

fn print_summary(input: &PathBuf, output: &PathBuf, report: &ConversionReport, dry_run: bool) {
    eprintln!();
    eprintln!("Conversion complete!");
    eprintln!("  Input:  {}", input.display());
    eprintln!("  Output: {}", output.display());
    eprintln!();
    eprintln!("Statistics:");
    eprintln!("  Total tables processed: {}", report.total_tables);
    eprintln!("  Total rows converted:   {}", report.total_rows);
    eprintln!("  Tables with no data:    {}", report.skipped_tables);

    if report.has_errors() {
        eprintln!();
        eprintln!(
            "Warnings: {} rows skipped due to column count mismatch",
            report.errors.len()
        );
        eprintln!("  (see warnings above for details)");
        eprintln!();
        eprintln!("Some rows were skipped. Please review the warnings above.");
        eprintln!("The output file may be missing some data.");
    }

    if dry_run {
        eprintln!();
        eprintln!("(Dry run - no output written)");
    }
}
