//! COPY FROM stdin → INSERT conversion pass.
//!
//! Reads the whole dump document into memory, replaces each recognized
//! `COPY <table> (<columns>) FROM stdin; ... \.` block with batched INSERT
//! statements, and writes the substituted document out. Text outside COPY
//! blocks is preserved byte-for-byte.

mod copy_to_insert;
mod report;

pub use copy_to_insert::{convert_document, encode_value, CopyBlock};
pub use report::ConversionReport;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;

/// Configuration for the convert command
#[derive(Debug)]
pub struct ConvertConfig {
    /// Input dump file
    pub input: PathBuf,
    /// Output SQL file
    pub output: PathBuf,
    /// Drop rows whose field count disagrees with the declared columns
    pub strict: bool,
    /// Show progress
    pub progress: bool,
    /// Convert without writing output
    pub dry_run: bool,
}

/// Run the convert command
pub fn run(config: &ConvertConfig) -> anyhow::Result<ConversionReport> {
    let progress_bar = if config.progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message("Converting...");
        Some(pb)
    } else {
        None
    };

    let content = fs::read_to_string(&config.input)
        .with_context(|| format!("Failed to read {}", config.input.display()))?;

    let (converted, report) = convert_document(&content, config.strict);

    if !config.dry_run {
        fs::write(&config.output, converted)
            .with_context(|| format!("Failed to write {}", config.output.display()))?;
    }

    if let Some(pb) = progress_bar {
        pb.finish_with_message(format!(
            "Converted {} tables, {} rows",
            report.total_tables, report.total_rows
        ));
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_run_writes_converted_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("dump.sql");
        let output = dir.path().join("out.sql");
        fs::write(&input, "COPY t (a) FROM stdin;\nhello\n\\.\n").unwrap();

        let config = ConvertConfig {
            input,
            output: output.clone(),
            strict: true,
            progress: false,
            dry_run: false,
        };
        let report = run(&config).unwrap();

        assert_eq!(report.total_rows, 1);
        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("INSERT INTO t (a) VALUES"));
        assert!(written.contains("('hello');"));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("dump.sql");
        let output = dir.path().join("out.sql");
        fs::write(&input, "COPY t (a) FROM stdin;\nx\n\\.\n").unwrap();

        let config = ConvertConfig {
            input,
            output: output.clone(),
            strict: true,
            progress: false,
            dry_run: true,
        };
        let report = run(&config).unwrap();

        assert_eq!(report.total_rows, 1);
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = ConvertConfig {
            input: dir.path().join("nope.sql"),
            output: dir.path().join("out.sql"),
            strict: true,
            progress: false,
            dry_run: false,
        };
        let err = run(&config).unwrap_err();
        assert!(err.to_string().contains("nope.sql"));
    }
}
