//! Repair over-escaped JSON string literals in converted SQL output.
//!
//! Naive nested-JSON-to-SQL encoding leaves runs of four backslashes inside
//! `'{...}'` literals. This pass collapses that one known artifact: every run
//! of four backslashes becomes two, then any remaining backslash pair before
//! a double quote becomes a single backslash. It is a targeted fixer, not a
//! JSON codec, and it does not validate the repaired content.

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;
use regex::{Captures, Regex, RegexBuilder};
use std::fs;
use std::path::PathBuf;

// Single-quoted literals whose body is brace-delimited, i.e. JSON-looking.
static RE_JSON_LITERAL: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"'(\{.*?\})'")
        .dot_matches_new_line(true)
        .build()
        .unwrap()
});

/// Configuration for the fix-json command
#[derive(Debug)]
pub struct FixConfig {
    /// Input SQL file (already converted)
    pub input: PathBuf,
    /// Output SQL file
    pub output: PathBuf,
    /// Show progress
    pub progress: bool,
    /// Repair without writing output
    pub dry_run: bool,
}

/// Collapse over-escaped backslashes inside JSON-looking literals.
///
/// Returns the repaired text and the number of literals touched. Literals
/// with no four-backslash run are left untouched, so running the repair on
/// its own output changes nothing.
pub fn repair_document(input: &str) -> (String, u64) {
    let mut repaired = 0u64;

    let output = RE_JSON_LITERAL.replace_all(input, |caps: &Captures| {
        let body = &caps[1];
        if !body.contains("\\\\\\\\") {
            return caps[0].to_string();
        }
        repaired += 1;
        let collapsed = body.replace("\\\\\\\\", "\\\\").replace("\\\\\"", "\\\"");
        format!("'{collapsed}'")
    });

    (output.into_owned(), repaired)
}

/// Run the fix-json command
pub fn run(config: &FixConfig) -> anyhow::Result<u64> {
    let progress_bar = if config.progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message("Repairing...");
        Some(pb)
    } else {
        None
    };

    let content = fs::read_to_string(&config.input)
        .with_context(|| format!("Failed to read {}", config.input.display()))?;

    let (fixed, repaired) = repair_document(&content);

    if !config.dry_run {
        fs::write(&config.output, fixed)
            .with_context(|| format!("Failed to write {}", config.output.display()))?;
    }

    if let Some(pb) = progress_bar {
        pb.finish_with_message(format!("Repaired {repaired} literals"));
    }

    Ok(repaired)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_four_backslash_runs() {
        // Doubly-escaped nested JSON: four literal backslashes before each
        // inner quote, the artifact left by encoding a JSON text column
        let input = r#"INSERT INTO t (j) VALUES ('{"a": "\\\\"b\\\\""}');"#;
        let (output, repaired) = repair_document(input);

        assert_eq!(repaired, 1);
        assert!(output.contains(r#"'{"a": "\"b\""}'"#));
    }

    #[test]
    fn test_idempotent_when_no_run_remains() {
        let (once, _) = repair_document(r#"('{"a": "\\\\"b\\\\""}')"#);
        let (twice, second) = repair_document(&once);
        assert_eq!(second, 0);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_two_backslash_quote_collapsed_after_runs() {
        let input = r#"('{"k": \\\\x \\"v\\"}')"#;
        let (output, repaired) = repair_document(input);

        assert_eq!(repaired, 1);
        // Four-run → two, then \\" → \"
        assert_eq!(output, r#"('{"k": \\x \"v\"}')"#);
    }

    #[test]
    fn test_untouched_without_four_backslash_run() {
        let input = r#"('{"a": "\\n already fine"}')"#;
        let (output, repaired) = repair_document(input);
        assert_eq!(output, input);
        assert_eq!(repaired, 0);
    }

    #[test]
    fn test_non_json_literals_left_alone() {
        let input = r"('plain \\\\ text'), ('another')";
        let (output, repaired) = repair_document(input);
        assert_eq!(output, input);
        assert_eq!(repaired, 0);
    }

    #[test]
    fn test_counts_each_literal_once() {
        let input = r#"('{"a": \\\\1}'), ('{"b": \\\\2}'), ('{"c": ok}')"#;
        let (_, repaired) = repair_document(input);
        assert_eq!(repaired, 2);
    }
}
