//! Fix-json command CLI handler.

use crate::jsonfix::{self, FixConfig};
use std::path::PathBuf;

pub fn run(
    input: PathBuf,
    output: PathBuf,
    progress: bool,
    dry_run: bool,
) -> anyhow::Result<()> {
    let config = FixConfig {
        input: input.clone(),
        output: output.clone(),
        progress,
        dry_run,
    };

    let repaired = jsonfix::run(&config)?;

    eprintln!();
    eprintln!("JSON escape repair complete!");
    eprintln!("  Input:  {}", input.display());
    eprintln!("  Output: {}", output.display());
    eprintln!("  Literals repaired: {repaired}");

    if dry_run {
        eprintln!();
        eprintln!("(Dry run - no output written)");
    }

    Ok(())
}
