mod convert;
mod fix_json;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "copy2insert")]
#[command(version)]
#[command(about = "Convert PostgreSQL COPY FROM stdin dump blocks to INSERT statements", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert COPY FROM stdin blocks in a dump file to batched INSERT statements
    #[command(after_help = "Example: copy2insert convert dump_sqlonly.sql dump_inserts.sql")]
    Convert {
        /// Input PostgreSQL dump file
        input: PathBuf,

        /// Output SQL file
        output: PathBuf,

        /// Encode rows even when their field count disagrees with the column list
        #[arg(long)]
        lenient: bool,

        /// Show progress during conversion
        #[arg(short, long)]
        progress: bool,

        /// Convert without writing files (dry run)
        #[arg(long)]
        dry_run: bool,
    },

    /// Collapse over-escaped backslashes inside JSON string literals
    #[command(name = "fix-json")]
    #[command(after_help = "Example: copy2insert fix-json dump_inserts.sql dump_fixed.sql")]
    FixJson {
        /// Input SQL file (typically output of the convert command)
        input: PathBuf,

        /// Output SQL file
        output: PathBuf,

        /// Show progress during repair
        #[arg(short, long)]
        progress: bool,

        /// Repair without writing files (dry run)
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Convert {
            input,
            output,
            lenient,
            progress,
            dry_run,
        } => convert::run(input, output, lenient, progress, dry_run),
        Commands::FixJson {
            input,
            output,
            progress,
            dry_run,
        } => fix_json::run(input, output, progress, dry_run),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "copy2insert", &mut io::stdout());
            Ok(())
        }
    }
}
