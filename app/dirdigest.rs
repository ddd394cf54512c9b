//! Command-line interface for dirdigest.
//!
//! Builds a validated [`DigestOptions`] from the arguments, runs the digest,
//! and reports the outcome.

use clap::{Parser, ValueEnum};
use dirdigest::{
    BinaryDetection, DigestBuilder, DigestError, DigestOptions, DryRunSummary, WriteOutcome, run,
};
use std::path::PathBuf;
use std::process::exit;

/// dirdigest — flatten a directory into one text document
#[derive(Parser, Debug)]
#[command(name = "dirdigest", version, about, long_about = None)]
struct Cli {
    /// Root directory (default current dir)
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Output file (relative paths resolve against the current dir)
    #[arg(short, long, default_value = "digest.txt")]
    output: PathBuf,

    /// Ignore patterns (can be repeated)
    #[arg(short = 'I', long = "ignore")]
    ignore_patterns: Vec<String>,

    /// Include patterns; when given, only matching files are kept (can be repeated)
    #[arg(short = 'i', long = "include")]
    include_patterns: Vec<String>,

    /// Do not render the directory tree
    #[arg(long)]
    no_tree: bool,

    /// Report what would be processed without reading files or writing output
    #[arg(long)]
    dry_run: bool,

    /// Overwrite the output file if it exists
    #[arg(short, long)]
    force: bool,

    /// Silence informational messages
    #[arg(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Do not merge the built-in ignore list
    #[arg(long)]
    no_default_ignores: bool,

    /// Also honour .gitignore files
    #[arg(long)]
    gitignore: bool,

    /// Follow symlinks
    #[arg(long)]
    follow_links: bool,

    /// Max depth (unlimited if not set)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Binary detection strategy
    #[arg(long, value_enum, default_value_t = Detection::None)]
    binary_detection: Detection,

    /// Print the dry-run summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Detection {
    Simple,
    Accurate,
    None,
}

impl From<Detection> for BinaryDetection {
    fn from(value: Detection) -> Self {
        match value {
            Detection::Simple => BinaryDetection::Simple,
            Detection::Accurate => BinaryDetection::Accurate,
            Detection::None => BinaryDetection::None,
        }
    }
}

impl Cli {
    fn into_options(self) -> DigestOptions {
        let output = std::path::absolute(&self.output).unwrap_or(self.output);
        let builder = DigestBuilder::new(self.root)
            .output_path(output)
            .ignore_patterns(self.ignore_patterns)
            .include_patterns(self.include_patterns)
            .include_tree(!self.no_tree)
            .dry_run(self.dry_run)
            .force(self.force)
            .quiet(self.quiet)
            .default_ignores(!self.no_default_ignores)
            .respect_gitignore(self.gitignore)
            .follow_links(self.follow_links)
            .binary_detection(self.binary_detection.into());

        let builder = match self.max_depth {
            Some(depth) => builder.max_depth(depth),
            None => builder.no_limit_depth(),
        };
        builder.build()
    }
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.quiet, cli.verbose);
    let json = cli.json;
    let quiet = cli.quiet;
    let options = cli.into_options();
    log::debug!("Resolved options: {:?}", options);

    match run(&options) {
        Ok(WriteOutcome::Written {
            path,
            processed_count,
            ..
        }) => {
            if !quiet {
                println!("Wrote {} file(s) to {}", processed_count, path.display());
            }
        }
        Ok(WriteOutcome::DryRun(summary)) => print_summary(&summary, json),
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(exit_code(&e));
        }
    }
}

fn setup_logging(quiet: bool, verbose: u8) {
    let level = if quiet {
        log::LevelFilter::Warn
    } else {
        match verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

fn exit_code(error: &DigestError) -> i32 {
    match error {
        DigestError::OutputExists { .. } | DigestError::InvalidPattern { .. } => 1,
        DigestError::Write { .. } => 2,
    }
}

fn print_summary(summary: &DryRunSummary, json: bool) {
    if json {
        match serde_json::to_string_pretty(summary) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("JSON serialization error: {}", e);
                exit(2);
            }
        }
        return;
    }

    if let Some(tree) = &summary.tree {
        println!("Directory tree:\n{}\n", tree);
    }
    println!("Files that would be processed:");
    for path in &summary.paths {
        println!("  {}", path);
    }
    println!(
        "\n{} file(s) would be written to {}",
        summary.processed_count,
        summary.destination.display()
    );
}
