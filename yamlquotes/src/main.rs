// These Clippy lints are disabled because this is a CLI binary, not a library:
// - print_stdout/print_stderr: CLI tools are expected to print to stdout/stderr for user output.
// - exit: Calling `std::process::exit()` is standard for CLI apps to signal failure to the shell.
#![allow(clippy::print_stdout, clippy::print_stderr, clippy::exit)]

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use yamlquotes::loader::DEFAULT_MAX_FILE_SIZE;
use yamlquotes::{CheckConfig, DiscoverConfig, check_files, find_files, output};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Human,
    Json,
}

/// Report YAML string values that are not double-quoted.
#[derive(Debug, Parser)]
#[command(name = "yamlquotes", version, about)]
struct Cli {
    /// Files or directories to check
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Glob pattern to exclude (matched against the path and the file name)
    #[arg(long, value_name = "GLOB")]
    exclude: Vec<String>,

    /// Skip files larger than this many bytes
    #[arg(long, default_value_t = DEFAULT_MAX_FILE_SIZE)]
    max_file_size: u64,

    /// Follow symbolic links while walking directories
    #[arg(long)]
    follow_links: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Returns whether the run was clean.
fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut discover = DiscoverConfig::default();
    discover.paths = cli.paths;
    discover.exclude = cli.exclude;
    discover.follow_links = cli.follow_links;

    let files = find_files(&discover).context("failed to collect YAML files")?;

    let mut config = CheckConfig::default();
    config.max_file_size = cli.max_file_size;
    let report = check_files(&files, &config);

    tracing::info!(
        inspected = report.inspected_files,
        skipped = report.skipped_files,
        issues = report.issues_count(),
        "check finished"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Human => output::write_human(&report, &mut out)?,
        OutputFormat::Json => output::write_json(&report, &mut out)?,
    }
    out.flush()?;

    Ok(report.ok)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(2);
        }
    }
}
