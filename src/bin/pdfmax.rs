use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use pdfmax::{PageSelection, RecognizedNumber, ScanOptions, find_largest_number};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "pdfmax",
    version,
    about = "Find the largest unit-normalized number in a financial PDF"
)]
struct Cli {
    /// Input PDF path.
    #[arg(default_value = "./input.pdf")]
    input: PathBuf,

    /// Page selection like 1-3,5 (1-based).
    #[arg(long)]
    pages: Option<String>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_options(cli: &Cli) -> Result<ScanOptions> {
    let pages = cli
        .pages
        .as_deref()
        .map(PageSelection::from_str)
        .transpose()
        .map_err(|error| anyhow!("invalid page selection: {error}"))
        .context("failed to parse --pages")?;

    Ok(ScanOptions { pages })
}

fn run(cli: &Cli) -> Result<Option<RecognizedNumber>> {
    let options = parse_options(cli)?;
    find_largest_number(&cli.input, &options)
        .with_context(|| format!("failed to scan '{}'", cli.input.display()))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "pdfmax=debug" } else { "pdfmax=warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    println!(
        "Scanning '{}' for its largest numeric value",
        cli.input.display()
    );
    match run(&cli) {
        Ok(Some(largest)) => {
            println!("Largest number: {}", largest.value);
            println!("Found at page: {}", largest.page_index);
            println!("Matching text: {}", largest.raw_text);
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("No numbers were found in the document.");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(1)
        }
    }
}
