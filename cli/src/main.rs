//! CLI for issue-batch.
//!
//! Reads issue records from a file (or the embedded backlog) and creates one
//! GitHub issue per record in the target repository.

use clap::Parser;
use issue_batch::{
    delay_from_secs, print_dry_run_preview, resolve_token, Credentials, EmbeddedSource,
    FileSource, IssueRecord, IssueSource, RunSummary, SubmitError, Submitter, SubmitterConfig,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use url::Url;

/// Backlog compiled into the binary, used with `--embedded`.
const EMBEDDED_BACKLOG: EmbeddedSource =
    EmbeddedSource::new("backlog", include_str!("../backlog/issues.json"));

/// Issue Batch - Create GitHub issues from a list of issue records.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// GitHub Personal Access Token (falls back to the GITHUB_TOKEN env var).
    #[arg(long)]
    token: Option<String>,

    /// Repository owner.
    #[arg(long)]
    owner: String,

    /// Repository name.
    #[arg(long)]
    repo: String,

    /// Path to the issues file (.json or .toml).
    #[arg(long, default_value = "issues.json", conflicts_with = "embedded")]
    file: PathBuf,

    /// Use the backlog embedded in this binary instead of a file.
    #[arg(long)]
    embedded: bool,

    /// Delay between API calls in seconds.
    #[arg(long, default_value = "1.0", value_parser = parse_delay)]
    delay: Duration,

    /// Show what would be created without creating issues.
    #[arg(long)]
    dry_run: bool,

    /// Skip the confirmation prompt.
    #[arg(short, long)]
    yes: bool,

    /// GitHub REST API root (for GitHub Enterprise).
    #[arg(long, env = "GITHUB_API_URL")]
    api_base: Option<Url>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    if rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .is_err()
    {
        warn!("A rustls crypto provider was already installed");
    }

    // Parse arguments
    let args = Args::parse();

    // Run the main logic
    match run(args).await {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            error!(error = %e, "Critical failure");
            if matches!(e, SubmitError::MissingToken) {
                print_token_help();
            }
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Logs go to stderr so stdout carries only the progress and summary lines.
/// The level comes from `RUST_LOG`, defaulting to "info".
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn parse_delay(value: &str) -> Result<Duration, String> {
    let secs: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number of seconds"))?;
    delay_from_secs(secs).map_err(|e| e.to_string())
}

/// Main execution logic.
async fn run(args: Args) -> Result<(), SubmitError> {
    let records = load_records(&args)?;
    let repository = format!("{}/{}", args.owner, args.repo);

    if args.dry_run {
        print_dry_run_preview(&records, &repository);
        return Ok(());
    }

    let token = resolve_token(args.token)?;
    let mut config = SubmitterConfig::new(Credentials::new(token, args.owner, args.repo))
        .with_delay(args.delay);
    if let Some(api_base) = args.api_base {
        config = config.with_api_base(api_base);
    }

    let submitter = Submitter::github(&config)?;
    let login = submitter.authenticate().await?;
    println!("Authenticated as: {login}\n");

    if !args.yes && !confirm(records.len(), &repository) {
        println!("Cancelled.");
        return Ok(());
    }

    println!("Found {} issues to create.", records.len());
    println!("Creating issues in {repository}...");
    println!("{}", "-".repeat(60));

    let summary = submitter.submit_all(&records).await;
    print_summary(&summary, &config);
    Ok(())
}

fn load_records(args: &Args) -> Result<Vec<IssueRecord>, SubmitError> {
    let source: Box<dyn IssueSource> = if args.embedded {
        Box::new(EMBEDDED_BACKLOG)
    } else {
        Box::new(FileSource::new(&args.file))
    };

    let records = source.load()?;
    info!(source = %source.describe(), count = records.len(), "Loaded issue records");
    Ok(records)
}

/// Asks the operator to confirm the run. Anything but "y"/"yes" declines.
fn confirm(count: usize, repository: &str) -> bool {
    print!("Create {count} issues in {repository}? (yes/no): ");
    if let Err(e) = io::stdout().flush() {
        warn!(error = %e, "Failed to flush prompt");
    }

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => is_affirmative(&answer),
        Err(e) => {
            warn!(error = %e, "Failed to read confirmation");
            false
        }
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn print_token_help() {
    eprintln!("\nTo create a token:");
    eprintln!("1. Go to https://github.com/settings/tokens");
    eprintln!("2. Click 'Generate new token' -> 'Generate new token (classic)'");
    eprintln!("3. Give it a name and select 'repo' scope");
    eprintln!("4. Click 'Generate token' and pass it via --token or GITHUB_TOKEN");
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary, config: &SubmitterConfig) {
    println!("{}", "-".repeat(60));
    println!("Summary:");
    println!("  Created: {}", summary.created);
    println!("  Failed:  {}", summary.failed);
    println!("  Total:   {}", summary.total_attempted);

    if config.is_public_github() {
        println!(
            "\nView issues at: https://github.com/{}/issues",
            config.credentials().full_name()
        );
    }
}
