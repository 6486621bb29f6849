//! mimesis CLI — compare two documents, write one score
//!
//! Thin shell over the library: parse arguments, install the log
//! subscriber, load and override the config, then run one comparison and
//! write the report. All diagnostics go to stderr; the output file is the
//! only thing this process produces.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use mimesis::{ingest, report, MimesisConfig, MimesisEngine, MimesisResult, ReportFormat};

#[derive(Parser)]
#[command(
    name = "mimesis",
    version,
    about = "Two-stage document similarity scorer",
    long_about = "Scores how much of CANDIDATE is covered by REFERENCE, 0.00 to 100.00.\n\n\
        A MinHash sketch comparison estimates token-set similarity first; only\n\
        pairs at or above the admission threshold pay for an exact\n\
        longest-common-subsequence confirmation. The score lands in OUTPUT\n\
        with two decimal places and a trailing newline."
)]
struct Cli {
    /// Reference document (the suspected source).
    reference: PathBuf,
    /// Candidate document, scored against the reference.
    candidate: PathBuf,
    /// File the score is written to.
    output: PathBuf,

    /// Jaccard estimate below which the pair is rejected without alignment.
    #[arg(short = 't', long)]
    threshold: Option<f64>,
    /// Number of MinHash permutations (sketch width).
    #[arg(short = 'p', long)]
    permutations: Option<usize>,
    /// Ceiling on the alignment table, in cells.
    #[arg(long)]
    max_table_cells: Option<u64>,
    /// Wall-clock budget for the alignment stage, in milliseconds.
    #[arg(long)]
    deadline_ms: Option<u64>,
    /// TOML config file; flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Report format for the output file.
    #[arg(long, value_enum, default_value = "text")]
    format: FormatArg,
    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Log errors only.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for ReportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Text => ReportFormat::Text,
            FormatArg::Json => ReportFormat::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    if let Err(err) = run(&cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> MimesisResult<()> {
    let mut config = match &cli.config {
        Some(path) => MimesisConfig::from_file(path)?,
        None => MimesisConfig::default(),
    };
    if let Some(threshold) = cli.threshold {
        config.admission_threshold = threshold;
    }
    if let Some(permutations) = cli.permutations {
        config.permutations = permutations;
    }
    if let Some(cells) = cli.max_table_cells {
        config.max_table_cells = cells;
    }
    if let Some(ms) = cli.deadline_ms {
        config.deadline_ms = Some(ms);
    }

    let engine = MimesisEngine::new(config)?;
    let reference = ingest::read_document(&cli.reference)?;
    let candidate = ingest::read_document(&cli.candidate)?;
    let breakdown = engine.compare(&reference, &candidate)?;
    info!(
        score = breakdown.score,
        admitted = breakdown.admitted,
        output = %cli.output.display(),
        "comparison complete"
    );
    report::write_report(&breakdown, cli.format.into(), &cli.output)
}

/// RUST_LOG wins when set; otherwise the -v/-q flags pick the level.
fn init_logging(verbose: u8, quiet: bool) {
    let fallback = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
