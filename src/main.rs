//! Prints count, min, max, mean, standard deviation, quantiles and an
//! optional histogram of the numbers read from files or standard input, one
//! per line.

use anyhow::Context;
use clap::Parser;
use std::{
    fs::File,
    io::{self, BufReader},
    path::PathBuf,
    process::ExitCode,
};
use summarize::{
    read_values, BucketCount, HistogramStyle, InputStats, Quantiles, Summarizer, SummaryConfig,
    SummaryError, HISTOGRAM_WIDTH,
};
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "summarize", version, about)]
struct Cli {
    /// Comma-separated quantiles to record, each in (0, 1)
    #[arg(
        short,
        long,
        env = "SUMMARIZE_QUANTILES",
        default_value = "0.5,0.9,0.99"
    )]
    quantiles: String,

    /// Print a histogram
    #[arg(long)]
    hist: bool,

    /// How many buckets for the histogram
    #[arg(
        short,
        long,
        env = "SUMMARIZE_BUCKETS",
        default_value_t = 10
    )]
    buckets: usize,

    /// Width in cells of the longest histogram bar
    #[arg(long, default_value_t = HISTOGRAM_WIDTH)]
    width: usize,

    /// Omit bucket percentages from the histogram
    #[arg(long)]
    no_percent: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Input files; standard input when empty or `-`
    files: Vec<PathBuf>,
}

/// Exit status for invalid configuration, distinct from runtime failures.
const EXIT_CONFIG: u8 = 2;

fn config(cli: &Cli) -> Result<SummaryConfig, SummaryError> {
    let quantiles: Quantiles = cli.quantiles.parse()?;
    let buckets = BucketCount::new(cli.buckets)?;
    Ok(SummaryConfig::new(quantiles, buckets))
}

fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<SummaryError>() {
        Some(e) if e.is_config() => EXIT_CONFIG,
        _ => 1,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(exit_status(&e))
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = config(&cli)?;
    debug!(quantiles = %config.quantiles, buckets = config.buckets.get(), "configured");
    let mut summarizer = Summarizer::new(config);

    let mut stats = InputStats::default();
    if cli.files.is_empty() {
        stats += read_values(io::stdin().lock(), &mut summarizer).context("reading stdin")?;
    }
    for path in &cli.files {
        stats += if path.as_os_str() == "-" {
            read_values(io::stdin().lock(), &mut summarizer).context("reading stdin")?
        } else {
            let file =
                File::open(path).with_context(|| format!("opening {}", path.display()))?;
            read_values(BufReader::new(file), &mut summarizer)
                .with_context(|| format!("reading {}", path.display()))?
        };
    }
    if stats.rejected > 0 {
        warn!("found {} non-numeric lines of input", stats.rejected);
    }

    let summary = match summarizer.summarize() {
        Ok(summary) => summary,
        Err(SummaryError::NoData) => {
            warn!("no numbers given");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    println!("{summary}");
    if cli.hist {
        let style = HistogramStyle {
            width: cli.width,
            show_percent: !cli.no_percent,
        };
        println!("{}", summary.histogram().render(style));
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("summarize=debug,warn")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}
