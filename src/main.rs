//! Cold-start benchmark collector (v1)
//!
//! Measures cold-start latency of benchmark functions deployed in one stack
//! and publishes the latest sample per function as JSON and a PNG chart.
//!
//! # Architecture Overview
//!
//! ```text
//!   BenchConfig ──▶ resolver ──▶ metrics::Collector ──▶ sink  (JSON)
//!   (targets)       (stack)      │  one task per target   └──▶ chart (PNG)
//!                                ▼
//!                         telemetry::TimingSource
//!                         ├── LogReportAdapter (REPORT lines)
//!                         └── TraceAdapter     (trace segments)
//!
//!   Cross-cutting: config, observability (tracing), resilience (deadlines),
//!                  lifecycle (startup wiring)
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::Instrument;
use uuid::Uuid;

use coldstart_bench::config::schema::ObservabilityConfig;
use coldstart_bench::config::{load_or_default, BenchConfig, ConfigError, TelemetrySource};
use coldstart_bench::error::BenchResult;
use coldstart_bench::lifecycle::{apply_overrides, build_describer, build_source, load_aws_config, Overrides};
use coldstart_bench::observability::init_logging;
use coldstart_bench::pipeline::{render_saved, Pipeline};

#[derive(Parser)]
#[command(name = "coldstart-bench", version)]
#[command(about = "Collect cold-start timings for benchmark functions and chart them", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve targets, collect timings, write results and chart (default)
    Collect(CollectArgs),
    /// Re-render the chart from a saved results file
    Render {
        /// Results JSON written by an earlier run
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG; defaults to the configured chart path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Default)]
struct CollectArgs {
    /// Stack that owns the benchmark functions
    #[arg(long)]
    stack: Option<String>,

    /// Telemetry backend to read timings from
    #[arg(long, value_enum)]
    source: Option<TelemetrySource>,

    /// Results JSON path
    #[arg(long)]
    results: Option<String>,

    /// Chart PNG path
    #[arg(long)]
    chart: Option<String>,

    /// Skip chart rendering
    #[arg(long)]
    no_chart: bool,
}

impl From<CollectArgs> for Overrides {
    fn from(args: CollectArgs) -> Self {
        Overrides {
            stack_name: args.stack,
            source: args.source,
            results_path: args.results,
            chart_path: args.chart,
            no_chart: args.no_chart,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = load_or_default(cli.config.as_deref());
    let observability = loaded
        .as_ref()
        .map(|config| config.observability.clone())
        .unwrap_or_else(|_| ObservabilityConfig::default());
    if let Err(e) = init_logging(&observability) {
        eprintln!("failed to initialize logging: {e}");
    }

    let span = tracing::info_span!("run", run_id = %Uuid::new_v4());
    let outcome = run(cli, loaded).instrument(span).await;

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Benchmark run failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, loaded: Result<BenchConfig, ConfigError>) -> BenchResult<()> {
    let config = loaded?;
    match cli.command.unwrap_or(Commands::Collect(CollectArgs::default())) {
        Commands::Collect(args) => collect(config, args.into()).await,
        Commands::Render { input, output } => {
            let output = output.unwrap_or_else(|| PathBuf::from(&config.output.chart_path));
            render_saved(&input, &output, &config.chart)?;
            Ok(())
        }
    }
}

async fn collect(config: BenchConfig, overrides: Overrides) -> BenchResult<()> {
    let config = apply_overrides(config, overrides)?;

    tracing::info!(
        stack = %config.stack_name,
        source = %config.collection.source,
        lookback_secs = config.collection.lookback_secs,
        target_timeout_secs = config.collection.target_timeout_secs,
        "Configuration loaded"
    );

    let sdk = load_aws_config(&config.aws).await;
    let describer = build_describer(&sdk);
    let source = build_source(&config, &sdk);

    let summary = Pipeline::new(config, describer, source).run().await?;
    if !summary.missing.is_empty() {
        tracing::info!(
            missing = summary.missing.len(),
            collected = summary.collected(),
            configured = summary.configured,
            "Some targets produced no data"
        );
    }
    Ok(())
}
