//! sleepdebt CLI - Command-line interface for the sleep debt engine
//!
//! Commands:
//! - stats: Debt, trend and recovery estimate for a sleep log
//! - compare: Day-by-day progression of the base and weighted engines
//! - summary: Weekday/weekend averages and spread of a sleep log
//! - config: Print the effective engine configuration

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use sleep_debt::progression::{DebtComparison, ProgressionPoint};
use sleep_debt::{
    compare_engines, DebtEngine, DebtError, PeriodSummary, SleepLog, SleepStats,
    WeightedConfig, WeightedDebtEngine, VERSION,
};

/// sleepdebt - Windowed sleep debt with decay-weighted recovery
#[derive(Parser)]
#[command(name = "sleepdebt")]
#[command(version = VERSION)]
#[command(about = "Compute sleep debt, trend and recovery estimates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Debt, trend and recovery estimate for a sleep log
    Stats {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        engine: EngineArgs,

        /// Use the weighted engine
        #[arg(long)]
        weighted: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Day-by-day progression of the base and weighted engines
    Compare {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        engine: EngineArgs,

        /// Output format
        #[arg(long, default_value = "ndjson")]
        output_format: OutputFormat,
    },

    /// Weekday/weekend averages and spread of a sleep log
    Summary {
        #[command(flatten)]
        input: InputArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective engine configuration as JSON
    Config {
        #[command(flatten)]
        engine: EngineArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Sleep log file, a JSON object of {"YYYY-MM-DD": hours} (use - for stdin)
    #[arg(short, long)]
    input: PathBuf,
}

#[derive(Args)]
struct EngineArgs {
    /// Load engine configuration from a JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Lookback window in days
    #[arg(long)]
    lookback: Option<usize>,

    /// Decay factor for the weighted engine, in (0, 1]
    #[arg(long)]
    decay: Option<f64>,

    /// EMA smoothing factor for the weighted engine, in [0, 1)
    #[arg(long)]
    smoothing: Option<f64>,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Newline-delimited JSON (one progression point per line, summary last)
    Ndjson,
    /// Single JSON document
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), SleepCliError> {
    match cli.command {
        Commands::Stats {
            input,
            engine,
            weighted,
            json,
        } => cmd_stats(&input.input, &engine, weighted, json),

        Commands::Compare {
            input,
            engine,
            output_format,
        } => cmd_compare(&input.input, &engine, output_format),

        Commands::Summary { input, json } => cmd_summary(&input.input, json),

        Commands::Config { engine } => cmd_config(&engine),
    }
}

fn cmd_stats(
    input: &Path,
    engine_args: &EngineArgs,
    weighted: bool,
    json: bool,
) -> Result<(), SleepCliError> {
    let log = read_log(input)?;
    let config = resolve_config(engine_args)?;

    let stats = if weighted {
        WeightedDebtEngine::with_config(config)?.statistics(&log)
    } else {
        DebtEngine::with_config(config.base)?.statistics(&log)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_stats(if weighted { "Weighted" } else { "Regular" }, &stats);
    }

    Ok(())
}

fn cmd_compare(
    input: &Path,
    engine_args: &EngineArgs,
    output_format: OutputFormat,
) -> Result<(), SleepCliError> {
    let log = read_log(input)?;
    let config = resolve_config(engine_args)?;

    let comparison = compare_engines(&log, &config)?;
    print!("{}", format_comparison(&comparison, &output_format)?);

    Ok(())
}

fn cmd_summary(input: &Path, json: bool) -> Result<(), SleepCliError> {
    let log = read_log(input)?;
    let summary = PeriodSummary::from_log(&log).ok_or(SleepCliError::NoRecords)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Sleep Summary ({} days)", summary.days);
    println!("=====================");
    println!("Average Sleep:      {:.2}h", summary.average_sleep);
    if let Some(avg) = summary.weekday_average {
        println!("Weekday Average:    {:.2}h", avg);
    }
    if let Some(avg) = summary.weekend_average {
        println!("Weekend Average:    {:.2}h", avg);
    }
    println!("Standard Deviation: {:.2}h", summary.std_dev);
    println!("Minimum Sleep:      {:.2}h", summary.min_sleep);
    println!("Maximum Sleep:      {:.2}h", summary.max_sleep);

    Ok(())
}

fn cmd_config(engine_args: &EngineArgs) -> Result<(), SleepCliError> {
    let config = resolve_config(engine_args)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn print_stats(label: &str, stats: &SleepStats) {
    println!("{} calculation", label);
    println!("Final Debt:     {:.2}h", stats.current_debt);
    println!("Recovery Days:  {}", stats.recovery_days);
    println!("Average Sleep:  {:.2}h", stats.average_sleep);
    println!(
        "Min / Max:      {:.1}h / {:.1}h",
        stats.min_sleep, stats.max_sleep
    );
    println!("Trend:          {}", stats.trend);
}

fn read_log(input: &Path) -> Result<SleepLog, SleepCliError> {
    let data = if input.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            return Err(SleepCliError::NoInput);
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let log = SleepLog::from_json(&data)?;
    debug!(days = log.len(), "loaded sleep log");
    Ok(log)
}

/// Config file first, then command-line overrides
fn resolve_config(args: &EngineArgs) -> Result<WeightedConfig, SleepCliError> {
    let mut config = match &args.config {
        Some(path) => WeightedConfig::from_json(&fs::read_to_string(path)?)?,
        None => WeightedConfig::default(),
    };

    if let Some(lookback) = args.lookback {
        config = config.with_lookback(lookback);
    }
    if let Some(decay) = args.decay {
        config = config.with_decay(decay);
    }
    if let Some(smoothing) = args.smoothing {
        config = config.with_smoothing(smoothing);
    }

    config.validate()?;
    Ok(config)
}

fn format_comparison(
    comparison: &DebtComparison,
    format: &OutputFormat,
) -> Result<String, SleepCliError> {
    match format {
        OutputFormat::Ndjson => {
            let mut lines: Vec<String> = comparison
                .points
                .iter()
                .map(serde_json::to_string::<ProgressionPoint>)
                .collect::<Result<_, _>>()?;
            lines.push(serde_json::to_string(&comparison.summary)?);
            Ok(lines.join("\n") + "\n")
        }
        OutputFormat::Json => Ok(serde_json::to_string(comparison)? + "\n"),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(comparison)? + "\n"),
    }
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
enum SleepCliError {
    Io(io::Error),
    Engine(DebtError),
    Json(serde_json::Error),
    NoInput,
    NoRecords,
}

impl From<io::Error> for SleepCliError {
    fn from(e: io::Error) -> Self {
        SleepCliError::Io(e)
    }
}

impl From<DebtError> for SleepCliError {
    fn from(e: DebtError) -> Self {
        SleepCliError::Engine(e)
    }
}

impl From<serde_json::Error> for SleepCliError {
    fn from(e: serde_json::Error) -> Self {
        SleepCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<SleepCliError> for CliError {
    fn from(e: SleepCliError) -> Self {
        match e {
            SleepCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            SleepCliError::Engine(DebtError::InvalidConfig(msg)) => CliError {
                code: "CONFIG_ERROR".to_string(),
                message: msg,
                hint: Some("Run `sleepdebt config` to see the effective configuration".to_string()),
            },
            SleepCliError::Engine(e) => CliError {
                code: "INPUT_ERROR".to_string(),
                message: e.to_string(),
                hint: Some(
                    "Input must be a JSON object of {\"YYYY-MM-DD\": hours} with non-negative hours"
                        .to_string(),
                ),
            },
            SleepCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            SleepCliError::NoInput => CliError {
                code: "NO_INPUT".to_string(),
                message: "stdin is a TTY, nothing to read".to_string(),
                hint: Some("Pipe a sleep log into stdin or pass --input <file>".to_string()),
            },
            SleepCliError::NoRecords => CliError {
                code: "NO_RECORDS".to_string(),
                message: "Sleep log contains no records".to_string(),
                hint: None,
            },
        }
    }
}
