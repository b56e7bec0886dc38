mod codec;
mod config;
mod error;
mod generators;
mod parameters;
mod pipeline;
mod prng;
mod serializer;
mod solvers;
mod types;

use std::fs::File;
use std::io::{self, BufWriter};
use std::process::ExitCode;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info};

use crate::config::{GeneratorType, Mode, PipelineConfig, SolverType};
use crate::error::RunError;
use crate::parameters::{print_all_params_help, print_param_help, GeneratorParams};

#[derive(Parser)]
#[command(name = "maze_trace_gen")]
#[command(about = "Deterministic grid-maze / A* reasoning-trace dataset generator")]
struct Args {
    /// Generator algorithm
    #[arg(short, long, required_unless_present = "list_params")]
    generator: Option<String>,

    /// Solver algorithm
    #[arg(short, long, required_unless_present = "list_params")]
    solver: Option<String>,

    /// Grid rows
    #[arg(short, long, default_value_t = 30)]
    rows: usize,

    /// Grid columns
    #[arg(short, long, default_value_t = 30)]
    cols: usize,

    /// train contributes parity bit 0, test contributes parity bit 1 to the PRNG seed
    #[arg(short, long, value_enum, default_value_t = Mode::Train)]
    mode: Mode,

    /// Base seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of examples to emit
    #[arg(short = 'n', long, default_value_t = 1)]
    count: u64,

    /// Initial batch size
    #[arg(long, default_value_t = config::DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Upper bound the dispatcher may grow the batch size to
    #[arg(long, default_value_t = config::DEFAULT_MAX_BATCH_SIZE)]
    max_batch_size: usize,

    /// Batches buffered between producer and consumer
    #[arg(long, default_value_t = config::DEFAULT_PRODUCER_BUFFER)]
    producer_buffer: usize,

    /// Requested solver worker count
    #[arg(short, long)]
    workers: Option<usize>,

    /// Output file path; omit for stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Print parameter help for one generator (or all, if omitted) and exit
    #[arg(long, value_name = "GENERATOR")]
    list_params: Option<Option<String>>,

    /// Generator-specific overrides, e.g. `--coverage 0.75`
    #[arg(allow_hyphen_values = true, trailing_var_arg = true, hide = true)]
    overflow: Vec<String>,
}

/// Splits CLI overflow tokens (`--name value --name2 value2 ...`) into
/// `(name, value)` pairs for `GeneratorParams`.
fn parse_overflow(tokens: &[String]) -> Result<Vec<(String, String)>, RunError> {
    let mut pairs = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        let name = token
            .strip_prefix("--")
            .ok_or_else(|| RunError::Config(format!("unrecognized option '{}'", token)))?;
        let value = tokens
            .get(i + 1)
            .ok_or_else(|| RunError::Config(format!("option '--{}' is missing a value", name)))?;
        pairs.push((name.to_string(), value.clone()));
        i += 2;
    }
    Ok(pairs)
}

fn default_worker_count() -> usize {
    let cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    cpus.saturating_sub(2).max(1)
}

fn run(args: Args) -> Result<(), RunError> {
    if let Some(maybe_generator) = &args.list_params {
        match maybe_generator {
            Some(name) => print_param_help(GeneratorType::parse(name)?),
            None => print_all_params_help(),
        }
        return Ok(());
    }

    let generator = GeneratorType::parse(
        args.generator
            .as_deref()
            .ok_or_else(|| RunError::Config("--generator is required".into()))?,
    )?;
    let solver = SolverType::parse(
        args.solver
            .as_deref()
            .ok_or_else(|| RunError::Config("--solver is required".into()))?,
    )?;

    let overflow_pairs = parse_overflow(&args.overflow)?;
    let generator_params = GeneratorParams::from_pairs(overflow_pairs).map_err(RunError::Config)?;

    let workers = args.workers.unwrap_or_else(default_worker_count);

    let config = PipelineConfig {
        rows: args.rows,
        cols: args.cols,
        mode: args.mode,
        seed: args.seed,
        count: args.count,
        generator,
        solver,
        batch_size: args.batch_size,
        max_batch_size: args.max_batch_size,
        producer_buffer: args.producer_buffer,
        workers,
        generator_params,
    };
    config.validate()?;

    info!(
        generator = %config.generator,
        solver = %config.solver,
        rows = config.rows,
        cols = config.cols,
        mode = %config.mode,
        seed = config.seed,
        count = config.count,
        workers = config.resolved_worker_count(),
        "starting run"
    );

    let progress = ProgressBar::new(config.count);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.green/red} {pos}/{len} examples ({per_sec})")
            .expect("static template is valid")
            .progress_chars("##-"),
    );

    let result = match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| RunError::Config(e.to_string()))?;
            let sink = BufWriter::with_capacity(8 * 1024 * 1024, file);
            pipeline::run(&config, sink, Some(&progress))
        }
        None => {
            let sink = BufWriter::with_capacity(8 * 1024 * 1024, io::stdout().lock());
            pipeline::run(&config, sink, Some(&progress))
        }
    };

    match &result {
        Ok(()) => progress.finish_with_message("done"),
        Err(e) => {
            progress.abandon_with_message("failed");
            error!(error = %e, "run failed");
        }
    }

    result
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
