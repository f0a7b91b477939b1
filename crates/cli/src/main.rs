//! rowfetch command-line driver.
//!
//! This binary loads an embedding matrix and an input text, then runs one of:
//! 1. **Sweep:** Search a strategy parameter (lookahead distance or n-gram order) for the best speedup.
//! 2. **Compare:** Time one strategy (Markov, n-gram, fixed lookahead) against the no-prefetch baseline.
//!
//! Exit status is 0 on success and 1 on any failure, including an input text
//! with no tokens in the matrix vocabulary.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use rowfetch_core::bench::{self, BenchmarkHarness, MonotonicClock, PrefetchingAccessor, SweepController};
use rowfetch_core::config::{BenchConfig, Strategy, StrategyFamily};
use rowfetch_core::hint::{CacheHint, HintSpan};
use rowfetch_core::input;
use rowfetch_core::{AccessPattern, BenchError, EmbeddingStore};

#[derive(Parser, Debug)]
#[command(
    name = "rowfetch",
    author,
    version,
    about = "Predictive prefetching benchmarks for embedding lookups",
    long_about = "Time a lookup-and-reduce pass over an embedding matrix with and without software prefetch hints.\n\nExamples:\n  rowfetch sweep --matrix data/glove.840B.300d.txt --input data/input.txt\n  rowfetch sweep --family ngram --start 1 --end 5 --dimension 25 --matrix data/glove.twitter.27B.25d.txt\n  rowfetch compare --strategy markov --dimension 25 --matrix data/glove.twitter.27B.25d.txt\n  rowfetch compare --strategy ngram:3 --json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sweep a strategy parameter and report the best speedup over the baseline.
    Sweep {
        /// Parameter family to sweep: lookahead or ngram.
        #[arg(long)]
        family: Option<StrategyFamily>,

        /// First parameter value.
        #[arg(long)]
        start: Option<usize>,

        /// Last parameter value (inclusive).
        #[arg(long)]
        end: Option<usize>,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Compare one strategy against the baseline: none, markov, lookahead:K, ngram:N.
    Compare {
        /// Strategy to compare.
        #[arg(short, long)]
        strategy: Option<Strategy>,

        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// JSON configuration file; flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Matrix file (`token v1 ... vD` per line).
    #[arg(short, long)]
    matrix: Option<PathBuf>,

    /// Input text whose tokens form the access pattern.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Embedding dimension of the matrix file.
    #[arg(short, long)]
    dimension: Option<usize>,

    /// Timed passes per strategy.
    #[arg(short, long)]
    repetitions: Option<usize>,

    /// How much of each row to hint: first-line or whole-row.
    #[arg(long)]
    hint_span: Option<HintSpan>,

    /// Pin the benchmark thread to this CPU (Linux).
    #[arg(long)]
    pin_cpu: Option<usize>,

    /// Print the report as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Log per-pass timings (overridden by RUST_LOG).
    #[arg(short, long)]
    verbose: bool,
}

impl CommonArgs {
    /// Loads the configuration file (or defaults) and applies flag overrides.
    fn config(&self) -> Result<BenchConfig, BenchError> {
        let mut config = match &self.config {
            Some(path) => BenchConfig::load(path)?,
            None => BenchConfig::default(),
        };
        if let Some(path) = &self.matrix {
            config.input.matrix_path.clone_from(path);
        }
        if let Some(path) = &self.input {
            config.input.tokens_path.clone_from(path);
        }
        if let Some(dimension) = self.dimension {
            config.dimension = dimension;
        }
        if let Some(repetitions) = self.repetitions {
            config.repetitions = repetitions;
        }
        if let Some(span) = self.hint_span {
            config.hint_span = span;
        }
        if self.pin_cpu.is_some() {
            config.pin_cpu = self.pin_cpu;
        }
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();

    let (common, verbose) = match &cli.command {
        Commands::Sweep { common, .. } | Commands::Compare { common, .. } => {
            (common, common.verbose)
        }
    };
    init_tracing(verbose);

    if let Err(e) = run(&cli.command, common) {
        eprintln!("\n[!] FATAL: {e}");
        process::exit(1);
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves configuration, loads inputs, and dispatches the subcommand.
fn run(command: &Commands, common: &CommonArgs) -> Result<(), BenchError> {
    let mut config = common.config()?;
    match command {
        Commands::Sweep {
            family, start, end, ..
        } => {
            if let Some(family) = family {
                config.sweep.family = *family;
            }
            if let Some(start) = start {
                config.sweep.start = *start;
            }
            if let Some(end) = end {
                config.sweep.end = *end;
            }
        }
        Commands::Compare { strategy, .. } => {
            if let Some(strategy) = strategy {
                config.strategy = *strategy;
            }
        }
    }
    config.validate()?;
    debug!(?config, "resolved configuration");

    if let Some(cpu) = config.pin_cpu {
        bench::pin_to_cpu(cpu)?;
    }

    let (store, pattern) = load_inputs(&config)?;
    if pattern.is_empty() {
        eprintln!("No valid words found in input file!");
        process::exit(1);
    }
    println!(
        "Loaded {} rows (d = {}), {} lookups over {} distinct rows",
        store.row_count(),
        store.dimension(),
        pattern.len(),
        pattern.distinct_rows()
    );

    let accessor = PrefetchingAccessor::new(CacheHint::new(config.hint_span), MonotonicClock::new());
    debug!(span = ?accessor.hint().span(), "cache hint configured");
    let mut harness = BenchmarkHarness::with_tolerance(accessor, config.tolerance);

    match command {
        Commands::Sweep { .. } => {
            let mut controller = SweepController::new(harness, config.repetitions);
            let report = controller.sweep(
                &store,
                &pattern,
                config.sweep.family,
                config.sweep.range(),
            )?;
            if common.json {
                println!("{}", report.to_json()?);
            } else {
                report.print();
            }
        }
        Commands::Compare { .. } => {
            let report = bench::compare(
                &mut harness,
                &store,
                &pattern,
                config.strategy,
                config.repetitions,
            )?;
            if common.json {
                println!("{}", report.to_json()?);
            } else {
                report.print();
            }
        }
    }
    Ok(())
}

/// Loads the matrix and resolves the input text against its vocabulary.
fn load_inputs(config: &BenchConfig) -> Result<(EmbeddingStore, AccessPattern), BenchError> {
    println!("Loading embeddings from {} ...", config.input.matrix_path.display());
    let (vocabulary, store) = input::load_matrix(&config.input.matrix_path, config.dimension)?;
    println!("Loading input words from {} ...", config.input.tokens_path.display());
    let pattern = input::load_tokens(&config.input.tokens_path, &vocabulary, &store)?;
    Ok((store, pattern))
}
