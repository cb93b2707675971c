use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use fish_harmonizer::algorithm::harmonization::Harmonizer;
use fish_harmonizer::config::HarmonizerConfig;
use fish_harmonizer::utils::io::{read_parquet_table, write_parquet};
use log::info;

#[global_allocator]
static ALLOC: snmalloc_rs::SnMalloc = snmalloc_rs::SnMalloc;

/// Harmonise fish-consumption frequency codes into exposure bands A/B/C
#[derive(Parser, Debug)]
#[clap(name = "fish-harmonizer")]
#[clap(
    about = "Assign fish exposure bands to questionnaire frequency codes by Monte Carlo simulation"
)]
struct Args {
    /// Input Parquet table with one row per subject
    #[clap(long, value_name = "FILE")]
    input: PathBuf,

    /// Output Parquet table (input columns plus category and probabilities)
    #[clap(long, value_name = "FILE")]
    output: PathBuf,

    /// JSON configuration file; command line flags override it
    #[clap(long, value_name = "FILE", env = "FISH_HARMONIZER_CONFIG")]
    config: Option<PathBuf>,

    /// Simulation trials per subject
    #[clap(long)]
    n_sim: Option<usize>,

    /// Random seed for reproducible runs
    #[clap(long, env = "FISH_HARMONIZER_SEED")]
    seed: Option<u64>,

    /// Disable parallel processing
    #[clap(long)]
    sequential: bool,

    /// Number of worker threads (defaults to the number of CPUs)
    #[clap(long)]
    threads: Option<usize>,

    /// Write the category summary as JSON to this file
    #[clap(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Do not draw a progress bar
    #[clap(long)]
    no_progress: bool,
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let start = Instant::now();

    let mut config = match &args.config {
        Some(path) => HarmonizerConfig::from_json_file(path)
            .with_context(|| format!("Loading configuration from {}", path.display()))?,
        None => HarmonizerConfig::default(),
    };
    if let Some(n_sim) = args.n_sim {
        config.n_sim = n_sim;
    }
    if args.seed.is_some() {
        config.random_seed = args.seed;
    }
    if args.sequential {
        config.use_parallel = false;
    }
    config.show_progress = !args.no_progress;

    let threads = args.threads.unwrap_or_else(num_cpus::get);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .context("Configuring worker threads")?;

    info!("{}", config.to_string_representation());
    let uncertainty_threshold = config.uncertainty_threshold;
    let harmonizer = Harmonizer::new(config)?;

    let table = read_parquet_table(&args.input)
        .with_context(|| format!("Reading {}", args.input.display()))?;
    let harmonized = harmonizer.harmonize_batch(&table)?;

    write_parquet(&args.output, &harmonized.batch)
        .with_context(|| format!("Writing {}", args.output.display()))?;

    let summary = harmonized.output.summary(uncertainty_threshold);
    info!("\n{summary}");
    info!(
        "Batch seed {} with {} trials per subject",
        harmonized.output.batch_seed, harmonized.output.n_sim
    );

    if let Some(path) = &args.summary {
        let report = serde_json::json!({
            "batch_seed": harmonized.output.batch_seed,
            "n_sim": harmonized.output.n_sim,
            "summary": summary,
        });
        fs::write(path, serde_json::to_string_pretty(&report)?)
            .with_context(|| format!("Writing summary to {}", path.display()))?;
        info!("Summary written to {}", path.display());
    }

    info!("Finished in {:?}", start.elapsed());
    Ok(())
}
