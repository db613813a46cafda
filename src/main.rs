//! Life NPV Bench CLI
//!
//! Times each NPV strategy over the configured number of repetitions and
//! prints one `<Label>: <elapsed>` line per strategy. With no arguments it
//! runs the reference benchmark: all three strategies, one million calls
//! each, on the built-in ten-period table.

use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use life_npv_bench::{BenchmarkSuite, ProjectionConfig, ProjectionEngine, RunConfig, Strategy};

#[derive(Debug, Parser)]
#[command(name = "life_npv_bench", version, about = "Benchmark NPV execution strategies")]
struct Cli {
    /// Repetitions per strategy [env: NPV_ITERATIONS, default 1000000]
    #[arg(short = 'n', long)]
    iterations: Option<u64>,

    /// Strategy to benchmark; repeat to select several [default: all]
    #[arg(short, long = "strategy")]
    strategies: Vec<Strategy>,

    /// CSV decrement table with columns t,q,w [env: NPV_DECREMENTS]
    #[arg(short, long)]
    decrements: Option<PathBuf>,

    /// Premium per in-force unit per period [env: NPV_PREMIUM]
    #[arg(long)]
    premium: Option<f64>,

    /// Benefit paid per decrement [env: NPV_SUM_ASSURED]
    #[arg(long)]
    sum_assured: Option<f64>,

    /// Per-period discount rate [env: NPV_RATE]
    #[arg(long, allow_hyphen_values = true)]
    rate: Option<f64>,

    /// Check probabilities and rate before running
    #[arg(long)]
    validate: bool,

    /// Print the full suite report as JSON instead of report lines
    #[arg(long)]
    json: bool,

    /// Write the cohort projection rows to this CSV file
    #[arg(long)]
    projection: Option<PathBuf>,

    /// Cohort size for the projection output
    #[arg(long, default_value_t = 1.0)]
    initial_policies: f64,

    /// Periods during which decrements apply in the projection output
    #[arg(long)]
    term: Option<usize>,
}

impl Cli {
    /// Apply flags on top of the environment configuration
    fn apply(&self, mut config: RunConfig) -> RunConfig {
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if !self.strategies.is_empty() {
            config.strategies = self.strategies.clone();
        }
        if let Some(path) = &self.decrements {
            config.decrements_path = Some(path.clone());
        }
        if let Some(premium) = self.premium {
            config.basis.premium = premium;
        }
        if let Some(sum_assured) = self.sum_assured {
            config.basis.sum_assured = sum_assured;
        }
        if let Some(rate) = self.rate {
            config.basis.interest_rate = rate;
        }
        config
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.apply(RunConfig::from_env().context("invalid environment configuration")?);
    let harness = config.harness()?;

    // Loaded once up front so a bad file fails before any timing starts
    let inputs = config.inputs().context("failed to build valuation inputs")?;
    if cli.validate {
        inputs.validate().context("valuation inputs failed validation")?;
        info!("Inputs validated: {} periods", inputs.periods());
    }

    if let Some(path) = &cli.projection {
        let engine = ProjectionEngine::new(ProjectionConfig {
            initial_policies: cli.initial_policies,
            term: cli.term,
        });
        let result = engine.project(&inputs);
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        result
            .write_csv(file)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(
            "Projection ({} periods, npv {:.6}) written to {}",
            result.cashflows.len(),
            result.npv,
            path.display()
        );
    }

    let suite = BenchmarkSuite::new(harness, config.strategies.clone());
    let stdout = io::stdout();

    if cli.json {
        // Each variant still gets its own copy of the inputs
        let report = suite.run(|| inputs.clone(), &mut io::sink())?;
        serde_json::to_writer_pretty(stdout.lock(), &report)?;
        println!();
    } else {
        let report = suite.run(|| inputs.clone(), &mut stdout.lock())?;
        if let Some(fastest) = report.fastest() {
            info!("Fastest: {} ({:?} per call)", fastest.strategy, fastest.report.per_call());
        }
    }

    Ok(())
}
