//! Check that every NPV strategy agrees across a set of scenarios
//!
//! Usage: cargo run --bin compare_strategies [-- --tolerance 1e-9]
//!
//! Exits nonzero if any strategy differs from the scalar accumulator by more
//! than the tolerance (relative, absolute below magnitude 1), or if a
//! scenario with a closed-form value misses it by the same measure.

use anyhow::{bail, Result};
use clap::Parser;
use log::warn;

use life_npv_bench::assumptions::{DecrementTable, PricingBasis, ValuationInputs};
use life_npv_bench::projection::project_cohort;
use life_npv_bench::valuation::{max_relative_spread, Strategy};

#[derive(Debug, Parser)]
#[command(name = "compare_strategies", about = "Compare NPV strategies across scenarios")]
struct Cli {
    /// Largest allowed relative difference between strategies
    #[arg(long, default_value_t = 1e-9)]
    tolerance: f64,
}

/// A named set of inputs, optionally with a closed-form NPV to check against
struct Scenario {
    name: &'static str,
    inputs: ValuationInputs,
    closed_form: Option<f64>,
}

impl Scenario {
    fn new(name: &'static str, inputs: ValuationInputs) -> Self {
        Self {
            name,
            inputs,
            closed_form: None,
        }
    }
}

/// Scenarios derived from the reference fixture
fn scenarios() -> Vec<Scenario> {
    let sample = ValuationInputs::sample();
    let basis = sample.basis;
    let table = DecrementTable::sample();
    let periods = table.len();

    let zero_rate = PricingBasis {
        interest_rate: 0.0,
        ..basis
    };
    let negative_rate = PricingBasis {
        interest_rate: -0.01,
        ..basis
    };
    let no_decrements = DecrementTable::new(vec![0.0; periods], vec![0.0; periods]);

    vec![
        Scenario::new("Reference", sample.clone()),
        Scenario::new("Zero rate", ValuationInputs::new(table.clone(), zero_rate)),
        Scenario::new("Single period", ValuationInputs::new(table.truncated(1), basis)),
        Scenario::new("First five periods", ValuationInputs::new(table.truncated(5), basis)),
        // Level premium with nobody leaving is an annuity-immediate of P
        Scenario {
            closed_form: Some(basis.premium * basis.annuity_immediate(periods)),
            ..Scenario::new("No decrements", ValuationInputs::new(no_decrements, basis))
        },
        Scenario::new("Negative rate", ValuationInputs::new(table, negative_rate)),
    ]
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    println!(
        "{:<20} {:>18} {:>18} {:>18} {:>18} {:>10}",
        "Scenario", "Vectorized", "Accumulator", "Compiled", "Projection", "Spread"
    );
    println!("{}", "-".repeat(107));

    let mut failures = 0;
    for Scenario {
        name,
        inputs,
        closed_form,
    } in scenarios()
    {
        let values: Vec<f64> = Strategy::ALL.iter().map(|s| s.npv(&inputs)).collect();
        let projected = project_cohort(&inputs).npv;
        let spread = max_relative_spread(&inputs);

        println!(
            "{:<20} {:>18.10} {:>18.10} {:>18.10} {:>18.10} {:>10.2e}",
            name, values[0], values[1], values[2], projected, spread
        );

        // max_relative_spread is NaN for non-finite results, which fails here
        if !(spread <= cli.tolerance) {
            warn!("{}: strategies differ by {:.3e}", name, spread);
            failures += 1;
        }

        if let Some(expected) = closed_form {
            let error = (values[1] - expected).abs() / expected.abs().max(1.0);
            if !(error <= cli.tolerance) {
                warn!("{}: expected {:.10}, got {:.10}", name, expected, values[1]);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} scenario(s) exceeded tolerance {:e}", failures, cli.tolerance);
    }

    println!("\nAll strategies agree within {:e}", cli.tolerance);
    Ok(())
}
