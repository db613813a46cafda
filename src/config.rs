//! Run configuration from environment variables
//!
//! Recognized variables:
//!   NPV_ITERATIONS, NPV_DECREMENTS, NPV_PREMIUM, NPV_SUM_ASSURED, NPV_RATE,
//!   NPV_STRATEGIES (comma separated, e.g. "vectorized,compiled")
//!
//! Anything unset falls back to the reference benchmark. CLI flags are
//! applied on top of this by the binaries.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::assumptions::{DecrementTable, PricingBasis, ValuationInputs};
use crate::bench::{Benchmark, DEFAULT_ITERATIONS};
use crate::error::{ConfigError, LoadError};
use crate::valuation::Strategy;

/// Everything needed to run the benchmark suite
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Repetitions per strategy
    pub iterations: u64,

    /// CSV decrement table; None uses the built-in sample
    pub decrements_path: Option<PathBuf>,

    pub basis: PricingBasis,

    /// Strategies to benchmark, in order
    pub strategies: Vec<Strategy>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            decrements_path: None,
            basis: PricingBasis::default(),
            strategies: Strategy::ALL.to_vec(),
        }
    }
}

impl RunConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&'static str) -> Option<String>,
    {
        let defaults = Self::default();

        let iterations = parse_var(&lookup, "NPV_ITERATIONS", defaults.iterations)?;
        let premium = parse_var(&lookup, "NPV_PREMIUM", defaults.basis.premium)?;
        let sum_assured = parse_var(&lookup, "NPV_SUM_ASSURED", defaults.basis.sum_assured)?;
        let interest_rate = parse_var(&lookup, "NPV_RATE", defaults.basis.interest_rate)?;

        let decrements_path = lookup("NPV_DECREMENTS")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let strategies = match lookup("NPV_STRATEGIES") {
            Some(list) => parse_strategies(&list)?,
            None => defaults.strategies,
        };

        let config = Self {
            iterations,
            decrements_path,
            basis: PricingBasis::new(premium, sum_assured, interest_rate),
            strategies,
        };
        config.harness()?;
        Ok(config)
    }

    /// Harness for the configured iteration count
    pub fn harness(&self) -> Result<Benchmark, ConfigError> {
        Benchmark::new(self.iterations)
    }

    /// Build the valuation inputs, loading the table from disk if configured
    pub fn inputs(&self) -> Result<ValuationInputs, LoadError> {
        match &self.decrements_path {
            Some(path) => ValuationInputs::from_csv_path(path, self.basis),
            None => Ok(ValuationInputs::new(DecrementTable::sample(), self.basis)),
        }
    }
}

/// Parse a comma separated strategy list, ignoring blanks
pub fn parse_strategies(list: &str) -> Result<Vec<Strategy>, ConfigError> {
    list.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(Strategy::from_str)
        .collect()
}

fn parse_var<L, T>(lookup: &L, name: &'static str, default: T) -> Result<T, ConfigError>
where
    L: Fn(&'static str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidEnv { name, value }),
        None => Ok(default),
    }
}
