//! Error types for input construction, loading and run configuration
//!
//! None of these are raised by the valuation functions themselves. The hot
//! path never checks its inputs; validation is an explicit step the caller
//! opts into when building `ValuationInputs`.

use thiserror::Error;

/// Problems found by `ValuationInputs::validate`
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("decrement table has no periods")]
    EmptyTable,

    #[error("mortality has {mortality} periods but withdrawal has {withdrawal}")]
    LengthMismatch { mortality: usize, withdrawal: usize },

    #[error("{kind} rate {value} at period {period} is outside [0, 1]")]
    ProbabilityOutOfRange {
        kind: &'static str,
        period: usize,
        value: f64,
    },

    /// q + w above 1 would drive the in-force fraction negative
    #[error("q + w = {total} at period {period} exceeds 1")]
    CombinedDecrementExceedsOne { period: usize, total: f64 },

    #[error("interest rate {rate} makes the discount factor 1/(1+r) undefined")]
    DiscountSingularity { rate: f64 },
}

/// Failures reading a decrement table from CSV
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read decrement table: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed decrement table: {0}")]
    Csv(#[from] csv::Error),

    #[error(
        "decrement table periods must run 0..{expected_len} without gaps, \
         found period {found} at position {position}"
    )]
    NonContiguousPeriods {
        expected_len: usize,
        position: usize,
        found: usize,
    },
}

/// Invalid run configuration (CLI flags or environment)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("iteration count must be at least 1")]
    ZeroIterations,

    #[error("environment variable {name}={value:?} could not be parsed")]
    InvalidEnv { name: &'static str, value: String },

    #[error("unknown strategy {0:?} (expected vectorized, accumulator or compiled)")]
    UnknownStrategy(String),
}
