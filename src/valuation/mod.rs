//! Net present value of a decremented premium/claim stream
//!
//! Three execution strategies compute the same quantity:
//!
//! - `Vectorized`: batch formulation over whole vectors
//! - `Accumulator`: indexed scalar recurrence
//! - `Compiled`: the recurrence as a fused iterator fold
//!
//! Indexing convention: period t (0-indexed) pays
//! `in_force[t] * (P - S*q[t])` at the end of the period, discounted by
//! `(1/(1+r))^(t+1)`. All periods are included.

mod accumulator;
mod vectorized;

pub use accumulator::{npv_accumulator, npv_compiled};
pub use vectorized::npv_vectorized;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::assumptions::ValuationInputs;
use crate::error::ConfigError;

/// Signature shared by every strategy: (q, w, P, S, r) -> NPV
pub type NpvFn = fn(&[f64], &[f64], f64, f64, f64) -> f64;

/// Execution strategy for the NPV calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Vectorized,
    Accumulator,
    Compiled,
}

impl Strategy {
    /// Every strategy, in benchmark order
    pub const ALL: [Strategy; 3] = [
        Strategy::Vectorized,
        Strategy::Accumulator,
        Strategy::Compiled,
    ];

    /// Label printed by the benchmark harness
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Vectorized => "Vectorized",
            Strategy::Accumulator => "Scalar Accumulator",
            Strategy::Compiled => "Compiled Accumulator",
        }
    }

    /// Name accepted on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Vectorized => "vectorized",
            Strategy::Accumulator => "accumulator",
            Strategy::Compiled => "compiled",
        }
    }

    pub fn function(&self) -> NpvFn {
        match self {
            Strategy::Vectorized => npv_vectorized,
            Strategy::Accumulator => npv_accumulator,
            Strategy::Compiled => npv_compiled,
        }
    }

    /// Evaluate the NPV of `inputs` with this strategy
    pub fn npv(&self, inputs: &ValuationInputs) -> f64 {
        let basis = &inputs.basis;
        (self.function())(
            inputs.mortality(),
            inputs.withdrawal(),
            basis.premium,
            basis.sum_assured,
            basis.interest_rate,
        )
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownStrategy(s.to_string()))
    }
}

/// NPV with the default scalar strategy
pub fn npv(inputs: &ValuationInputs) -> f64 {
    Strategy::Compiled.npv(inputs)
}

/// Largest relative difference between any strategy and the accumulator
///
/// Relative to the accumulator's magnitude, falling back to absolute
/// difference when that magnitude is below 1. NaN if any strategy returns
/// a non-finite value, so callers comparing with `<=` see a failure.
pub fn max_relative_spread(inputs: &ValuationInputs) -> f64 {
    let reference = Strategy::Accumulator.npv(inputs);
    let scale = reference.abs().max(1.0);
    Strategy::ALL
        .iter()
        .map(|strategy| strategy.npv(inputs))
        .fold(0.0, |spread: f64, value| {
            if spread.is_nan() || !value.is_finite() || !reference.is_finite() {
                f64::NAN
            } else {
                spread.max((value - reference).abs() / scale)
            }
        })
}
