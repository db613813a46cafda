//! Decrement table: per-period mortality (q) and withdrawal (w) probabilities

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Mortality rates from the reference benchmark, one per projection period
pub const SAMPLE_MORTALITY: [f64; 10] = [
    0.001, 0.002, 0.003, 0.003, 0.004, 0.004, 0.005, 0.007, 0.009, 0.011,
];

/// Withdrawal rates from the reference benchmark, aligned with `SAMPLE_MORTALITY`
pub const SAMPLE_WITHDRAWAL: [f64; 10] = [
    0.05, 0.07, 0.08, 0.10, 0.14, 0.20, 0.20, 0.20, 0.10, 0.04,
];

/// Ordered decrement and withdrawal probabilities for a projection
///
/// Index `t` holds the probabilities applying during period `t` to the
/// cohort in force at its start. The two vectors are expected to be the
/// same length; nothing here enforces it outside of `validate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecrementTable {
    /// q[t]: probability of a decrement (death) during period t
    pub mortality: Vec<f64>,

    /// w[t]: probability of withdrawal (lapse) during period t
    pub withdrawal: Vec<f64>,
}

impl DecrementTable {
    pub fn new(mortality: Vec<f64>, withdrawal: Vec<f64>) -> Self {
        Self { mortality, withdrawal }
    }

    /// The ten-period table used throughout the reference benchmarks
    pub fn sample() -> Self {
        Self::new(SAMPLE_MORTALITY.to_vec(), SAMPLE_WITHDRAWAL.to_vec())
    }

    /// Number of projection periods
    ///
    /// Mismatched vectors are truncated to the shorter one, the same way
    /// every valuation strategy pairs them.
    pub fn len(&self) -> usize {
        self.mortality.len().min(self.withdrawal.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keep only the first `periods` periods
    pub fn truncated(&self, periods: usize) -> Self {
        Self {
            mortality: self.mortality.iter().copied().take(periods).collect(),
            withdrawal: self.withdrawal.iter().copied().take(periods).collect(),
        }
    }

    /// Survival factor for period t: 1 - q[t] - w[t]
    pub fn persistency(&self, t: usize) -> f64 {
        1.0 - (self.mortality[t] + self.withdrawal[t])
    }

    /// In-force fraction at the start of each period for a unit cohort
    pub fn in_force(&self) -> Vec<f64> {
        let mut lives = 1.0;
        (0..self.len())
            .map(|t| {
                let bop = lives;
                lives *= self.persistency(t);
                bop
            })
            .collect()
    }

    /// Check lengths and probability bounds
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.mortality.len() != self.withdrawal.len() {
            return Err(ValidationError::LengthMismatch {
                mortality: self.mortality.len(),
                withdrawal: self.withdrawal.len(),
            });
        }

        if self.mortality.is_empty() {
            return Err(ValidationError::EmptyTable);
        }

        for (period, (&q, &w)) in self.mortality.iter().zip(&self.withdrawal).enumerate() {
            check_probability("mortality", period, q)?;
            check_probability("withdrawal", period, w)?;

            let total = q + w;
            if total > 1.0 {
                return Err(ValidationError::CombinedDecrementExceedsOne { period, total });
            }
        }

        Ok(())
    }
}

impl Default for DecrementTable {
    fn default() -> Self {
        Self::sample()
    }
}

fn check_probability(kind: &'static str, period: usize, value: f64) -> Result<(), ValidationError> {
    // NaN fails the range check as well
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::ProbabilityOutOfRange { kind, period, value })
    }
}
