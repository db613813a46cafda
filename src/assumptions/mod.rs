//! Valuation inputs: the decrement table and the pricing basis

mod basis;
mod decrements;
pub mod loader;

pub use basis::{PricingBasis, DEFAULT_INTEREST_RATE, DEFAULT_PREMIUM, DEFAULT_SUM_ASSURED};
pub use decrements::{DecrementTable, SAMPLE_MORTALITY, SAMPLE_WITHDRAWAL};
pub use loader::{load_decrements, load_decrements_from_reader};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LoadError, ValidationError};

/// Everything a valuation call needs, built once by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationInputs {
    pub decrements: DecrementTable,
    pub basis: PricingBasis,
}

impl ValuationInputs {
    pub fn new(decrements: DecrementTable, basis: PricingBasis) -> Self {
        Self { decrements, basis }
    }

    /// Build from raw vectors and scalars
    pub fn from_parts(
        mortality: Vec<f64>,
        withdrawal: Vec<f64>,
        premium: f64,
        sum_assured: f64,
        interest_rate: f64,
    ) -> Self {
        Self::new(
            DecrementTable::new(mortality, withdrawal),
            PricingBasis::new(premium, sum_assured, interest_rate),
        )
    }

    /// The reference benchmark fixture (ten periods, P=100, S=25000, r=2%)
    pub fn sample() -> Self {
        Self::new(DecrementTable::sample(), PricingBasis::default())
    }

    /// Load the decrement table from CSV and pair it with a basis
    pub fn from_csv_path(path: &Path, basis: PricingBasis) -> Result<Self, LoadError> {
        Ok(Self::new(load_decrements(path)?, basis))
    }

    pub fn mortality(&self) -> &[f64] {
        &self.decrements.mortality
    }

    pub fn withdrawal(&self) -> &[f64] {
        &self.decrements.withdrawal
    }

    /// Number of projection periods
    pub fn periods(&self) -> usize {
        self.decrements.len()
    }

    /// Opt-in input checks; the valuation functions never call this
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.decrements.validate()?;
        self.basis.validate()
    }
}

impl Default for ValuationInputs {
    fn default() -> Self {
        Self::sample()
    }
}
