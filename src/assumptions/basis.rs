//! Pricing scalars: premium, sum assured and discount rate

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Premium income per in-force unit per period in the reference benchmark
pub const DEFAULT_PREMIUM: f64 = 100.0;

/// Benefit paid per decrement in the reference benchmark
pub const DEFAULT_SUM_ASSURED: f64 = 25_000.0;

/// Per-period discount rate in the reference benchmark (2%)
pub const DEFAULT_INTEREST_RATE: f64 = 0.02;

/// Scalars shared by every period of the projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingBasis {
    /// P: premium received per in-force unit each period
    pub premium: f64,

    /// S: amount paid per decrement event
    pub sum_assured: f64,

    /// r: per-period discount rate, must satisfy r > -1
    pub interest_rate: f64,
}

impl PricingBasis {
    pub fn new(premium: f64, sum_assured: f64, interest_rate: f64) -> Self {
        Self {
            premium,
            sum_assured,
            interest_rate,
        }
    }

    /// One-period discount factor v = 1/(1+r)
    ///
    /// Unchecked: r = -1 gives infinity.
    pub fn discount_factor(&self) -> f64 {
        1.0 / (1.0 + self.interest_rate)
    }

    /// PV of 1 per period for `periods` periods, paid at the end of each period
    pub fn annuity_immediate(&self, periods: usize) -> f64 {
        let rate = self.interest_rate;
        if rate.abs() < 1e-10 {
            return periods as f64;
        }

        let v = self.discount_factor();
        (1.0 - v.powf(periods as f64)) / rate
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let rate = self.interest_rate;
        if !rate.is_finite() || rate <= -1.0 {
            return Err(ValidationError::DiscountSingularity { rate });
        }
        Ok(())
    }
}

impl Default for PricingBasis {
    fn default() -> Self {
        Self::new(DEFAULT_PREMIUM, DEFAULT_SUM_ASSURED, DEFAULT_INTEREST_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_discount_factors() {
        let basis = PricingBasis::default();

        let v = basis.discount_factor();
        assert_relative_eq!(v, 1.0 / 1.02);
    }

    #[test]
    fn test_zero_rate_has_unit_discount() {
        let basis = PricingBasis::new(100.0, 25_000.0, 0.0);
        assert_relative_eq!(basis.discount_factor(), 1.0);
    }

    #[test]
    fn test_annuity_immediate() {
        // 1 per period for 12 periods at 0.5%
        let basis = PricingBasis::new(0.0, 0.0, 0.005);
        let expected = (1.0 - 1.005_f64.powi(-12)) / 0.005;
        assert_relative_eq!(basis.annuity_immediate(12), expected, epsilon = 1e-12);
        assert!((basis.annuity_immediate(12) - 11.6189).abs() < 1e-3);

        let flat = PricingBasis::new(0.0, 0.0, 0.0);
        assert_relative_eq!(flat.annuity_immediate(7), 7.0);
    }

    #[test]
    fn test_singular_rate_rejected() {
        assert!(PricingBasis::default().validate().is_ok());
        assert!(PricingBasis::new(100.0, 25_000.0, -0.5).validate().is_ok());

        let singular = PricingBasis::new(100.0, 25_000.0, -1.0);
        assert_eq!(
            singular.validate(),
            Err(ValidationError::DiscountSingularity { rate: -1.0 })
        );
        assert!(singular.discount_factor().is_infinite());
    }
}
