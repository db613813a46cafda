//! Running state of a cohort during projection

use crate::assumptions::PricingBasis;

/// State of the cohort at the start of a period
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current period (0-indexed)
    pub period: usize,

    /// Policies in force at the start of the period
    pub in_force: f64,

    /// One-period discount factor v = 1/(1+r)
    pub v: f64,

    /// Discount factor applied to this period's cash flow, v^(period+1)
    pub discount_factor: f64,
}

impl ProjectionState {
    /// Initialize state at projection start
    pub fn new(initial_policies: f64, basis: &PricingBasis) -> Self {
        let v = basis.discount_factor();
        Self {
            period: 0,
            in_force: initial_policies,
            v,
            discount_factor: v,
        }
    }

    /// Remove this period's exits and roll forward to the next period
    pub fn advance(&mut self, deaths: f64, lapses: f64) {
        self.in_force -= deaths + lapses;
        self.discount_factor *= self.v;
        self.period += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_advance() {
        let basis = PricingBasis::new(100.0, 1000.0, 0.25);
        let mut state = ProjectionState::new(10.0, &basis);
        assert_relative_eq!(state.discount_factor, 0.8);

        state.advance(1.0, 2.0);
        assert_eq!(state.period, 1);
        assert_relative_eq!(state.in_force, 7.0);
        assert_relative_eq!(state.discount_factor, 0.64);
    }
}
