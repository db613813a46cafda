//! Cohort projection engine producing per-period cashflows
//!
//! Generalizes the scalar recurrence to a cohort of `initial_policies`
//! lives and an optional decrement term. After the term, deaths and lapses
//! stop but premiums keep being collected from the surviving cohort.

use log::debug;

use crate::assumptions::ValuationInputs;
use super::cashflows::{CashflowRow, ProjectionResult};
use super::state::ProjectionState;

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Cohort size at period 0
    pub initial_policies: f64,

    /// Number of periods during which decrements apply
    /// If None, decrements apply to every period of the table
    pub term: Option<usize>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            initial_policies: 1.0,
            term: None,
        }
    }
}

/// Projects a cohort through a decrement table
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Run the projection over every period of `inputs`
    pub fn project(&self, inputs: &ValuationInputs) -> ProjectionResult {
        let periods = inputs.periods();
        let term = self.config.term.unwrap_or(periods);
        debug!(
            "Projecting {} periods for cohort of {} (decrement term {})",
            periods, self.config.initial_policies, term
        );

        let mut result = ProjectionResult::new(self.config.initial_policies);
        let mut state = ProjectionState::new(self.config.initial_policies, &inputs.basis);

        for (q, w) in inputs.mortality().iter().zip(inputs.withdrawal()) {
            let row = self.calculate_period(inputs, &state, *q, *w, term);
            state.advance(row.deaths, row.lapses);
            result.add_row(row);
        }

        result
    }

    fn calculate_period(
        &self,
        inputs: &ValuationInputs,
        state: &ProjectionState,
        q: f64,
        w: f64,
        term: usize,
    ) -> CashflowRow {
        let basis = &inputs.basis;
        let decrementing = state.period < term;

        let mut row = CashflowRow::new(state.period);
        row.in_force = state.in_force;
        row.deaths = if decrementing { state.in_force * q } else { 0.0 };
        row.lapses = if decrementing { state.in_force * w } else { 0.0 };

        row.premiums = state.in_force * basis.premium;
        row.claims = row.deaths * basis.sum_assured;
        row.net_cashflow = row.premiums - row.claims;

        row.discount_factor = state.discount_factor;
        row.present_value = row.net_cashflow * row.discount_factor;
        row
    }
}

/// Project with the default unit cohort over the full table
pub fn project_cohort(inputs: &ValuationInputs) -> ProjectionResult {
    ProjectionEngine::new(ProjectionConfig::default()).project(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valuation::Strategy;
    use approx::assert_relative_eq;

    #[test]
    fn test_unit_cohort_matches_recurrence() {
        let inputs = ValuationInputs::sample();
        let result = project_cohort(&inputs);

        assert_eq!(result.cashflows.len(), 10);
        assert_relative_eq!(result.npv, Strategy::Accumulator.npv(&inputs), max_relative = 1e-12);
        assert_relative_eq!(result.npv, 50.32483075503677, max_relative = 1e-12);
    }

    #[test]
    fn test_in_force_matches_table() {
        let inputs = ValuationInputs::sample();
        let result = project_cohort(&inputs);
        for (row, expected) in result.cashflows.iter().zip(inputs.decrements.in_force()) {
            assert_relative_eq!(row.in_force, expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_npv_scales_with_cohort() {
        let inputs = ValuationInputs::sample();
        let engine = ProjectionEngine::new(ProjectionConfig {
            initial_policies: 250.0,
            term: None,
        });
        let result = engine.project(&inputs);
        assert_relative_eq!(result.npv, 250.0 * 50.32483075503677, max_relative = 1e-12);
    }

    #[test]
    fn test_decrements_stop_after_term() {
        let inputs = ValuationInputs::sample();
        let engine = ProjectionEngine::new(ProjectionConfig {
            initial_policies: 2.0,
            term: Some(5),
        });
        let result = engine.project(&inputs);

        for row in &result.cashflows[5..] {
            assert_eq!(row.deaths, 0.0);
            assert_eq!(row.lapses, 0.0);
            assert_eq!(row.claims, 0.0);
            assert_relative_eq!(row.in_force, result.cashflows[5].in_force);
        }
        assert_relative_eq!(result.npv, 846.513681492234, max_relative = 1e-12);
    }

    #[test]
    fn test_summary_conserves_lives() {
        let inputs = ValuationInputs::sample();
        let summary = project_cohort(&inputs).summary();
        assert_relative_eq!(
            summary.final_in_force + summary.total_deaths + summary.total_lapses,
            1.0,
            epsilon = 1e-12
        );
    }
}
