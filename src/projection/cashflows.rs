//! Cashflow output structures for cohort projections

use std::io::Write;

use serde::{Deserialize, Serialize};

/// A single row of projection output for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashflowRow {
    /// Period index (0-indexed)
    pub period: usize,

    /// Policies in force at the start of the period
    pub in_force: f64,

    // Exits during the period
    pub deaths: f64,
    pub lapses: f64,

    // Cashflows (per-unit amounts times in-force)
    pub premiums: f64,
    pub claims: f64,
    pub net_cashflow: f64,

    // Discounting
    pub discount_factor: f64,
    pub present_value: f64,
}

impl CashflowRow {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            in_force: 0.0,
            deaths: 0.0,
            lapses: 0.0,
            premiums: 0.0,
            claims: 0.0,
            net_cashflow: 0.0,
            discount_factor: 1.0,
            present_value: 0.0,
        }
    }
}

/// Complete projection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Cohort size at period 0
    pub initial_policies: f64,

    /// Per-period cashflow rows
    pub cashflows: Vec<CashflowRow>,

    /// Sum of discounted net cashflows
    pub npv: f64,
}

impl ProjectionResult {
    pub fn new(initial_policies: f64) -> Self {
        Self {
            initial_policies,
            cashflows: Vec::new(),
            npv: 0.0,
        }
    }

    /// Add a cashflow row and accumulate its present value
    pub fn add_row(&mut self, row: CashflowRow) {
        self.npv += row.present_value;
        self.cashflows.push(row);
    }

    /// Write all rows as CSV with a header line
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in &self.cashflows {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_premiums: f64 = self.cashflows.iter().map(|r| r.premiums).sum();
        let total_claims: f64 = self.cashflows.iter().map(|r| r.claims).sum();
        let total_deaths: f64 = self.cashflows.iter().map(|r| r.deaths).sum();
        let total_lapses: f64 = self.cashflows.iter().map(|r| r.lapses).sum();
        let total_net_cf: f64 = self.cashflows.iter().map(|r| r.net_cashflow).sum();

        let final_in_force = self
            .cashflows
            .last()
            .map(|r| r.in_force - r.deaths - r.lapses)
            .unwrap_or(self.initial_policies);

        ProjectionSummary {
            periods: self.cashflows.len(),
            total_premiums,
            total_claims,
            total_deaths,
            total_lapses,
            total_net_cf,
            final_in_force,
            npv: self.npv,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub periods: usize,
    pub total_premiums: f64,
    pub total_claims: f64,
    pub total_deaths: f64,
    pub total_lapses: f64,
    pub total_net_cf: f64,
    pub final_in_force: f64,
    pub npv: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(period: usize, in_force: f64, deaths: f64, lapses: f64, pv: f64) -> CashflowRow {
        CashflowRow {
            in_force,
            deaths,
            lapses,
            present_value: pv,
            ..CashflowRow::new(period)
        }
    }

    #[test]
    fn test_summary() {
        let mut result = ProjectionResult::new(1.0);
        result.add_row(row(0, 1.0, 0.1, 0.2, 5.0));
        result.add_row(row(1, 0.7, 0.1, 0.1, -2.0));

        let summary = result.summary();
        assert_eq!(summary.periods, 2);
        assert!((summary.total_deaths - 0.2).abs() < 1e-12);
        assert!((summary.final_in_force - 0.5).abs() < 1e-12);
        assert!((summary.npv - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_summary_keeps_initial_cohort() {
        let result = ProjectionResult::new(2.5);
        let summary = result.summary();
        assert_eq!(summary.periods, 0);
        assert_eq!(summary.final_in_force, 2.5);
        assert_eq!(summary.npv, 0.0);
    }

    #[test]
    fn test_write_csv() {
        let mut result = ProjectionResult::new(1.0);
        result.add_row(row(0, 1.0, 0.1, 0.2, 5.0));

        let mut buffer = Vec::new();
        result.write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();

        let header = "period,in_force,deaths,lapses,premiums,claims,\
                      net_cashflow,discount_factor,present_value";
        assert_eq!(lines.next(), Some(header));
        assert!(lines.next().unwrap().starts_with("0,1.0,0.1,0.2,"));
        assert_eq!(lines.next(), None);
    }
}
