//! Sequential benchmark of several valuation strategies
//!
//! Each strategy gets its own freshly built inputs and runs to completion
//! before the next one starts. Nothing is shared between variants.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use super::harness::{Benchmark, BenchmarkReport};
use crate::assumptions::ValuationInputs;
use crate::valuation::Strategy;

/// One strategy's timing together with the value it computed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteEntry {
    pub strategy: Strategy,
    pub npv: f64,
    pub report: BenchmarkReport,
}

/// Results of a full suite run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub started_at: DateTime<Utc>,
    pub iterations: u64,
    pub entries: Vec<SuiteEntry>,
}

impl SuiteReport {
    pub fn entry(&self, strategy: Strategy) -> Option<&SuiteEntry> {
        self.entries.iter().find(|entry| entry.strategy == strategy)
    }

    /// Fastest strategy by total elapsed time
    pub fn fastest(&self) -> Option<&SuiteEntry> {
        self.entries.iter().min_by_key(|entry| entry.report.elapsed)
    }
}

/// Runs the selected strategies one after another
#[derive(Debug, Clone)]
pub struct BenchmarkSuite {
    harness: Benchmark,
    strategies: Vec<Strategy>,
}

impl BenchmarkSuite {
    pub fn new(harness: Benchmark, strategies: Vec<Strategy>) -> Self {
        Self { harness, strategies }
    }

    /// Suite over every strategy
    pub fn all(harness: Benchmark) -> Self {
        Self::new(harness, Strategy::ALL.to_vec())
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Benchmark each strategy in order, writing one report line per strategy
    ///
    /// `make_inputs` is called once per strategy, outside the timed region.
    pub fn run<F, W>(&self, mut make_inputs: F, out: &mut W) -> io::Result<SuiteReport>
    where
        F: FnMut() -> ValuationInputs,
        W: Write,
    {
        let started_at = Utc::now();
        let mut entries = Vec::with_capacity(self.strategies.len());

        for &strategy in &self.strategies {
            let inputs = make_inputs();
            info!(
                "Benchmarking {} over {} periods, {} iterations",
                strategy.label(),
                inputs.periods(),
                self.harness.iterations()
            );

            let npv = strategy.npv(&inputs);
            let report = self
                .harness
                .run_with(strategy.label(), &inputs, |inputs| strategy.npv(inputs));
            self.harness.report(&report, out)?;

            info!("{} done: npv={:.6} elapsed={:?}", strategy.label(), npv, report.elapsed);
            entries.push(SuiteEntry { strategy, npv, report });
        }

        Ok(SuiteReport {
            started_at,
            iterations: self.harness.iterations(),
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_runs_strategies_in_order() {
        let suite = BenchmarkSuite::new(
            Benchmark::new(100).unwrap(),
            vec![Strategy::Compiled, Strategy::Vectorized],
        );

        let mut builds = 0;
        let mut out = Vec::new();
        let report = suite
            .run(
                || {
                    builds += 1;
                    ValuationInputs::sample()
                },
                &mut out,
            )
            .unwrap();

        assert_eq!(builds, 2);
        assert_eq!(report.iterations, 100);
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.entries[0].strategy, Strategy::Compiled);
        assert_eq!(report.entries[1].strategy, Strategy::Vectorized);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Compiled Accumulator: "));
        assert!(lines[1].starts_with("Vectorized: "));
    }

    #[test]
    fn test_entries_carry_npv() {
        let suite = BenchmarkSuite::all(Benchmark::new(10).unwrap());
        let report = suite.run(ValuationInputs::sample, &mut io::sink()).unwrap();

        assert_eq!(report.entries.len(), 3);
        for entry in &report.entries {
            assert_relative_eq!(entry.npv, 50.32483075503677, max_relative = 1e-12);
            assert_eq!(entry.report.iterations, 10);
        }
        assert!(report.entry(Strategy::Accumulator).is_some());
        assert!(report.fastest().is_some());
    }

    #[test]
    fn test_report_serializes_to_json() {
        let suite = BenchmarkSuite::new(Benchmark::new(1).unwrap(), vec![Strategy::Accumulator]);
        let report = suite.run(ValuationInputs::sample, &mut io::sink()).unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["iterations"], 1);
        assert_eq!(json["entries"][0]["strategy"], "accumulator");
        assert_eq!(json["entries"][0]["report"]["label"], "Scalar Accumulator");
    }
}
