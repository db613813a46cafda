//! Repetition timer for a single callable

use std::fmt;
use std::hint::black_box;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Repetitions per variant in the reference benchmark
pub const DEFAULT_ITERATIONS: u64 = 1_000_000;

/// Timing of one benchmarked variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub label: String,
    pub iterations: u64,
    /// Total wall-clock time over all iterations
    pub elapsed: Duration,
}

impl BenchmarkReport {
    /// Mean time per call
    pub fn per_call(&self) -> Duration {
        let nanos = self.elapsed.as_nanos() / u128::from(self.iterations.max(1));
        Duration::from_nanos(nanos as u64)
    }

    pub fn nanos_per_call(&self) -> f64 {
        self.elapsed.as_nanos() as f64 / self.iterations.max(1) as f64
    }
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.3} s ({:.1} ns/call)",
            self.label,
            self.elapsed.as_secs_f64(),
            self.nanos_per_call()
        )
    }
}

/// Runs a callable a fixed number of times under a monotonic clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Benchmark {
    iterations: u64,
}

impl Benchmark {
    /// A harness for `iterations` repetitions (must be at least 1)
    pub fn new(iterations: u64) -> Result<Self, ConfigError> {
        if iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        Ok(Self { iterations })
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Time `f` with no arguments
    pub fn run<F, R>(&self, label: &str, mut f: F) -> BenchmarkReport
    where
        F: FnMut() -> R,
    {
        let start = Instant::now();
        for _ in 0..self.iterations {
            black_box(f());
        }
        self.finish(label, start.elapsed())
    }

    /// Time `f` against arguments built by the caller outside the timed region
    pub fn run_with<A, F, R>(&self, label: &str, args: &A, mut f: F) -> BenchmarkReport
    where
        F: FnMut(&A) -> R,
    {
        let start = Instant::now();
        for _ in 0..self.iterations {
            black_box(f(black_box(args)));
        }
        self.finish(label, start.elapsed())
    }

    /// Time a fallible callable, stopping at and returning its first error
    pub fn try_run<F, R, E>(&self, label: &str, mut f: F) -> Result<BenchmarkReport, E>
    where
        F: FnMut() -> Result<R, E>,
    {
        let start = Instant::now();
        for _ in 0..self.iterations {
            black_box(f()?);
        }
        Ok(self.finish(label, start.elapsed()))
    }

    /// Write the report line for one variant
    pub fn report<W: Write>(&self, report: &BenchmarkReport, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", report)
    }

    fn finish(&self, label: &str, elapsed: Duration) -> BenchmarkReport {
        debug!("{} finished {} iterations in {:?}", label, self.iterations, elapsed);
        BenchmarkReport {
            label: label.to_string(),
            iterations: self.iterations,
            elapsed,
        }
    }
}

impl Default for Benchmark {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::ValuationInputs;
    use crate::valuation::Strategy;

    #[test]
    fn test_zero_iterations_rejected() {
        assert_eq!(Benchmark::new(0), Err(ConfigError::ZeroIterations));
        assert_eq!(Benchmark::new(1).unwrap().iterations(), 1);
        assert_eq!(Benchmark::default().iterations(), DEFAULT_ITERATIONS);
    }

    #[test]
    fn test_runs_exact_iteration_count() {
        let bench = Benchmark::new(250).unwrap();
        let mut calls = 0u64;
        let report = bench.run("count", || calls += 1);

        assert_eq!(calls, 250);
        assert_eq!(report.iterations, 250);
        assert_eq!(report.label, "count");
    }

    #[test]
    fn test_run_with_fixed_arguments() {
        let bench = Benchmark::new(1_000).unwrap();
        let inputs = ValuationInputs::sample();
        let report = bench.run_with("Compiled", &inputs, |inputs| Strategy::Compiled.npv(inputs));

        assert_eq!(report.iterations, 1_000);
        assert!(report.elapsed >= Duration::ZERO);
        assert!(report.nanos_per_call() >= 0.0);
    }

    #[test]
    fn test_try_run_propagates_first_error() {
        let bench = Benchmark::new(10).unwrap();
        let mut calls = 0;
        let result: Result<BenchmarkReport, String> = bench.try_run("fails", || {
            calls += 1;
            if calls == 3 {
                Err(format!("failed on call {}", calls))
            } else {
                Ok(calls)
            }
        });

        assert_eq!(result, Err("failed on call 3".to_string()));
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_try_run_success() {
        let bench = Benchmark::new(5).unwrap();
        let result: Result<BenchmarkReport, ()> = bench.try_run("ok", || Ok(1.0));
        assert_eq!(result.unwrap().iterations, 5);
    }

    #[test]
    fn test_report_line_format() {
        let report = BenchmarkReport {
            label: "Vectorized".to_string(),
            iterations: 1_000_000,
            elapsed: Duration::from_millis(1_500),
        };
        assert_eq!(report.per_call(), Duration::from_nanos(1_500));

        let bench = Benchmark::default();
        let mut out = Vec::new();
        bench.report(&report, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Vectorized: 1.500 s (1500.0 ns/call)\n");
    }
}
