//! Timing harness for comparing valuation strategies

mod harness;
mod suite;

pub use harness::{Benchmark, BenchmarkReport, DEFAULT_ITERATIONS};
pub use suite::{BenchmarkSuite, SuiteEntry, SuiteReport};
