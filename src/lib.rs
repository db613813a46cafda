//! Life NPV Bench - present value of a decremented cash-flow stream
//!
//! This library provides:
//! - Decrement tables and pricing bases, built in code or loaded from CSV
//! - The NPV calculation under batch and recurrence formulations
//! - A per-period cohort projection of premiums, claims and exits
//! - A repetition timer and suite for comparing execution strategies

pub mod assumptions;
pub mod bench;
pub mod config;
pub mod error;
pub mod projection;
pub mod valuation;

// Re-export commonly used types
pub use assumptions::{DecrementTable, PricingBasis, ValuationInputs};
pub use bench::{Benchmark, BenchmarkReport, BenchmarkSuite, SuiteReport};
pub use config::RunConfig;
pub use error::{ConfigError, LoadError, ValidationError};
pub use projection::{CashflowRow, ProjectionConfig, ProjectionEngine, ProjectionResult};
pub use valuation::{npv, Strategy};
