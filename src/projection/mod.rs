//! Per-period cohort projection of premiums, claims and exits

mod cashflows;
mod engine;
mod state;

pub use cashflows::{CashflowRow, ProjectionResult, ProjectionSummary};
pub use engine::{project_cohort, ProjectionConfig, ProjectionEngine};
pub use state::ProjectionState;
