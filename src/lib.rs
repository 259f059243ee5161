//! CARE Estimator - defined-benefit pension estimation engine for the 2015 scheme
//!
//! This library provides:
//! - A scheme-year accrual ledger with the fixed 1/54th accrual rate
//! - Statutory revaluation compounded forward to a chosen retirement point
//! - Early/late retirement factor lookup (step-function tables, floor semantics)
//! - Commutation of pension for a lump sum at the statutory 1:12 rate
//! - JSON rate-table import/export and a pluggable persistence boundary

pub mod context;
pub mod engine;
pub mod export;
pub mod ledger;
pub mod store;
pub mod tables;

// Re-export commonly used types
pub use context::{compute_result, EngineContext};
pub use engine::{CalculationMode, CalculationResult, RetirementRequest, RetirementType};
pub use ledger::{ContributionYear, Ledger};
pub use tables::{RateTable, RateTables};
