//! Calculation output structures

use serde::{Deserialize, Serialize};

/// One scheme year of the revaluation audit trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRow {
    /// Scheme year label, e.g. "2016/17"
    pub label: String,

    /// Calendar year of the 31 March scheme-year close
    pub year_end: i32,

    /// This year's own slice of pension (pay / 54)
    pub accrual: f64,

    /// Product of (1 + ARA) over the compounding range for this year
    pub multiplier: f64,

    /// Accrual carried forward to the retirement point
    pub revalued: f64,

    /// True for the final (possibly part) scheme year, which is never revalued
    pub partial: bool,
}

/// Output of one full pipeline run. Purely derived from the ledger,
/// tables, and request; never persisted, recomputed on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Annual pension before any retirement factor
    pub unreduced_annual_pension: f64,

    /// Whole months of early/late adjustment applied
    pub months_adjustment: u32,

    /// ERF/LRF factor applied (1.0 when retiring at NPA)
    pub applied_factor: f64,

    /// Unreduced pension after the retirement factor
    pub adjusted_annual_pension: f64,

    /// One-off lump sum bought by commutation
    pub lump_sum: f64,

    /// Annual pension actually payable after commutation
    pub payable_annual_pension: f64,

    /// Set when an early/late adjustment was requested without the dates
    /// needed to compute it; the factor degrades to 1.0 and the caller
    /// should warn rather than present a precise figure.
    pub insufficient_data: bool,

    /// Per-year revaluation audit trail, in scheme-year order
    pub audit: Vec<AuditRow>,
}

impl CalculationResult {
    /// Sum of the audit trail's revalued amounts; equals the unreduced
    /// pension by construction.
    pub fn audit_total(&self) -> f64 {
        self.audit.iter().map(|row| row.revalued).sum()
    }
}
