//! Forward revaluation of the accrual ledger
//!
//! Each completed scheme year's accrual slice is uplifted by every
//! subsequent complete year's ARA up to, but not including, the final
//! year. The final (possibly part) year contributes its own accrual
//! unrevalued. Whether the final year's own ARA is projected onto the
//! completed years is controlled by [`CalculationMode`].

use serde::{Deserialize, Serialize};

use super::result::AuditRow;
use crate::ledger::{year_label, ContributionYear, Ledger};
use crate::tables::RateTable;

/// Controls whether the final scheme year's own ARA is applied when
/// projecting the unreduced pension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalculationMode {
    /// Only confirmed revaluations: the final year's ARA is omitted
    Actual,
    /// Project the final year's likely revaluation onto every completed year
    Estimate,
}

impl CalculationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationMode::Actual => "actual",
            CalculationMode::Estimate => "estimate",
        }
    }
}

/// Unreduced pension plus its per-year audit trail
#[derive(Debug, Clone, PartialEq)]
pub struct RevaluationOutcome {
    pub unreduced: f64,
    pub audit: Vec<AuditRow>,
}

/// Build the accrual ledger's revalued total at `final_year_end`.
///
/// Completed years are those ending on or before `final_year_end - 1`;
/// entries beyond the final year are excluded so pay entered past the
/// retirement point is never double counted. A zero-pay final-year row
/// is synthesised if the ledger has none, so the audit trail always
/// reports a final year.
pub fn project(
    ledger: &Ledger,
    ara: &RateTable,
    final_year_end: i32,
    mode: CalculationMode,
) -> RevaluationOutcome {
    let mut audit = Vec::with_capacity(ledger.len());
    let mut unreduced = 0.0;

    for year in ledger
        .years()
        .iter()
        .filter(|y| y.year_end <= final_year_end - 1)
    {
        let accrual = year.accrual();
        let multiplier = compound_multiplier(ara, year.year_end, final_year_end, mode);
        let revalued = accrual * multiplier;

        audit.push(AuditRow {
            label: year.label(),
            year_end: year.year_end,
            accrual,
            multiplier,
            revalued,
            partial: false,
        });
        unreduced += revalued;
    }

    let final_year = ledger
        .get(final_year_end)
        .cloned()
        .unwrap_or_else(|| ContributionYear::new(final_year_end, ara.rate(final_year_end), 0.0));
    let final_accrual = final_year.accrual();
    audit.push(AuditRow {
        label: year_label(final_year_end),
        year_end: final_year_end,
        accrual: final_accrual,
        multiplier: 1.0,
        revalued: final_accrual,
        partial: true,
    });
    unreduced += final_accrual;

    RevaluationOutcome { unreduced, audit }
}

/// Product of (1 + ARA) over every complete scheme year strictly between
/// `year_end` and `final_year_end`; in estimate mode the final year's own
/// ARA is multiplied in as well.
fn compound_multiplier(
    ara: &RateTable,
    year_end: i32,
    final_year_end: i32,
    mode: CalculationMode,
) -> f64 {
    let mut multiplier = 1.0;
    for t in (year_end + 1)..=(final_year_end - 1) {
        multiplier *= 1.0 + ara.rate(t);
    }
    if mode == CalculationMode::Estimate {
        multiplier *= 1.0 + ara.rate(final_year_end);
    }
    multiplier
}
