//! Revaluation, retirement adjustment, and commutation

pub mod adjustment;
pub mod commutation;
mod result;
mod revaluation;

pub use adjustment::{months_between, Adjustment, RetirementType, MAX_BUYOUT_YEARS};
pub use commutation::{commute, Commutation, COMMUTATION_RATE};
pub use result::{AuditRow, CalculationResult};
pub use revaluation::{project, CalculationMode, RevaluationOutcome};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default Normal Pension Age for the 2015 scheme
pub const DEFAULT_NPA: f64 = 67.0;

/// The parameters of one what-if calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementRequest {
    /// Chosen retirement date; absent means "latest ledger year, no adjustment"
    pub retirement_date: Option<NaiveDate>,

    /// Member's date of birth; needed for early/late month counting
    pub date_of_birth: Option<NaiveDate>,

    /// Normal Pension Age in years
    pub normal_pension_age: f64,

    /// Years of early-retirement reduction bought out (0-3)
    pub buyout_years: f64,

    pub retirement_type: RetirementType,

    pub mode: CalculationMode,

    /// Annual pension the member asks to convert to lump sum
    pub commutation_amount: f64,
}

impl Default for RetirementRequest {
    fn default() -> Self {
        Self {
            retirement_date: None,
            date_of_birth: None,
            normal_pension_age: DEFAULT_NPA,
            buyout_years: 0.0,
            retirement_type: RetirementType::AtAge,
            mode: CalculationMode::Estimate,
            commutation_amount: 0.0,
        }
    }
}

impl RetirementRequest {
    /// Coerce out-of-range numeric inputs to their nearest valid bound.
    /// The pipeline must always complete; bad input degrades, it never
    /// propagates.
    pub fn sanitized(&self) -> Self {
        let mut clean = self.clone();
        if !clean.normal_pension_age.is_finite() || clean.normal_pension_age <= 0.0 {
            clean.normal_pension_age = DEFAULT_NPA;
        }
        clean.buyout_years = if clean.buyout_years.is_finite() {
            clean.buyout_years.clamp(0.0, MAX_BUYOUT_YEARS)
        } else {
            0.0
        };
        clean.commutation_amount = if clean.commutation_amount.is_finite() {
            clean.commutation_amount.max(0.0)
        } else {
            0.0
        };
        clean
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_bounds() {
        let request = RetirementRequest {
            normal_pension_age: f64::NAN,
            buyout_years: 7.5,
            commutation_amount: -400.0,
            ..Default::default()
        };

        let clean = request.sanitized();
        assert_eq!(clean.normal_pension_age, DEFAULT_NPA);
        assert_eq!(clean.buyout_years, MAX_BUYOUT_YEARS);
        assert_eq!(clean.commutation_amount, 0.0);
    }

    #[test]
    fn test_sanitized_keeps_valid_input() {
        let request = RetirementRequest {
            normal_pension_age: 65.0,
            buyout_years: 1.5,
            commutation_amount: 2_000.0,
            ..Default::default()
        };

        assert_eq!(request.sanitized(), request);
    }
}
