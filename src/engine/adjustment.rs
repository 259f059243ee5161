//! Early/late retirement adjustment
//!
//! Resolves a retirement request into a whole-month offset from Normal
//! Pension Age and looks up the applicable step-function factor. Missing
//! dates degrade to no adjustment with a flag, never to a failure.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::RetirementRequest;
use crate::tables::RateTables;

/// How the retirement point relates to Normal Pension Age
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RetirementType {
    /// Retiring at NPA: no adjustment
    #[default]
    AtAge,
    /// Retiring before NPA: early retirement factor applies
    Early,
    /// Retiring after NPA: late retirement factor applies
    Late,
}

/// Maximum years of early-retirement reduction that can be bought out
pub const MAX_BUYOUT_YEARS: f64 = 3.0;

/// Resolved adjustment for one request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustment {
    /// Whole months of early/late adjustment, clamped to >= 0
    pub months: u32,

    /// Factor from the ERF or LRF table (1.0 when none applies)
    pub factor: f64,

    /// True when an early/late factor was requested but the dates needed
    /// to compute the month offset were absent
    pub insufficient_data: bool,
}

impl Adjustment {
    fn none() -> Self {
        Self {
            months: 0,
            factor: 1.0,
            insufficient_data: false,
        }
    }
}

/// Calendar-aware whole-month count from `from` to `to`, decremented by
/// one when `to`'s day-of-month precedes `from`'s (an incomplete month).
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let mut months = i64::from(to.year() - from.year()) * 12
        + i64::from(to.month()) - i64::from(from.month());
    if to.day() < from.day() {
        months -= 1;
    }
    months
}

/// Resolve the retirement factor for a sanitised request
pub fn resolve(request: &RetirementRequest, tables: &RateTables) -> Adjustment {
    if request.retirement_type == RetirementType::AtAge {
        return Adjustment::none();
    }

    let (Some(dob), Some(retirement_date)) = (request.date_of_birth, request.retirement_date)
    else {
        log::warn!(
            "{:?} retirement requested without both dates; degrading to no adjustment",
            request.retirement_type
        );
        return Adjustment {
            insufficient_data: true,
            ..Adjustment::none()
        };
    };

    let npa_months = (request.normal_pension_age * 12.0).round() as i64;
    let months_to_npa = npa_months - months_between(dob, retirement_date);

    if request.retirement_type == RetirementType::Early {
        let buyout_months = (request.buyout_years * 12.0).round() as i64;
        let months = (months_to_npa.max(0) - buyout_months).max(0);
        Adjustment {
            months: months as u32,
            factor: tables.erf.floor(months as i32),
            insufficient_data: false,
        }
    } else {
        let months = (-months_to_npa).max(0);
        Adjustment {
            months: months as u32,
            factor: tables.lrf.floor(months as i32),
            insufficient_data: false,
        }
    }
}
