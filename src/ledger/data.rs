//! Contribution-year ledger: one entry per scheme year of pensionable pay

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tables::RateTable;

/// First scheme year of the 2015 CARE scheme (year ending 31 March 2016)
pub const SCHEME_START_YEAR: i32 = 2016;

/// CARE accrual rate: 1/54th of pensionable pay per scheme year.
/// Fixed by the scheme rules, not configurable.
pub const ACCRUAL_DIVISOR: f64 = 54.0;

/// Scheme-year-end (calendar year of the 31 March close) for a date.
/// April onwards falls in the scheme year ending the following calendar year.
pub fn scheme_year_end(date: NaiveDate) -> i32 {
    if date.month() >= 4 {
        date.year() + 1
    } else {
        date.year()
    }
}

/// Coerce pay-like inputs to a usable amount: non-finite or negative
/// values degrade to zero rather than poisoning the calculation.
pub(crate) fn clean_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// One scheme year of accrual input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionYear {
    /// Calendar year of the 31 March scheme-year close ("2024/25" ends 2025)
    pub year_end: i32,

    /// Revaluation rate applied when this year's balance is carried forward
    pub ara: f64,

    /// Pensionable pay earned in the scheme year (0 if no data entered)
    pub pensionable_pay: f64,
}

impl ContributionYear {
    pub fn new(year_end: i32, ara: f64, pensionable_pay: f64) -> Self {
        Self {
            year_end,
            ara,
            pensionable_pay: clean_amount(pensionable_pay),
        }
    }

    /// Scheme year label, e.g. "2024/25" for year end 2025
    pub fn label(&self) -> String {
        year_label(self.year_end)
    }

    /// This year's own slice of annual pension
    pub fn accrual(&self) -> f64 {
        self.pensionable_pay / ACCRUAL_DIVISOR
    }
}

/// Scheme year label for a year end, e.g. "2024/25" for 2025
pub fn year_label(year_end: i32) -> String {
    format!("{}/{:02}", year_end - 1, year_end.rem_euclid(100))
}

/// Ledger edits that would break its invariants
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("scheme year ending {0} is already on the ledger")]
    DuplicateYear(i32),

    #[error("scheme year ending {0} is not on the ledger")]
    UnknownYear(i32),

    #[error("a ledger must keep at least one scheme year")]
    LastYear,
}

/// Ordered ledger of contribution years.
///
/// Invariants: entries sorted by `year_end`, year ends unique, never empty.
/// Edits that would violate these are rejected and the prior state kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    years: Vec<ContributionYear>,
}

impl Ledger {
    /// Single-year ledger
    pub fn new(first: ContributionYear) -> Self {
        Self { years: vec![first] }
    }

    /// Seed a contiguous run of zero-pay years from scheme start through
    /// `final_year_end`, taking each year's ARA from the table.
    pub fn seeded(final_year_end: i32, ara_table: &RateTable) -> Self {
        let last = final_year_end.max(SCHEME_START_YEAR);
        let years = (SCHEME_START_YEAR..=last)
            .map(|year_end| ContributionYear::new(year_end, ara_table.rate(year_end), 0.0))
            .collect();
        Self { years }
    }

    pub fn years(&self) -> &[ContributionYear] {
        &self.years
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// A ledger always holds at least one year
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn latest_year_end(&self) -> i32 {
        // Invariant: sorted and non-empty
        self.years.last().map(|y| y.year_end).unwrap_or(SCHEME_START_YEAR)
    }

    pub fn get(&self, year_end: i32) -> Option<&ContributionYear> {
        self.position(year_end).map(|idx| &self.years[idx])
    }

    /// Add a new year; a duplicate year end is rejected
    pub fn add_year(&mut self, year: ContributionYear) -> Result<(), LedgerError> {
        match self
            .years
            .binary_search_by_key(&year.year_end, |y| y.year_end)
        {
            Ok(_) => Err(LedgerError::DuplicateYear(year.year_end)),
            Err(idx) => {
                self.years.insert(idx, year);
                Ok(())
            }
        }
    }

    /// Append the next contiguous scheme year with zero pay, ARA from the
    /// table. Returns the new year end.
    pub fn append_next(&mut self, ara_table: &RateTable) -> i32 {
        let next = self.latest_year_end() + 1;
        self.years
            .push(ContributionYear::new(next, ara_table.rate(next), 0.0));
        next
    }

    /// Edit a year's pensionable pay in place
    pub fn set_pay(&mut self, year_end: i32, pay: f64) -> Result<(), LedgerError> {
        let idx = self
            .position(year_end)
            .ok_or(LedgerError::UnknownYear(year_end))?;
        self.years[idx].pensionable_pay = clean_amount(pay);
        Ok(())
    }

    /// Edit a year's ARA in place
    pub fn set_ara(&mut self, year_end: i32, ara: f64) -> Result<(), LedgerError> {
        let idx = self
            .position(year_end)
            .ok_or(LedgerError::UnknownYear(year_end))?;
        self.years[idx].ara = if ara.is_finite() { ara } else { 0.0 };
        Ok(())
    }

    /// Move a year to a new year end, refreshing its ARA from the table.
    /// Rejected if the target year end is already taken.
    pub fn rekey(
        &mut self,
        year_end: i32,
        new_year_end: i32,
        ara_table: &RateTable,
    ) -> Result<(), LedgerError> {
        if year_end == new_year_end {
            return Ok(());
        }
        if self.position(new_year_end).is_some() {
            return Err(LedgerError::DuplicateYear(new_year_end));
        }
        let idx = self
            .position(year_end)
            .ok_or(LedgerError::UnknownYear(year_end))?;
        let mut year = self.years.remove(idx);
        year.year_end = new_year_end;
        year.ara = ara_table.rate(new_year_end);
        // Cannot fail: target uniqueness checked above
        self.add_year(year)
    }

    /// Remove a year; the last remaining year cannot be removed
    pub fn remove(&mut self, year_end: i32) -> Result<ContributionYear, LedgerError> {
        if self.years.len() <= 1 {
            return Err(LedgerError::LastYear);
        }
        let idx = self
            .position(year_end)
            .ok_or(LedgerError::UnknownYear(year_end))?;
        Ok(self.years.remove(idx))
    }

    fn position(&self, year_end: i32) -> Option<usize> {
        self.years
            .binary_search_by_key(&year_end, |y| y.year_end)
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accrual_is_pay_over_54() {
        let year = ContributionYear::new(2024, 0.082, 27_000.0);
        assert!((year.accrual() - 500.0).abs() < 1e-6);
    }

    #[test]
    fn test_year_label() {
        assert_eq!(year_label(2025), "2024/25");
        assert_eq!(year_label(2016), "2015/16");
        assert_eq!(year_label(2100), "2099/00");
    }

    #[test]
    fn test_scheme_year_end_boundary() {
        let march = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        let april = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();

        assert_eq!(scheme_year_end(march), 2025);
        assert_eq!(scheme_year_end(april), 2026);
    }

    #[test]
    fn test_bad_pay_degrades_to_zero() {
        assert_eq!(ContributionYear::new(2024, 0.0, -500.0).pensionable_pay, 0.0);
        assert_eq!(ContributionYear::new(2024, 0.0, f64::NAN).pensionable_pay, 0.0);
        assert_eq!(
            ContributionYear::new(2024, 0.0, f64::INFINITY).pensionable_pay,
            0.0
        );
    }

    #[test]
    fn test_seeded_ledger_contiguous() {
        let ara = RateTable::from_pairs([(2017, 0.025), (2018, 0.045)]);
        let ledger = Ledger::seeded(2019, &ara);

        let ends: Vec<i32> = ledger.years().iter().map(|y| y.year_end).collect();
        assert_eq!(ends, vec![2016, 2017, 2018, 2019]);
        assert_eq!(ledger.get(2017).unwrap().ara, 0.025);
        assert_eq!(ledger.get(2019).unwrap().ara, 0.0);
    }

    #[test]
    fn test_duplicate_year_rejected() {
        let mut ledger = Ledger::new(ContributionYear::new(2024, 0.082, 30_000.0));
        let err = ledger
            .add_year(ContributionYear::new(2024, 0.082, 10_000.0))
            .unwrap_err();

        assert_eq!(err, LedgerError::DuplicateYear(2024));
        // Prior value retained
        assert_eq!(ledger.get(2024).unwrap().pensionable_pay, 30_000.0);
    }

    #[test]
    fn test_rekey_rejects_collision() {
        let ara = RateTable::new();
        let mut ledger = Ledger::seeded(2018, &ara);

        assert_eq!(
            ledger.rekey(2016, 2018, &ara),
            Err(LedgerError::DuplicateYear(2018))
        );
        assert!(ledger.get(2016).is_some());

        ledger.rekey(2018, 2020, &ara).unwrap();
        let ends: Vec<i32> = ledger.years().iter().map(|y| y.year_end).collect();
        assert_eq!(ends, vec![2016, 2017, 2020]);
    }

    #[test]
    fn test_last_year_cannot_be_removed() {
        let mut ledger = Ledger::new(ContributionYear::new(2024, 0.0, 0.0));
        assert_eq!(ledger.remove(2024), Err(LedgerError::LastYear));

        ledger.append_next(&RateTable::new());
        assert!(ledger.remove(2024).is_ok());
        assert_eq!(ledger.remove(2025), Err(LedgerError::LastYear));
    }

    #[test]
    fn test_append_next_is_contiguous() {
        let mut ledger = Ledger::new(ContributionYear::new(2023, 0.116, 0.0));
        let ara = RateTable::from_pairs([(2024, 0.082)]);

        assert_eq!(ledger.append_next(&ara), 2024);
        assert_eq!(ledger.get(2024).unwrap().ara, 0.082);
    }
}
