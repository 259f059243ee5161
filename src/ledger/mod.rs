//! Scheme-year ledger of pensionable pay

mod data;

pub use data::{
    scheme_year_end, year_label, ContributionYear, Ledger, LedgerError, ACCRUAL_DIVISOR,
    SCHEME_START_YEAR,
};
