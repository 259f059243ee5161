//! CSV export of the ledger and the revaluation audit trail

use std::io::Write;

use chrono::NaiveDate;

use crate::engine::{AuditRow, CalculationMode};
use crate::ledger::Ledger;

/// Write the contribution ledger as CSV: one row per scheme year, then a
/// short trailer recording the calculation settings and its headline
/// figure.
pub fn write_ledger_csv<W: Write>(
    writer: W,
    ledger: &Ledger,
    mode: CalculationMode,
    retirement_date: Option<NaiveDate>,
    unreduced: f64,
) -> csv::Result<()> {
    // Trailer rows are shorter than the year rows
    let mut csv = csv::WriterBuilder::new().flexible(true).from_writer(writer);

    csv.write_record([
        "Scheme Year",
        "Year End",
        "ARA",
        "Pensionable Pay",
        "Accrual (Pay/54)",
    ])?;
    for year in ledger.years() {
        csv.write_record([
            year.label(),
            year.year_end.to_string(),
            year.ara.to_string(),
            format!("{:.2}", year.pensionable_pay),
            format!("{:.2}", year.accrual()),
        ])?;
    }

    csv.write_record([""])?;
    csv.write_record(["Mode", mode.as_str()])?;
    csv.write_record([
        "Retirement date".to_string(),
        retirement_date.map(|d| d.to_string()).unwrap_or_default(),
    ])?;
    csv.write_record(["Unreduced at retirement".to_string(), format!("{unreduced:.2}")])?;

    csv.flush()?;
    Ok(())
}

/// Write the per-year audit trail as CSV
pub fn write_audit_csv<W: Write>(writer: W, audit: &[AuditRow]) -> csv::Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record([
        "Scheme Year",
        "Year End",
        "Accrual",
        "Multiplier",
        "Revalued",
        "Part Year",
    ])?;
    for row in audit {
        csv.write_record([
            row.label.clone(),
            row.year_end.to_string(),
            format!("{:.2}", row.accrual),
            format!("{:.6}", row.multiplier),
            format!("{:.2}", row.revalued),
            if row.partial { "yes" } else { "no" }.to_string(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}
