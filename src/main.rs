//! CARE Estimator CLI
//!
//! Runs a single pension estimate and prints the year-by-year
//! revaluation audit trail.

use std::fs::File;
use std::path::PathBuf;

use anyhow::Context as _;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

use care_estimator::ledger::scheme_year_end;
use care_estimator::{
    compute_result, export, CalculationMode, EngineContext, RetirementRequest, RetirementType,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RetirementTypeArg {
    AtAge,
    Early,
    Late,
}

impl From<RetirementTypeArg> for RetirementType {
    fn from(value: RetirementTypeArg) -> Self {
        match value {
            RetirementTypeArg::AtAge => RetirementType::AtAge,
            RetirementTypeArg::Early => RetirementType::Early,
            RetirementTypeArg::Late => RetirementType::Late,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Actual,
    Estimate,
}

impl From<ModeArg> for CalculationMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Actual => CalculationMode::Actual,
            ModeArg::Estimate => CalculationMode::Estimate,
        }
    }
}

/// Estimate a 2015-scheme CARE pension
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Pensionable pay applied to every completed scheme year
    #[arg(long, default_value_t = 0.0)]
    pay: f64,

    /// Retirement date (YYYY-MM-DD); omitted means the latest ledger year
    #[arg(long)]
    retirement_date: Option<NaiveDate>,

    /// Date of birth (YYYY-MM-DD), needed for early/late adjustment
    #[arg(long)]
    date_of_birth: Option<NaiveDate>,

    /// Normal Pension Age in years
    #[arg(long, default_value_t = 67.0)]
    npa: f64,

    /// Years of early-retirement reduction bought out (0-3)
    #[arg(long, default_value_t = 0.0)]
    buyout_years: f64,

    #[arg(long, value_enum, default_value = "at-age")]
    retirement_type: RetirementTypeArg,

    #[arg(long, value_enum, default_value = "estimate")]
    mode: ModeArg,

    /// Annual pension to commute for a lump sum
    #[arg(long, default_value_t = 0.0)]
    commute: f64,

    /// Write the ledger as CSV to this path
    #[arg(long)]
    export: Option<PathBuf>,

    /// Write the audit trail as CSV to this path
    #[arg(long)]
    export_audit: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    // Seed every scheme year up to the retirement point with uniform pay;
    // the final (part) year stays at zero.
    let final_year_end = args
        .retirement_date
        .map(scheme_year_end)
        .unwrap_or(2026);
    let mut context = EngineContext::seeded(final_year_end);
    for year_end in context
        .ledger
        .years()
        .iter()
        .map(|y| y.year_end)
        .filter(|&y| y < final_year_end)
        .collect::<Vec<_>>()
    {
        context.ledger.set_pay(year_end, args.pay)?;
    }

    let request = RetirementRequest {
        retirement_date: args.retirement_date,
        date_of_birth: args.date_of_birth,
        normal_pension_age: args.npa,
        buyout_years: args.buyout_years,
        retirement_type: args.retirement_type.into(),
        mode: args.mode.into(),
        commutation_amount: args.commute,
    };

    let result = compute_result(&context, &request);

    println!("CARE Estimator v0.1.0");
    println!("=====================\n");

    println!(
        "{:>12} {:>9} {:>14} {:>12} {:>14}",
        "Scheme Year", "Year End", "Accrual", "Multiplier", "Revalued"
    );
    println!("{}", "-".repeat(66));
    for row in &result.audit {
        let label = if row.partial {
            format!("{} *", row.label)
        } else {
            row.label.clone()
        };
        println!(
            "{:>12} {:>9} {:>14.2} {:>12.6} {:>14.2}",
            label, row.year_end, row.accrual, row.multiplier, row.revalued
        );
    }
    println!("{}", "-".repeat(66));
    println!("(* part year, unrevalued)\n");

    println!("Summary:");
    println!(
        "  Unreduced annual pension: £{:.2}",
        result.unreduced_annual_pension
    );
    println!("  Months adjustment:        {}", result.months_adjustment);
    println!("  Applied factor:           {:.4}", result.applied_factor);
    println!(
        "  Adjusted annual pension:  £{:.2}",
        result.adjusted_annual_pension
    );
    println!("  Lump sum:                 £{:.2}", result.lump_sum);
    println!(
        "  Payable annual pension:   £{:.2}",
        result.payable_annual_pension
    );
    if result.insufficient_data {
        println!("\nWarning: early/late adjustment requested without the dates to");
        println!("compute it; the figures above assume no adjustment.");
    }

    if let Some(path) = &args.export {
        let file = File::create(path)
            .with_context(|| format!("unable to create {}", path.display()))?;
        export::write_ledger_csv(
            file,
            &context.ledger,
            request.mode,
            request.retirement_date,
            result.unreduced_annual_pension,
        )?;
        println!("\nLedger written to: {}", path.display());
    }

    if let Some(path) = &args.export_audit {
        let file = File::create(path)
            .with_context(|| format!("unable to create {}", path.display()))?;
        export::write_audit_csv(file, &result.audit)?;
        println!("Audit trail written to: {}", path.display());
    }

    Ok(())
}
