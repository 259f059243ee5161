//! Calculation context and the single pipeline entry point
//!
//! The context owns the ledger and the three rate tables; nothing in the
//! pipeline mutates it or touches any ambient state. Hosting applications
//! subscribe to their own input changes and call [`compute_result`] afresh
//! each time; a run is linear in the number of scheme years.

use crate::engine::{self, CalculationResult, RetirementRequest};
use crate::ledger::{scheme_year_end, Ledger};
use crate::tables::RateTables;

/// The ledger and rate tables one calculation runs against.
///
/// Owned exclusively by the caller; a multi-request host must give each
/// request its own copy, there is no implicit thread safety.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineContext {
    pub ledger: Ledger,
    pub tables: RateTables,
}

impl EngineContext {
    pub fn new(ledger: Ledger, tables: RateTables) -> Self {
        Self { ledger, tables }
    }

    /// Default tables with a zero-pay ledger seeded through `final_year_end`
    pub fn seeded(final_year_end: i32) -> Self {
        let tables = RateTables::nhs_defaults();
        let ledger = Ledger::seeded(final_year_end, &tables.ara);
        Self { ledger, tables }
    }
}

/// Run the full pipeline: revaluation, retirement factor, commutation.
///
/// Pure and deterministic; identical inputs produce an identical result.
/// Never fails: malformed numeric input is coerced to its nearest valid
/// bound and missing dates degrade to no adjustment with
/// `insufficient_data` set.
pub fn compute_result(context: &EngineContext, request: &RetirementRequest) -> CalculationResult {
    let request = request.sanitized();

    // Absent retirement date: the latest ledger year is the effective
    // retirement point.
    let final_year_end = request
        .retirement_date
        .map(scheme_year_end)
        .unwrap_or_else(|| context.ledger.latest_year_end());

    let revaluation = engine::project(
        &context.ledger,
        &context.tables.ara,
        final_year_end,
        request.mode,
    );

    let adjustment = engine::adjustment::resolve(&request, &context.tables);
    let adjusted = revaluation.unreduced * adjustment.factor;

    let commutation = engine::commute(adjusted, request.commutation_amount);

    CalculationResult {
        unreduced_annual_pension: revaluation.unreduced,
        months_adjustment: adjustment.months,
        applied_factor: adjustment.factor,
        adjusted_annual_pension: adjusted,
        lump_sum: commutation.lump_sum,
        payable_annual_pension: commutation.payable,
        insufficient_data: adjustment.insufficient_data,
        audit: revaluation.audit,
    }
}
