//! Commutation of annual pension for a one-off lump sum

/// Statutory exchange rate: £12 of lump sum per £1 of annual pension given up
pub const COMMUTATION_RATE: f64 = 12.0;

/// Result of a commutation exchange
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Commutation {
    /// Annual pension actually given up after clamping
    pub commuted: f64,

    /// One-off lump sum received
    pub lump_sum: f64,

    /// Annual pension remaining in payment
    pub payable: f64,
}

/// Exchange part of the adjusted pension for a lump sum. The requested
/// amount is clamped to `[0, adjusted]`: a member cannot commute more
/// pension than they have.
pub fn commute(adjusted_annual_pension: f64, requested: f64) -> Commutation {
    let commuted = requested.clamp(0.0, adjusted_annual_pension.max(0.0));
    Commutation {
        commuted,
        lump_sum: commuted * COMMUTATION_RATE,
        payable: adjusted_annual_pension - commuted,
    }
}
