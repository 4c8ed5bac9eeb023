use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Slippage tolerance expressed in basis points.
///
/// The minimum-received threshold is floored: rounding always goes against
/// the caller so the threshold never exceeds the nominal quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slippage {
    pub bps: u16,
}

impl Slippage {
    pub fn from_bps(bps: u16) -> Self {
        Self { bps }
    }

    /// Worst acceptable output for a nominal quoted output.
    pub fn min_output(&self, quoted: u64) -> u64 {
        let kept = 10_000u128 - u128::from(self.bps.min(10_000));
        ((u128::from(quoted) * kept) / 10_000) as u64
    }

    pub fn as_fraction(&self) -> Decimal {
        Decimal::from(self.bps) / Decimal::from(10_000)
    }
}
