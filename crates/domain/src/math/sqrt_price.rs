//! Q64.64 sqrt-price conversion.
//!
//! Whirlpool stores a pool's price as the square root of the raw B/A ratio
//! in Q64.64 fixed point. The display price is
//! `sqrt_price^2 / 2^128 * 10^(decimals_a - decimals_b)`. The naive route
//! through f64 loses precision at extreme ranges, so the whole conversion
//! stays in integer math and only the final quotient becomes a `Decimal`.

use crate::error::HarnessError;
use primitive_types::U512;
use rust_decimal::Decimal;

/// Fraction digits carried by the exact conversion.
pub const PRICE_SCALE: u32 = 12;

/// Largest decimal scale a `Decimal` can carry.
pub const MAX_DECIMALS: u8 = 28;

/// Converts a Q64.64 sqrt price to a display price (quote units per base
/// unit), exact up to [`PRICE_SCALE`] fraction digits, floored.
pub fn sqrt_price_x64_to_price(
    sqrt_price: u128,
    decimals_a: u8,
    decimals_b: u8,
) -> Result<Decimal, HarnessError> {
    if decimals_a > MAX_DECIMALS || decimals_b > MAX_DECIMALS {
        return Err(HarnessError::Encoding(format!(
            "mint decimals out of range: {decimals_a}/{decimals_b}"
        )));
    }
    // price * 10^S = sp^2 * 10^(S + decimals_a) / (2^128 * 10^decimals_b)
    // sp^2 < 2^256 and the power factor < 2^90, well inside U512.
    let sp = U512::from(sqrt_price);
    let ten = U512::from(10u8);
    let numer = sp * sp * ten.pow(U512::from(PRICE_SCALE + u32::from(decimals_a)));
    let denom = (U512::one() << 128) * ten.pow(U512::from(u32::from(decimals_b)));
    let scaled = numer / denom;

    if scaled > U512::from(i128::MAX as u128) {
        return Err(HarnessError::Encoding(format!(
            "price overflows decimal range (sqrt_price={sqrt_price})"
        )));
    }
    Decimal::try_from_i128_with_scale(scaled.as_u128() as i128, PRICE_SCALE)
        .map_err(|e| HarnessError::Encoding(e.to_string()))
}

/// Raw token amount to UI units for its mint's decimal scale.
pub fn u64_to_decimal(amount: u64, decimals: u8) -> Result<Decimal, HarnessError> {
    Decimal::try_from_i128_with_scale(i128::from(amount), u32::from(decimals))
        .map_err(|e| HarnessError::Encoding(e.to_string()))
}
