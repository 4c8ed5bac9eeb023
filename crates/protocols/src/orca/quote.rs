//! Swap quote resolution.
//!
//! The on-chain program executes the swap; the client only needs an output
//! estimate, a worst-acceptable threshold and the tick arrays the swap may
//! read. The estimate prices the whole input at the current sqrt price
//! after pool fees, in floor integer math. A swap that crosses ticks gets
//! less than the estimate; the slippage threshold is what protects the
//! caller, so it is floored too and never exceeds the estimate.

use crate::orca::pda::tick_arrays_for_swap;
use crate::orca::reader::PoolSnapshot;
use credit_domain::HarnessError;
use credit_domain::error::QuoteErrorKind;
use credit_domain::value_objects::Slippage;
use primitive_types::U512;
use solana_sdk::pubkey::Pubkey;

/// Fee rate denominator: fee_rate is in hundredths of a basis point.
const FEE_RATE_DENOM: u128 = 1_000_000;

/// Resolved swap quote for a fixed input amount.
#[derive(Debug, Clone)]
pub struct SwapQuote {
    /// Input amount, raw units of the input mint.
    pub amount_in: u64,
    /// Estimated output, raw units of the output mint.
    pub estimated_out: u64,
    /// Worst acceptable output (floor of the slippage-adjusted estimate).
    pub other_amount_threshold: u64,
    /// True when selling token A for token B.
    pub a_to_b: bool,
    /// Tick arrays the swap may traverse, in traversal order.
    pub tick_arrays: [Pubkey; 3],
}

/// Quotes a swap of `amount_in` of `input_mint` against the pool snapshot.
///
/// The snapshot must be freshly fetched; quoting against stale pool state
/// risks an on-chain rejection inside the slippage bound.
pub fn quote_swap_by_input(
    pool: &PoolSnapshot,
    input_mint: &Pubkey,
    amount_in: u64,
    slippage: Slippage,
) -> Result<SwapQuote, HarnessError> {
    let a_to_b = if *input_mint == pool.token_mint_a {
        true
    } else if *input_mint == pool.token_mint_b {
        false
    } else {
        return Err(HarnessError::Quote(QuoteErrorKind::UnknownInputMint));
    };

    if pool.liquidity == 0 {
        return Err(HarnessError::Quote(QuoteErrorKind::InsufficientLiquidity));
    }

    let after_fee = (u128::from(amount_in) * (FEE_RATE_DENOM - u128::from(pool.fee_rate)))
        / FEE_RATE_DENOM;

    // Raw price of A in B units is sp^2 / 2^128.
    let sp = U512::from(pool.sqrt_price);
    let estimated = if a_to_b {
        (U512::from(after_fee) * sp * sp) >> 128
    } else {
        (U512::from(after_fee) << 128) / (sp * sp)
    };
    if estimated > U512::from(u64::MAX) {
        return Err(HarnessError::Encoding(
            "estimated output exceeds u64".to_string(),
        ));
    }
    let estimated_out = estimated.as_u64();
    if estimated_out == 0 {
        return Err(HarnessError::Quote(QuoteErrorKind::InsufficientLiquidity));
    }

    let tick_arrays = tick_arrays_for_swap(
        &pool.address,
        pool.tick_current_index,
        pool.tick_spacing,
        a_to_b,
    )?;

    Ok(SwapQuote {
        amount_in,
        estimated_out,
        other_amount_threshold: slippage.min_output(estimated_out),
        a_to_b,
        tick_arrays,
    })
}
