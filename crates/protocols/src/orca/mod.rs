//! Orca Whirlpool protocol adapter.
//!
//! Everything the harness needs from the Whirlpool side: the on-chain
//! account layout, address derivation (tick arrays, oracle, ATAs), a pool
//! snapshot reader and a spot-price swap quote.

/// Address derivation and program constants.
pub mod pda;
/// Swap quote resolution.
pub mod quote;
/// Pool snapshot reader.
pub mod reader;
/// Orca whirlpool account structures.
pub mod whirlpool;
