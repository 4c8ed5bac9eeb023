//! Core types for the credit-program client harness.
//!
//! Holds the pieces that need no network access: the error taxonomy,
//! exact fixed-point price math and slippage handling. Everything here is
//! independently testable without an RPC endpoint.

pub mod error;
pub mod math;
pub mod value_objects;

pub use error::HarnessError;
