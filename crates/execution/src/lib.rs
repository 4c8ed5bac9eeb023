//! Credit-program invocation: instruction building, signing, submission.
//!
//! This crate owns the program-specific contract surface: the two opcodes,
//! their binary payloads and their positional account lists, plus the
//! pipeline that signs, submits and confirms the assembled transaction.

/// Prelude module for convenient imports.
pub mod prelude;

/// Credit-program instruction encoding and account lists.
pub mod instruction;
/// Transaction signing and submission.
pub mod submit;
/// Wallet management.
pub mod wallet;
