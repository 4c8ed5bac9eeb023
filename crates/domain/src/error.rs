//! Error taxonomy for the harness.
//!
//! Every error is fatal to a run; the scripts are one-shot invocations and
//! there is no retry layer. Failures surface immediately with diagnostic
//! output.

use thiserror::Error;

/// Reason a quote could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteErrorKind {
    /// The input mint is neither side of the pool.
    UnknownInputMint,
    /// No viable route for the requested amount.
    InsufficientLiquidity,
}

#[derive(Debug, Error)]
pub enum HarnessError {
    /// RPC endpoint unreachable or request transport failed.
    #[error("connectivity error: {0}")]
    Connectivity(String),

    /// Key material could not be loaded or parsed.
    #[error("identity error: {0}")]
    Identity(String),

    /// No viable swap quote.
    #[error("quote error: {0:?}")]
    Quote(QuoteErrorKind),

    /// An argument does not fit its fixed-width field, or a payload is
    /// malformed.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// A derived address (ATA, PDA, tick array) could not be computed.
    #[error("account resolution error: {0}")]
    AccountResolution(String),

    /// Preflight simulation rejected the transaction before broadcast.
    #[error("submission rejected: {0}")]
    SubmissionRejected(String),

    /// No confirmation observed within the polling window.
    #[error("confirmation timeout for signature {0}")]
    ConfirmationTimeout(String),

    /// The on-chain program aborted; discovered via log inspection.
    #[error("on-chain execution error: {message}")]
    OnChainExecution {
        message: String,
        logs: Vec<String>,
    },
}
