pub use crate::instruction::{
    CREDIT_PROGRAM_ID, CreditInstruction, derive_signing_pda, read_price_accounts, swap_accounts,
};
pub use crate::submit::{SubmissionPipeline, SubmittedTransaction};
pub use crate::wallet::Wallet;
