//! Transaction signing and submission.

use crate::wallet::Wallet;
use credit_domain::HarnessError;
use credit_protocols::rpc::RpcProvider;
use solana_sdk::hash::Hash;
use solana_sdk::instruction::Instruction;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Bound on the confirmation polling window.
const CONFIRM_DEADLINE: Duration = Duration::from_secs(30);

/// Record of a submitted transaction. Created at submission, immutable
/// afterwards; the only data later inspected for success or failure.
#[derive(Debug, Clone)]
pub struct SubmittedTransaction {
    pub signature: Signature,
    pub blockhash: Hash,
    pub confirmed: bool,
    pub slot: u64,
    pub logs: Vec<String>,
}

/// Signs, submits and confirms one instruction per transaction.
pub struct SubmissionPipeline {
    provider: Arc<RpcProvider>,
    wallet: Arc<Wallet>,
}

impl SubmissionPipeline {
    pub fn new(provider: Arc<RpcProvider>, wallet: Arc<Wallet>) -> Self {
        Self { provider, wallet }
    }

    /// Attaches the fee payer and a recent blockhash, signs, submits and
    /// blocks until confirmation, then fetches the execution logs.
    ///
    /// `skip_preflight` is the caller's choice: the swap flow skips
    /// simulation because it would run against pool state that may already
    /// have moved; the price read keeps it, its account set is static.
    /// A program abort is reported, never retried; retrying a failed swap
    /// risks double execution only the caller can reason about.
    pub async fn submit(
        &self,
        instruction: Instruction,
        skip_preflight: bool,
    ) -> Result<SubmittedTransaction, HarnessError> {
        let blockhash = self.provider.get_latest_blockhash().await?;
        let transaction = Transaction::new_signed_with_payer(
            &[instruction],
            Some(&self.wallet.pubkey()),
            &[self.wallet.keypair()],
            blockhash,
        );

        debug!(payer = %self.wallet.pubkey(), skip_preflight, "sending transaction");
        let signature = self.provider.send_transaction(&transaction, skip_preflight).await?;

        self.provider
            .confirm_transaction(&signature, CONFIRM_DEADLINE)
            .await?;
        info!(%signature, "transaction confirmed");

        let details = self.provider.get_transaction_details(&signature).await?;
        if let Some(err) = details.err {
            return Err(HarnessError::OnChainExecution {
                message: err,
                logs: details.logs,
            });
        }

        Ok(SubmittedTransaction {
            signature,
            blockhash,
            confirmed: true,
            slot: details.slot,
            logs: details.logs,
        })
    }
}
