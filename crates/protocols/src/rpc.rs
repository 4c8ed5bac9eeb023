//! RPC provider for blockchain interaction.
//!
//! Thin wrapper over the nonblocking [`RpcClient`] that maps transport and
//! RPC failures into the harness error taxonomy. One provider is created
//! per run and passed by parameter to every component.

use credit_domain::HarnessError;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::{RpcSendTransactionConfig, RpcTransactionConfig};
use solana_sdk::account::Account;
use solana_commitment_config::CommitmentConfig;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;
use solana_transaction_status::UiTransactionEncoding;
use solana_transaction_status::option_serializer::OptionSerializer;
use std::time::Duration;
use tracing::debug;

/// Poll interval while waiting for a confirmation.
const CONFIRM_POLL: Duration = Duration::from_millis(500);

/// Outcome of a transaction-detail fetch.
#[derive(Debug, Clone)]
pub struct TransactionDetails {
    pub slot: u64,
    pub logs: Vec<String>,
    /// Program-reported abort, if the transaction failed on chain.
    pub err: Option<String>,
}

/// RPC provider for blockchain interaction.
pub struct RpcProvider {
    client: RpcClient,
    commitment: CommitmentConfig,
}

impl RpcProvider {
    /// Creates a provider at confirmed commitment.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_commitment(url, CommitmentConfig::confirmed())
    }

    pub fn with_commitment(url: impl Into<String>, commitment: CommitmentConfig) -> Self {
        Self {
            client: RpcClient::new_with_commitment(url.into(), commitment),
            commitment,
        }
    }

    pub fn url(&self) -> String {
        self.client.url()
    }

    #[cfg(test)]
    fn new_mock_with_mocks(mocks: solana_client::rpc_client::Mocks) -> Self {
        Self {
            client: RpcClient::new_mock_with_mocks("succeeds".to_string(), mocks),
            commitment: CommitmentConfig::confirmed(),
        }
    }

    /// Fetches an account at processed commitment, bypassing anything the
    /// node may serve from a more settled (and staler) view. Pool state
    /// moves between reads; staleness here risks a failed execution.
    pub async fn get_account_fresh(&self, address: &Pubkey) -> Result<Account, HarnessError> {
        let response = self
            .client
            .get_account_with_commitment(address, CommitmentConfig::processed())
            .await
            .map_err(|e| HarnessError::Connectivity(e.to_string()))?;
        response
            .value
            .ok_or_else(|| HarnessError::AccountResolution(format!("account not found: {address}")))
    }

    pub async fn get_latest_blockhash(&self) -> Result<Hash, HarnessError> {
        self.client
            .get_latest_blockhash()
            .await
            .map_err(|e| HarnessError::Connectivity(e.to_string()))
    }

    /// Submits a signed transaction. With preflight enabled, a simulation
    /// failure surfaces as [`HarnessError::SubmissionRejected`] before any
    /// broadcast.
    pub async fn send_transaction(
        &self,
        transaction: &Transaction,
        skip_preflight: bool,
    ) -> Result<Signature, HarnessError> {
        let config = RpcSendTransactionConfig {
            skip_preflight,
            preflight_commitment: Some(self.commitment.commitment),
            ..Default::default()
        };
        self.client
            .send_transaction_with_config(transaction, config)
            .await
            .map_err(classify_send_error)
    }

    /// Blocks until the signature reaches the provider's commitment or the
    /// deadline lapses.
    pub async fn confirm_transaction(
        &self,
        signature: &Signature,
        deadline: Duration,
    ) -> Result<(), HarnessError> {
        let started = tokio::time::Instant::now();
        loop {
            let confirmed = self
                .client
                .confirm_transaction_with_commitment(signature, self.commitment)
                .await
                .map_err(|e| HarnessError::Connectivity(e.to_string()))?;
            if confirmed.value {
                debug!(%signature, "transaction confirmed");
                return Ok(());
            }
            if started.elapsed() >= deadline {
                return Err(HarnessError::ConfirmationTimeout(signature.to_string()));
            }
            tokio::time::sleep(CONFIRM_POLL).await;
        }
    }

    /// Fetches a confirmed transaction and extracts slot, log lines and the
    /// program-reported error, if any.
    pub async fn get_transaction_details(
        &self,
        signature: &Signature,
    ) -> Result<TransactionDetails, HarnessError> {
        let config = RpcTransactionConfig {
            encoding: Some(UiTransactionEncoding::Json),
            commitment: Some(self.commitment),
            max_supported_transaction_version: Some(0),
        };
        let fetched = self
            .client
            .get_transaction_with_config(signature, config)
            .await
            .map_err(|e| HarnessError::Connectivity(e.to_string()))?;

        let meta = fetched.transaction.meta;
        let (logs, err) = match meta {
            Some(meta) => {
                let logs = match meta.log_messages {
                    OptionSerializer::Some(lines) => lines,
                    _ => Vec::new(),
                };
                (logs, meta.err.map(|e| e.to_string()))
            }
            None => (Vec::new(), None),
        };
        Ok(TransactionDetails {
            slot: fetched.slot,
            logs,
            err,
        })
    }

    /// UI amount string of an SPL token account balance.
    pub async fn get_token_balance(&self, token_account: &Pubkey) -> Result<String, HarnessError> {
        let balance = self
            .client
            .get_token_account_balance(token_account)
            .await
            .map_err(|e| HarnessError::Connectivity(e.to_string()))?;
        Ok(balance.ui_amount_string)
    }
}

/// A send failure carrying a transaction error came out of preflight
/// simulation, before any broadcast. Anything else is transport.
fn classify_send_error(error: solana_client::client_error::ClientError) -> HarnessError {
    match error.get_transaction_error() {
        Some(tx_err) => HarnessError::SubmissionRejected(tx_err.to_string()),
        None => HarnessError::Connectivity(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_client::client_error::{ClientError, ClientErrorKind};
    use solana_sdk::transaction::TransactionError;

    #[test]
    fn preflight_failure_maps_to_submission_rejected() {
        let error = ClientError {
            request: None,
            kind: Box::new(ClientErrorKind::TransactionError(TransactionError::AccountNotFound)),
        };
        assert!(matches!(
            classify_send_error(error),
            HarnessError::SubmissionRejected(_)
        ));
    }

    #[test]
    fn transport_failure_maps_to_connectivity() {
        let error = ClientError {
            request: None,
            kind: Box::new(ClientErrorKind::Custom("connection refused".to_string())),
        };
        assert!(matches!(
            classify_send_error(error),
            HarnessError::Connectivity(_)
        ));
    }

    #[tokio::test]
    async fn pending_confirmation_times_out() {
        // A signature that never lands: status stays null, the deadline
        // lapses and the error carries the signature for the operator.
        let mut mocks = solana_client::rpc_client::Mocks::default();
        mocks.insert(
            solana_client::rpc_request::RpcRequest::GetSignatureStatuses,
            serde_json::json!({ "context": { "slot": 1 }, "value": [null] }),
        );
        let provider = RpcProvider::new_mock_with_mocks(mocks);

        let signature = Signature::default();
        let result = provider
            .confirm_transaction(&signature, Duration::ZERO)
            .await;
        match result {
            Err(HarnessError::ConfirmationTimeout(reported)) => {
                assert_eq!(reported, signature.to_string());
            }
            other => panic!("expected confirmation timeout, got {other:?}"),
        }
    }
}
