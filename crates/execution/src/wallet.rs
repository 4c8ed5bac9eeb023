//! Wallet management.

use credit_domain::HarnessError;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, read_keypair_file};
use solana_sdk::signer::Signer;
use std::path::Path;

/// Signing identity for the run. Loaded once at startup from a JSON
/// byte-array keypair file; a malformed file is fatal.
pub struct Wallet {
    keypair: Keypair,
}

impl Wallet {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, HarnessError> {
        let path = path.as_ref();
        let keypair = read_keypair_file(path).map_err(|e| {
            HarnessError::Identity(format!("cannot load keypair {}: {e}", path.display()))
        })?;
        Ok(Self { keypair })
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    pub fn keypair(&self) -> &Keypair {
        &self.keypair
    }
}
