pub mod orca;
pub mod rpc;

use async_trait::async_trait;
use credit_domain::HarnessError;
use solana_sdk::pubkey::Pubkey;

use crate::orca::reader::PoolSnapshot;

/// Seam for pool state access, so flows can run against a mock in tests.
#[async_trait]
pub trait PoolFetcher {
    async fn fetch_pool(&self, pool_address: &Pubkey) -> Result<PoolSnapshot, HarnessError>;
}
