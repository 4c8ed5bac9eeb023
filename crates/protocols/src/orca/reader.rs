//! Pool snapshot reader.

use crate::PoolFetcher;
use crate::orca::whirlpool::Whirlpool;
use crate::rpc::RpcProvider;
use async_trait::async_trait;
use credit_domain::HarnessError;
use credit_domain::math::sqrt_price::{MAX_DECIMALS, sqrt_price_x64_to_price};
use rust_decimal::Decimal;
use solana_program::program_pack::Pack;
use solana_sdk::pubkey::Pubkey;
use spl_token::state::Mint;
use std::sync::Arc;
use tracing::debug;

/// Read-only view of a whirlpool, complete enough to price and to assemble
/// a swap. Fetched fresh per invocation, never cached.
#[derive(Debug, Clone)]
pub struct PoolSnapshot {
    pub address: Pubkey,
    pub token_mint_a: Pubkey,
    pub token_mint_b: Pubkey,
    pub decimals_a: u8,
    pub decimals_b: u8,
    pub token_vault_a: Pubkey,
    pub token_vault_b: Pubkey,
    pub sqrt_price: u128,
    pub tick_current_index: i32,
    pub tick_spacing: u16,
    /// Hundredths of a basis point.
    pub fee_rate: u16,
    pub liquidity: u128,
}

impl PoolSnapshot {
    /// Display price in quote units per base unit, exact fixed-point.
    pub fn ui_price(&self) -> Result<Decimal, HarnessError> {
        sqrt_price_x64_to_price(self.sqrt_price, self.decimals_a, self.decimals_b)
    }
}

/// Fetches whirlpool state over RPC.
pub struct WhirlpoolReader {
    provider: Arc<RpcProvider>,
}

impl WhirlpoolReader {
    pub fn new(provider: Arc<RpcProvider>) -> Self {
        Self { provider }
    }

    async fn fetch_mint_decimals(&self, mint: &Pubkey) -> Result<u8, HarnessError> {
        let account = self.provider.get_account_fresh(mint).await?;
        let mint_state = Mint::unpack_from_slice(&account.data)
            .map_err(|e| HarnessError::Encoding(format!("mint account layout: {e}")))?;
        if mint_state.decimals > MAX_DECIMALS {
            return Err(HarnessError::Encoding(format!(
                "mint {mint} reports decimals {} beyond the displayable range",
                mint_state.decimals
            )));
        }
        Ok(mint_state.decimals)
    }
}

#[async_trait]
impl PoolFetcher for WhirlpoolReader {
    async fn fetch_pool(&self, pool_address: &Pubkey) -> Result<PoolSnapshot, HarnessError> {
        let account = self.provider.get_account_fresh(pool_address).await?;
        let pool = Whirlpool::try_from_account_data(&account.data)?;

        let decimals_a = self.fetch_mint_decimals(&pool.token_mint_a).await?;
        let decimals_b = self.fetch_mint_decimals(&pool.token_mint_b).await?;

        debug!(
            pool = %pool_address,
            sqrt_price = pool.sqrt_price,
            tick = pool.tick_current_index,
            "fetched pool snapshot"
        );

        Ok(PoolSnapshot {
            address: *pool_address,
            token_mint_a: pool.token_mint_a,
            token_mint_b: pool.token_mint_b,
            decimals_a,
            decimals_b,
            token_vault_a: pool.token_vault_a,
            token_vault_b: pool.token_vault_b,
            sqrt_price: pool.sqrt_price,
            tick_current_index: pool.tick_current_index,
            tick_spacing: pool.tick_spacing,
            fee_rate: pool.fee_rate,
            liquidity: pool.liquidity,
        })
    }
}
