use borsh::{BorshDeserialize, BorshSerialize};
use credit_domain::HarnessError;
use solana_sdk::pubkey::Pubkey;

/// Number of rewards supported by Whirlpools.
pub const NUM_REWARDS: usize = 3;

/// Whirlpool account layout.
///
/// Borsh needs the byte-exact struct, reward infos included, or
/// deserialization fails partway through the account data. Field order
/// mirrors the on-chain program's state definition.
#[derive(BorshDeserialize, BorshSerialize, Debug, Clone, PartialEq)]
pub struct Whirlpool {
    /// Anchor account discriminator.
    pub discriminator: [u8; 8],
    pub whirlpools_config: Pubkey,
    pub whirlpool_bump: [u8; 1],
    pub tick_spacing: u16,
    pub tick_spacing_seed: [u8; 2],
    /// Stored as hundredths of a basis point.
    pub fee_rate: u16,
    /// Portion of the fee rate taken, in basis points.
    pub protocol_fee_rate: u16,
    pub liquidity: u128,
    /// Q64.64.
    pub sqrt_price: u128,
    pub tick_current_index: i32,
    pub protocol_fee_owed_a: u64,
    pub protocol_fee_owed_b: u64,
    pub token_mint_a: Pubkey,
    pub token_vault_a: Pubkey,
    /// Q64.64.
    pub fee_growth_global_a: u128,
    pub token_mint_b: Pubkey,
    pub token_vault_b: Pubkey,
    /// Q64.64.
    pub fee_growth_global_b: u128,
    pub reward_last_updated_timestamp: u64,
    pub reward_infos: [WhirlpoolRewardInfo; NUM_REWARDS],
}

#[derive(BorshDeserialize, BorshSerialize, Debug, Clone, Copy, PartialEq)]
pub struct WhirlpoolRewardInfo {
    /// Reward token mint.
    pub mint: Pubkey,
    /// Reward vault token account.
    pub vault: Pubkey,
    /// Authority allowed to initialize the reward and set emissions.
    pub authority: Pubkey,
    /// Q64.64 tokens per second earned per unit of liquidity.
    pub emissions_per_second_x64: u128,
    /// Q64.64 total tokens earned per unit of liquidity since emissions
    /// were turned on.
    pub growth_global_x64: u128,
}

impl Whirlpool {
    /// Deserializes a whirlpool account's raw data.
    pub fn try_from_account_data(data: &[u8]) -> Result<Self, HarnessError> {
        Self::try_from_slice(data)
            .map_err(|e| HarnessError::Encoding(format!("whirlpool account layout: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use borsh::to_vec;

    fn reward() -> WhirlpoolRewardInfo {
        WhirlpoolRewardInfo {
            mint: Pubkey::new_unique(),
            vault: Pubkey::new_unique(),
            authority: Pubkey::new_unique(),
            emissions_per_second_x64: 0,
            growth_global_x64: 0,
        }
    }

    #[test]
    fn layout_round_trip() {
        let pool = Whirlpool {
            discriminator: [0x3f; 8],
            whirlpools_config: Pubkey::new_unique(),
            whirlpool_bump: [255],
            tick_spacing: 64,
            tick_spacing_seed: 64u16.to_le_bytes(),
            fee_rate: 3000,
            protocol_fee_rate: 300,
            liquidity: 1_000_000_000,
            sqrt_price: 1u128 << 64,
            tick_current_index: 0,
            protocol_fee_owed_a: 0,
            protocol_fee_owed_b: 0,
            token_mint_a: Pubkey::new_unique(),
            token_vault_a: Pubkey::new_unique(),
            fee_growth_global_a: 0,
            token_mint_b: Pubkey::new_unique(),
            token_vault_b: Pubkey::new_unique(),
            fee_growth_global_b: 0,
            reward_last_updated_timestamp: 0,
            reward_infos: [reward(), reward(), reward()],
        };

        let bytes = to_vec(&pool).unwrap();
        // Whirlpool accounts are 653 bytes on chain.
        assert_eq!(bytes.len(), 653);
        assert_eq!(Whirlpool::try_from_account_data(&bytes).unwrap(), pool);
    }

    #[test]
    fn truncated_data_is_rejected() {
        assert!(Whirlpool::try_from_account_data(&[0u8; 100]).is_err());
    }
}
