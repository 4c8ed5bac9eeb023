//! Credit-program instruction encoding and account lists.
//!
//! The program indexes accounts positionally, not by name. Every entry's
//! position and signer/writable flags below are part of its binary
//! contract; a mismatch is a silent on-chain failure, not something the
//! client can detect before execution.

use credit_domain::HarnessError;
use credit_protocols::orca::pda::{
    ASSOCIATED_TOKEN_PROGRAM_ID, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID, WHIRLPOOL_PROGRAM_ID,
    derive_ata, derive_oracle,
};
use credit_protocols::orca::reader::PoolSnapshot;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey;
use solana_sdk::pubkey::Pubkey;

/// Credit program ID.
pub const CREDIT_PROGRAM_ID: Pubkey = pubkey!("82XBkYcPfaevmCNDJwV4EPcDrhWbvonN9iCUJaorfCRj");

/// Seed of the program's signing PDA, created once and reused.
pub const CREDIT_SIGNING_PDA_SEED: &[u8] = b"CREDIT_SIGNING_PDA";

const IX_SWAP: u8 = 0;
const IX_READ_BONO_PRICE: u8 = 1;

/// A request against the credit program. Each variant carries its own
/// fixed-layout payload of little-endian u64 arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditInstruction {
    Swap {
        usdc_amount: u64,
        bono_amount_threshold: u64,
    },
    ReadBonoPrice {
        bono_amount: u64,
    },
}

impl CreditInstruction {
    /// Opcode byte followed by the variant's little-endian u64 arguments.
    pub fn pack(&self) -> Vec<u8> {
        match *self {
            Self::Swap {
                usdc_amount,
                bono_amount_threshold,
            } => {
                let mut data = Vec::with_capacity(17);
                data.push(IX_SWAP);
                data.extend_from_slice(&usdc_amount.to_le_bytes());
                data.extend_from_slice(&bono_amount_threshold.to_le_bytes());
                data
            }
            Self::ReadBonoPrice { bono_amount } => {
                let mut data = Vec::with_capacity(9);
                data.push(IX_READ_BONO_PRICE);
                data.extend_from_slice(&bono_amount.to_le_bytes());
                data
            }
        }
    }

    /// Inverse of [`pack`](Self::pack). Payload length and argument count
    /// are opcode-specific and fixed.
    pub fn unpack(input: &[u8]) -> Result<Self, HarnessError> {
        let (&opcode, rest) = input
            .split_first()
            .ok_or_else(|| HarnessError::Encoding("empty instruction data".to_string()))?;
        match opcode {
            IX_SWAP => {
                if rest.len() != 16 {
                    return Err(HarnessError::Encoding(format!(
                        "swap payload must be 16 bytes, got {}",
                        rest.len()
                    )));
                }
                let mut amount = [0u8; 8];
                let mut threshold = [0u8; 8];
                amount.copy_from_slice(&rest[..8]);
                threshold.copy_from_slice(&rest[8..]);
                Ok(Self::Swap {
                    usdc_amount: u64::from_le_bytes(amount),
                    bono_amount_threshold: u64::from_le_bytes(threshold),
                })
            }
            IX_READ_BONO_PRICE => {
                let amount: [u8; 8] = rest.try_into().map_err(|_| {
                    HarnessError::Encoding(format!(
                        "read-price payload must be 8 bytes, got {}",
                        rest.len()
                    ))
                })?;
                Ok(Self::ReadBonoPrice {
                    bono_amount: u64::from_le_bytes(amount),
                })
            }
            other => Err(HarnessError::Encoding(format!(
                "unknown opcode: {other}"
            ))),
        }
    }

    /// Assembles the full instruction from an already-built account list.
    pub fn into_instruction(self, accounts: Vec<AccountMeta>) -> Instruction {
        Instruction {
            program_id: CREDIT_PROGRAM_ID,
            accounts,
            data: self.pack(),
        }
    }
}

/// The credit program's signing PDA.
pub fn derive_signing_pda() -> Pubkey {
    let (pda, _bump) = Pubkey::find_program_address(&[CREDIT_SIGNING_PDA_SEED], &CREDIT_PROGRAM_ID);
    pda
}

/// Account list for `ReadBonoPrice`: the pool, read-only.
pub fn read_price_accounts(pool: &Pubkey) -> Vec<AccountMeta> {
    vec![AccountMeta::new_readonly(*pool, false)]
}

/// Account list for `Swap`, in the program's positional order. Always 16
/// entries regardless of which tick arrays the quote resolved to.
pub fn swap_accounts(
    pool: &PoolSnapshot,
    payer: &Pubkey,
    tick_arrays: &[Pubkey; 3],
) -> Vec<AccountMeta> {
    let payer_usdc_ata = derive_ata(payer, &pool.token_mint_b);
    let signing_pda = derive_signing_pda();
    let pda_bono_ata = derive_ata(&signing_pda, &pool.token_mint_a);
    let oracle = derive_oracle(&pool.address);

    vec![
        AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
        AccountMeta::new_readonly(WHIRLPOOL_PROGRAM_ID, false),
        AccountMeta::new_readonly(pool.token_mint_a, false),
        AccountMeta::new(*payer, true),
        AccountMeta::new(payer_usdc_ata, false),
        AccountMeta::new_readonly(signing_pda, false),
        AccountMeta::new(pda_bono_ata, false),
        AccountMeta::new(pool.address, false),
        AccountMeta::new(pool.token_vault_a, false),
        AccountMeta::new(pool.token_vault_b, false),
        AccountMeta::new(tick_arrays[0], false),
        AccountMeta::new(tick_arrays[1], false),
        AccountMeta::new(tick_arrays[2], false),
        AccountMeta::new_readonly(oracle, false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> PoolSnapshot {
        PoolSnapshot {
            address: Pubkey::new_unique(),
            token_mint_a: Pubkey::new_unique(),
            token_mint_b: Pubkey::new_unique(),
            decimals_a: 9,
            decimals_b: 6,
            token_vault_a: Pubkey::new_unique(),
            token_vault_b: Pubkey::new_unique(),
            sqrt_price: 1u128 << 64,
            tick_current_index: 0,
            tick_spacing: 64,
            fee_rate: 3000,
            liquidity: 1,
        }
    }

    #[test]
    fn read_price_packs_to_nine_bytes() {
        let data = CreditInstruction::ReadBonoPrice {
            bono_amount: 2_000_000_000,
        }
        .pack();
        assert_eq!(data, [0x01, 0x00, 0x94, 0x35, 0x77, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn swap_packs_to_seventeen_bytes() {
        let data = CreditInstruction::Swap {
            usdc_amount: 1,
            bono_amount_threshold: u64::MAX,
        }
        .pack();
        assert_eq!(data.len(), 17);
        assert_eq!(data[0], 0x00);
        assert_eq!(data[1..9], 1u64.to_le_bytes());
        assert_eq!(data[9..17], [0xff; 8]);
    }

    #[test]
    fn pack_unpack_round_trip() {
        let requests = [
            CreditInstruction::Swap {
                usdc_amount: 1_000_000,
                bono_amount_threshold: 658_019,
            },
            CreditInstruction::Swap {
                usdc_amount: 0,
                bono_amount_threshold: 0,
            },
            CreditInstruction::ReadBonoPrice { bono_amount: 0 },
            CreditInstruction::ReadBonoPrice {
                bono_amount: u64::MAX,
            },
        ];
        for request in requests {
            assert_eq!(CreditInstruction::unpack(&request.pack()).unwrap(), request);
        }
    }

    #[test]
    fn encoding_is_injective_across_variants() {
        // Same leading u64, different opcodes and payload widths.
        let swap = CreditInstruction::Swap {
            usdc_amount: 42,
            bono_amount_threshold: 0,
        };
        let read = CreditInstruction::ReadBonoPrice { bono_amount: 42 };
        assert_ne!(swap.pack(), read.pack());
    }

    #[test]
    fn unpack_rejects_malformed_payloads() {
        assert!(CreditInstruction::unpack(&[]).is_err());
        assert!(CreditInstruction::unpack(&[2]).is_err());
        // truncated args
        assert!(CreditInstruction::unpack(&[1, 0, 0, 0]).is_err());
        assert!(CreditInstruction::unpack(&[0; 16]).is_err());
        // trailing bytes
        assert!(CreditInstruction::unpack(&[1, 0, 0, 0, 0, 0, 0, 0, 0, 0]).is_err());
    }

    #[test]
    fn read_price_account_list() {
        let pool = Pubkey::new_unique();
        let accounts = read_price_accounts(&pool);
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].pubkey, pool);
        assert!(!accounts[0].is_signer);
        assert!(!accounts[0].is_writable);
    }

    #[test]
    fn swap_account_list_order_and_flags() {
        let pool = snapshot();
        let payer = Pubkey::new_unique();
        let tick_arrays = [Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique()];
        let accounts = swap_accounts(&pool, &payer, &tick_arrays);

        assert_eq!(accounts.len(), 16);
        assert_eq!(accounts[0].pubkey, SYSTEM_PROGRAM_ID);
        assert_eq!(accounts[1].pubkey, TOKEN_PROGRAM_ID);
        assert_eq!(accounts[2].pubkey, ASSOCIATED_TOKEN_PROGRAM_ID);
        assert_eq!(accounts[3].pubkey, WHIRLPOOL_PROGRAM_ID);
        assert_eq!(accounts[4].pubkey, pool.token_mint_a);
        assert_eq!(accounts[5].pubkey, payer);
        assert_eq!(accounts[7].pubkey, derive_signing_pda());
        assert_eq!(accounts[9].pubkey, pool.address);
        assert_eq!(accounts[10].pubkey, pool.token_vault_a);
        assert_eq!(accounts[11].pubkey, pool.token_vault_b);
        assert_eq!(accounts[12].pubkey, tick_arrays[0]);
        assert_eq!(accounts[13].pubkey, tick_arrays[1]);
        assert_eq!(accounts[14].pubkey, tick_arrays[2]);

        // the payer is the sole signer
        let signers: Vec<usize> = accounts
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_signer)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(signers, vec![5]);

        // writable set: payer, payer ATA, PDA ATA, pool, vaults, tick arrays
        let writable: Vec<usize> = accounts
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_writable)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(writable, vec![5, 6, 8, 9, 10, 11, 12, 13, 14]);
    }

    #[test]
    fn swap_list_is_sixteen_for_any_tick_arrays() {
        let pool = snapshot();
        let payer = Pubkey::new_unique();
        for _ in 0..4 {
            let ticks = [Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique()];
            assert_eq!(swap_accounts(&pool, &payer, &ticks).len(), 16);
        }
    }

    #[test]
    fn instruction_targets_credit_program() {
        let ix = CreditInstruction::ReadBonoPrice { bono_amount: 1 }
            .into_instruction(read_price_accounts(&Pubkey::new_unique()));
        assert_eq!(ix.program_id, CREDIT_PROGRAM_ID);
        assert_eq!(ix.data.len(), 9);
    }
}
