//! Program constants and address derivation.
//!
//! All derivation here is pure: from already-known addresses to the
//! positional account material a swap needs, with no network access.

use credit_domain::HarnessError;
use solana_sdk::pubkey;
use solana_sdk::pubkey::Pubkey;

/// Orca Whirlpool program ID (mainnet).
pub const WHIRLPOOL_PROGRAM_ID: Pubkey = pubkey!("whirLbMiicVdio4qvUfM5KAg6Ct8VwpYzGff3uctyCc");

/// Token program ID.
pub const TOKEN_PROGRAM_ID: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

/// Associated token program ID.
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey =
    pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");

/// System program ID.
pub const SYSTEM_PROGRAM_ID: Pubkey = pubkey!("11111111111111111111111111111111");

/// Ticks covered by one tick-array account, per tick-spacing unit.
pub const TICK_ARRAY_SIZE: i32 = 88;

pub const MIN_TICK_INDEX: i32 = -443636;
pub const MAX_TICK_INDEX: i32 = 443636;

/// Associated token account for an owner and mint. Works for off-curve
/// owners (program PDAs) as well; the derivation is seed-based either way.
pub fn derive_ata(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    let (ata, _bump) = Pubkey::find_program_address(
        &[owner.as_ref(), TOKEN_PROGRAM_ID.as_ref(), mint.as_ref()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    );
    ata
}

/// Oracle PDA of a whirlpool.
pub fn derive_oracle(pool: &Pubkey) -> Pubkey {
    let (oracle, _bump) =
        Pubkey::find_program_address(&[b"oracle", pool.as_ref()], &WHIRLPOOL_PROGRAM_ID);
    oracle
}

/// Tick-array PDA for a given start index. The program seeds the address
/// with the decimal string of the start index.
pub fn derive_tick_array(pool: &Pubkey, start_tick_index: i32) -> Pubkey {
    let seed = start_tick_index.to_string();
    let (tick_array, _bump) = Pubkey::find_program_address(
        &[b"tick_array", pool.as_ref(), seed.as_bytes()],
        &WHIRLPOOL_PROGRAM_ID,
    );
    tick_array
}

/// Start index of the tick array `offset` arrays away from the one holding
/// `tick_index`. Floor division: the array holding tick -1 starts below
/// zero, not at it.
pub fn tick_array_start_index(
    tick_index: i32,
    tick_spacing: u16,
    offset: i32,
) -> Result<i32, HarnessError> {
    if tick_spacing == 0 {
        return Err(HarnessError::AccountResolution(
            "tick spacing is zero".to_string(),
        ));
    }
    let ticks_per_array = i32::from(tick_spacing) * TICK_ARRAY_SIZE;
    let array_index = tick_index.div_euclid(ticks_per_array) + offset;
    let start = array_index
        .checked_mul(ticks_per_array)
        .ok_or_else(|| HarnessError::AccountResolution("tick array index overflow".to_string()))?;
    if !(MIN_TICK_INDEX..=MAX_TICK_INDEX).contains(&start) {
        return Err(HarnessError::AccountResolution(format!(
            "tick array start index out of bounds: {start}"
        )));
    }
    Ok(start)
}

/// The three tick arrays a swap from the current tick may traverse, in
/// traversal order. `a_to_b` walks the price down, `b_to_a` walks it up.
pub fn tick_arrays_for_swap(
    pool: &Pubkey,
    tick_current_index: i32,
    tick_spacing: u16,
    a_to_b: bool,
) -> Result<[Pubkey; 3], HarnessError> {
    let offsets: [i32; 3] = if a_to_b { [0, -1, -2] } else { [0, 1, 2] };
    let mut arrays = [Pubkey::default(); 3];
    for (slot, offset) in arrays.iter_mut().zip(offsets) {
        let start = tick_array_start_index(tick_current_index, tick_spacing, offset)?;
        *slot = derive_tick_array(pool, start);
    }
    Ok(arrays)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_index_floors_across_zero() {
        // spacing 64 -> 5632 ticks per array
        assert_eq!(tick_array_start_index(4054, 64, 0).unwrap(), 0);
        assert_eq!(tick_array_start_index(4054, 64, 1).unwrap(), 5632);
        assert_eq!(tick_array_start_index(-1, 64, 0).unwrap(), -5632);
        assert_eq!(tick_array_start_index(-5632, 64, 0).unwrap(), -5632);
        assert_eq!(tick_array_start_index(-5633, 64, 0).unwrap(), -11264);
    }

    #[test]
    fn start_index_bounds() {
        assert!(tick_array_start_index(443_000, 64, 2).is_err());
        assert!(tick_array_start_index(-443_000, 64, -2).is_err());
        assert!(tick_array_start_index(0, 0, 0).is_err());
    }

    #[test]
    fn traversal_direction() {
        let pool = Pubkey::new_unique();
        let up = tick_arrays_for_swap(&pool, 100, 64, false).unwrap();
        assert_eq!(up[0], derive_tick_array(&pool, 0));
        assert_eq!(up[1], derive_tick_array(&pool, 5632));
        assert_eq!(up[2], derive_tick_array(&pool, 11264));

        let down = tick_arrays_for_swap(&pool, 100, 64, true).unwrap();
        assert_eq!(down[0], derive_tick_array(&pool, 0));
        assert_eq!(down[1], derive_tick_array(&pool, -5632));
        assert_eq!(down[2], derive_tick_array(&pool, -11264));
    }

    #[test]
    fn derivations_are_deterministic() {
        let pool = Pubkey::new_unique();
        assert_eq!(derive_oracle(&pool), derive_oracle(&pool));
        assert_eq!(derive_tick_array(&pool, 0), derive_tick_array(&pool, 0));
        assert_ne!(derive_tick_array(&pool, 0), derive_tick_array(&pool, 5632));

        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        assert_eq!(derive_ata(&owner, &mint), derive_ata(&owner, &mint));
    }
}
