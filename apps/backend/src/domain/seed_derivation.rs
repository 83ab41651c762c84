//! RNG seed derivation utilities for deterministic game behavior.
//!
//! A match draws one random base seed when it is created; everything random
//! after that (first dealer, each hand's shuffle) is derived from it so a
//! match can be replayed from its seed.

/// Derive a seed for dealing the cards of hand `hand_no` (1-based).
pub fn derive_dealing_seed(match_seed: u64, hand_no: u32) -> u64 {
    match_seed
        .wrapping_add((hand_no as u64).wrapping_mul(1_000_000))
        .wrapping_add(2)
}

/// Derive the first dealer's seat for a table of `n_seats`.
pub fn derive_first_dealer(match_seed: u64, n_seats: u8) -> u8 {
    if n_seats == 0 {
        return 0;
    }
    // splitmix64 finaliser so consecutive seeds spread across seats
    let mut z = match_seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^= z >> 31;
    (z % n_seats as u64) as u8
}
