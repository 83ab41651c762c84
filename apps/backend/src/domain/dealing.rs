//! Deterministic card dealing logic.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::domain::rules::HAND_SIZE;
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::DomainError;

pub const DECK_SIZE: usize = 40;

/// Generate the 40-card deck in standard order.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

/// Fisher-Yates shuffle of a fresh deck, reproducible for a given seed.
pub fn shuffle(seed: u64) -> Vec<Card> {
    let mut deck = full_deck();
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    deck.shuffle(&mut rng);
    deck
}

/// Deal `HAND_SIZE` cards to each of `n_seats` seats from a seeded shuffle.
///
/// Cards are drawn without replacement; the rest of the deck is discarded.
pub fn deal_hands(n_seats: usize, seed: u64) -> Result<Vec<Vec<Card>>, DomainError> {
    let deck = shuffle(seed);
    let needed = n_seats * HAND_SIZE;
    if needed > deck.len() {
        return Err(DomainError::InsufficientCards {
            needed,
            available: deck.len(),
        });
    }

    Ok(deck
        .chunks(HAND_SIZE)
        .take(n_seats)
        .map(<[Card]>::to_vec)
        .collect())
}
