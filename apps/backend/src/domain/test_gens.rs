// Proptest generators for domain types.

use proptest::prelude::*;

use crate::domain::dealing::full_deck;
use crate::domain::rounds::SideOutcome;
use crate::domain::state::Side;
use crate::domain::{Card, Rank, Suit};

pub fn suit() -> impl Strategy<Value = Suit> {
    proptest::sample::select(Suit::ALL.to_vec())
}

pub fn rank() -> impl Strategy<Value = Rank> {
    proptest::sample::select(Rank::ALL.to_vec())
}

pub fn card() -> impl Strategy<Value = Card> {
    (suit(), rank()).prop_map(|(suit, rank)| Card { suit, rank })
}

/// N distinct cards drawn from the 40-card deck.
pub fn unique_cards(count: usize) -> impl Strategy<Value = Vec<Card>> {
    Just(full_deck())
        .prop_shuffle()
        .prop_map(move |deck| deck.into_iter().take(count).collect())
}

/// A three-card hand.
pub fn dealt_hand() -> impl Strategy<Value = Vec<Card>> {
    unique_cards(3)
}

pub fn side_outcome() -> impl Strategy<Value = SideOutcome> {
    prop_oneof![
        Just(SideOutcome::Won(Side::Mano)),
        Just(SideOutcome::Won(Side::Pie)),
        Just(SideOutcome::Parda),
    ]
}

/// One complete round on a table of `seats` seats, played from seat 0.
pub fn round_plays(seats: u8) -> impl Strategy<Value = Vec<(u8, Card)>> {
    unique_cards(seats as usize).prop_map(|cards| {
        cards
            .into_iter()
            .enumerate()
            .map(|(i, c)| (i as u8, c))
            .collect()
    })
}
