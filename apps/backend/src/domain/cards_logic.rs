//! Card orderings used by the game: trick rank and Envido pip value.

use super::cards_types::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

/// Points added when two Envido cards share a suit.
pub const ENVIDO_PAIR_BONUS: u8 = 20;

/// Trick strength, higher wins. 0 (any 4) ..= 13 (1 of Espada).
///
/// Ties are possible across suits (e.g. every 3 ranks 9); a tie on the
/// top rank of a round is a parda.
pub const fn trick_rank(card: Card) -> u8 {
    match (card.rank, card.suit) {
        (Rank::One, Suit::Espada) => 13,
        (Rank::One, Suit::Basto) => 12,
        (Rank::Seven, Suit::Espada) => 11,
        (Rank::Seven, Suit::Oro) => 10,
        (Rank::Three, _) => 9,
        (Rank::Two, _) => 8,
        (Rank::One, _) => 7,
        (Rank::Twelve, _) => 6,
        (Rank::Eleven, _) => 5,
        (Rank::Ten, _) => 4,
        (Rank::Seven, _) => 3,
        (Rank::Six, _) => 2,
        (Rank::Five, _) => 1,
        (Rank::Four, _) => 0,
    }
}

/// True if `a` strictly beats `b` in a round.
pub const fn card_beats(a: Card, b: Card) -> bool {
    trick_rank(a) > trick_rank(b)
}

/// Face ranks 1..=7 count their numeral; 10, 11 and 12 count zero.
pub const fn envido_pip_value(card: Card) -> u8 {
    match card.rank {
        Rank::Ten | Rank::Eleven | Rank::Twelve => 0,
        r => r.face(),
    }
}

/// Score of a revealed Envido subset.
///
/// One card scores its pip. Two cards of the same suit score both pips plus
/// 20; two cards of different suits only count the higher pip.
pub fn envido_score(cards: &[Card]) -> Result<u8, DomainError> {
    match cards {
        [single] => Ok(envido_pip_value(*single)),
        [a, b] if a == b => Err(DomainError::validation(
            ValidationKind::EnvidoCards,
            "Envido cards must be distinct",
        )),
        [a, b] if a.suit == b.suit => {
            Ok(ENVIDO_PAIR_BONUS + envido_pip_value(*a) + envido_pip_value(*b))
        }
        [a, b] => Ok(envido_pip_value(*a).max(envido_pip_value(*b))),
        _ => Err(DomainError::validation(
            ValidationKind::EnvidoCards,
            "Envido is shown with one or two cards",
        )),
    }
}

/// Best Envido a hand can show.
pub fn best_envido(hand: &[Card]) -> u8 {
    let singles = hand.iter().map(|c| envido_pip_value(*c));
    let pairs = hand.iter().enumerate().flat_map(|(i, a)| {
        hand[i + 1..]
            .iter()
            .filter(move |b| b.suit == a.suit)
            .map(move |b| ENVIDO_PAIR_BONUS + envido_pip_value(*a) + envido_pip_value(*b))
    });
    singles.chain(pairs).max().unwrap_or(0)
}
