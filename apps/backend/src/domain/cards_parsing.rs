//! Card parsing from string representations (e.g., "1E", "12O").

use std::str::FromStr;

use super::cards_types::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

impl FromStr for Suit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "E" => Ok(Suit::Espada),
            "B" => Ok(Suit::Basto),
            "O" => Ok(Suit::Oro),
            "C" => Ok(Suit::Copa),
            _ => Err(DomainError::validation(
                ValidationKind::ParseCard,
                format!("Invalid suit: {s}"),
            )),
        }
    }
}

impl FromStr for Rank {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u8>()
            .ok()
            .and_then(Rank::from_face)
            .ok_or_else(|| {
                DomainError::validation(ValidationKind::ParseCard, format!("Invalid rank: {s}"))
            })
    }
}

/// Compact token: face value followed by the suit symbol ("7O", "12C").
impl FromStr for Card {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !(2..=3).contains(&s.len()) || !s.is_ascii() {
            return Err(DomainError::validation(
                ValidationKind::ParseCard,
                format!("Parse card: {s}"),
            ));
        }
        let (rank, suit) = s.split_at(s.len() - 1);
        Ok(Card {
            suit: suit.parse()?,
            rank: rank.parse()?,
        })
    }
}

/// Non-panicking helper to parse card tokens into Card instances.
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}
