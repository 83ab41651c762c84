//! Core card-related types for the 40-card Spanish deck.

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Espada,
    Basto,
    Oro,
    Copa,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Espada, Suit::Basto, Suit::Oro, Suit::Copa];
}

/// Face ranks present in the deck (8 and 9 are removed).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rank {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Ten,
    Eleven,
    Twelve,
}

impl Rank {
    pub const ALL: [Rank; 10] = [
        Rank::One,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Ten,
        Rank::Eleven,
        Rank::Twelve,
    ];

    /// Printed face value.
    pub const fn face(self) -> u8 {
        match self {
            Rank::One => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Ten => 10,
            Rank::Eleven => 11,
            Rank::Twelve => 12,
        }
    }

    pub const fn from_face(face: u8) -> Option<Rank> {
        match face {
            1 => Some(Rank::One),
            2 => Some(Rank::Two),
            3 => Some(Rank::Three),
            4 => Some(Rank::Four),
            5 => Some(Rank::Five),
            6 => Some(Rank::Six),
            7 => Some(Rank::Seven),
            10 => Some(Rank::Ten),
            11 => Some(Rank::Eleven),
            12 => Some(Rank::Twelve),
            _ => None,
        }
    }
}

/// Wire shape is `{"suit": "E", "rank": "1"}`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }
}

// Note: Ord on Card is only for stable sorting (suit, then face).
// Use `cards_logic::trick_rank` for anything that decides a round.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.suit.cmp(&other.suit) {
            std::cmp::Ordering::Equal => self.rank.cmp(&other.rank),
            ord => ord,
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank.face(), self.suit.symbol())
    }
}
