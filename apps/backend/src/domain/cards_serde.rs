//! Serialization and deserialization for card types

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::cards_types::{Rank, Suit};

impl Suit {
    /// One-letter wire symbol.
    pub const fn symbol(self) -> &'static str {
        match self {
            Suit::Espada => "E",
            Suit::Basto => "B",
            Suit::Oro => "O",
            Suit::Copa => "C",
        }
    }
}

impl Rank {
    /// Wire string ("1".."7", "10", "11", "12").
    pub const fn wire(self) -> &'static str {
        match self {
            Rank::One => "1",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Ten => "10",
            Rank::Eleven => "11",
            Rank::Twelve => "12",
        }
    }
}

impl Serialize for Suit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.symbol())
    }
}

impl<'de> Deserialize<'de> for Suit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Suit>()
            .map_err(|_| serde::de::Error::custom(format!("Invalid suit: {s}")))
    }
}

impl Serialize for Rank {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.wire())
    }
}

impl<'de> Deserialize<'de> for Rank {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Rank>()
            .map_err(|_| serde::de::Error::custom(format!("Invalid rank: {s}")))
    }
}
