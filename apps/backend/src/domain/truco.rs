//! Truco: escalation of the stakes of the hand itself.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::state::{require_chant_turn, Hand, HandStatus, Seat, Side};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum TrucoLevel {
    #[default]
    NoCantado,
    Truco,
    ReTruco,
    ValeCuatro,
}

impl TrucoLevel {
    pub const fn as_u8(self) -> u8 {
        match self {
            TrucoLevel::NoCantado => 0,
            TrucoLevel::Truco => 1,
            TrucoLevel::ReTruco => 2,
            TrucoLevel::ValeCuatro => 3,
        }
    }

    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(TrucoLevel::NoCantado),
            1 => Some(TrucoLevel::Truco),
            2 => Some(TrucoLevel::ReTruco),
            3 => Some(TrucoLevel::ValeCuatro),
            _ => None,
        }
    }

    pub const fn next(self) -> Option<Self> {
        Self::from_u8(self.as_u8() + 1)
    }

    pub const fn prev(self) -> Option<Self> {
        match self.as_u8() {
            0 => None,
            n => Self::from_u8(n - 1),
        }
    }

    /// Points the hand is worth once this level is accepted.
    pub const fn points(self) -> u16 {
        self.as_u8() as u16 + 1
    }
}

impl Serialize for TrucoLevel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for TrucoLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        TrucoLevel::from_u8(value)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid truco level: {value}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrucoState {
    /// Last accepted level; decides what the hand is worth.
    pub accepted: TrucoLevel,
    /// Level called and not yet answered.
    pub pending: Option<TrucoLevel>,
    /// Seat of the unanswered call (or of the last call once answered).
    pub chanter: Option<Seat>,
    /// Side that accepted the last raise; only it may raise again.
    pub holder: Option<Side>,
    /// Set when a call was refused; the hand ended on it.
    pub declined: bool,
}

impl TrucoState {
    /// Highest level called so far, answered or not.
    pub fn status(&self) -> TrucoLevel {
        self.pending.unwrap_or(self.accepted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrucoResponse {
    Accepted(TrucoLevel),
    Raised(TrucoLevel),
    Declined,
}

pub fn chant_truco(hand: &mut Hand, seat: Seat, level: TrucoLevel) -> Result<(), DomainError> {
    if hand.status != HandStatus::InProgress {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Truco can only be called during trick play",
        ));
    }
    require_chant_turn(hand, seat)?;
    if hand.truco.accepted.next() != Some(level) {
        return Err(DomainError::validation(
            ValidationKind::TrucoLadder,
            "Invalid truco level",
        ));
    }
    if let Some(holder) = hand.truco.holder {
        if holder != hand.side_of(seat) {
            return Err(DomainError::validation(
                ValidationKind::TrucoHolder,
                "Only the side that accepted can raise",
            ));
        }
    }

    hand.truco.pending = Some(level);
    hand.truco.chanter = Some(seat);
    hand.status = HandStatus::Locked;
    hand.chant_turn = Some(hand.next_seat(seat));
    Ok(())
}

/// Answer relative to the pending level: equal accepts, one above raises,
/// one below declines and ends the hand.
pub fn response_to_truco(
    hand: &mut Hand,
    seat: Seat,
    level: TrucoLevel,
) -> Result<TrucoResponse, DomainError> {
    let (HandStatus::Locked, Some(pending), Some(chanter)) =
        (hand.status, hand.truco.pending, hand.truco.chanter)
    else {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "There is no truco call to answer",
        ));
    };
    require_chant_turn(hand, seat)?;

    if level == pending {
        hand.truco.accepted = pending;
        hand.truco.pending = None;
        hand.truco.holder = Some(hand.side_of(seat));
        hand.status = HandStatus::InProgress;
        hand.chant_turn = hand.player_turn;
        return Ok(TrucoResponse::Accepted(pending));
    }

    if Some(level) == pending.next() {
        hand.truco.pending = Some(level);
        hand.truco.chanter = Some(seat);
        hand.chant_turn = Some(hand.next_seat(seat));
        return Ok(TrucoResponse::Raised(level));
    }

    if Some(level) == pending.prev() {
        hand.truco.pending = None;
        hand.truco.declined = true;
        hand.winner = Some(chanter);
        hand.status = HandStatus::Finished;
        hand.player_turn = None;
        hand.chant_turn = None;
        return Ok(TrucoResponse::Declined);
    }

    Err(DomainError::validation(
        ValidationKind::TrucoLadder,
        "Invalid truco level",
    ))
}
