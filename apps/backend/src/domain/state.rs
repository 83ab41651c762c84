use serde::{Deserialize, Serialize};

use crate::domain::envido::EnvidoState;
use crate::domain::rounds::RoundOutcome;
use crate::domain::truco::TrucoState;
use crate::domain::Card;
use crate::errors::domain::{DomainError, ValidationKind};

/// Position at the table, 0-based in roster order.
pub type Seat = u8;

/// Hand lifecycle. `Envido` and `Locked` are sub-negotiations entered from
/// and returning to `InProgress`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HandStatus {
    #[default]
    NotStarted,
    InProgress,
    Envido,
    Locked,
    Finished,
}

/// The two teams of a hand. Mano's side is the team of the first seat to act.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Mano,
    Pie,
}

impl Side {
    pub const fn opposite(self) -> Side {
        match self {
            Side::Mano => Side::Pie,
            Side::Pie => Side::Mano,
        }
    }
}

/// One trick: plays in table order and, once every seat played, its outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Round {
    pub plays: Vec<(Seat, Card)>,
    pub outcome: Option<RoundOutcome>,
}

impl Round {
    pub fn card_of(&self, seat: Seat) -> Option<Card> {
        self.plays.iter().find(|(s, _)| *s == seat).map(|(_, c)| *c)
    }
}

/// Authoritative state of one deal-to-winner unit of play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    /// 1-based hand number within the match.
    pub number: u32,
    pub seats: u8,
    pub dealer: Seat,
    /// First seat to act; always the seat after the dealer.
    pub mano: Seat,
    /// Seat expected to play a card. `None` before the deal and after the hand ends.
    pub player_turn: Option<Seat>,
    /// Seat expected to chant or answer a chant.
    pub chant_turn: Option<Seat>,
    /// Three cards per seat, indexed by seat. Cards stay here after being played.
    pub dealt: Vec<Vec<Card>>,
    /// Rounds so far; the last one is open while the hand is being played.
    pub rounds: Vec<Round>,
    pub status: HandStatus,
    pub envido: EnvidoState,
    pub truco: TrucoState,
    pub winner: Option<Seat>,
    /// Value of Falta Envido for this hand, fixed from the match score at creation.
    pub falta_points: u16,
}

impl Hand {
    pub fn new(number: u32, seats: u8, dealer: Seat, falta_points: u16) -> Self {
        Self {
            number,
            seats,
            dealer,
            mano: next_seat(dealer, seats),
            player_turn: None,
            chant_turn: None,
            dealt: Vec::new(),
            rounds: Vec::new(),
            status: HandStatus::NotStarted,
            envido: EnvidoState::default(),
            truco: TrucoState::default(),
            winner: None,
            falta_points,
        }
    }

    /// Partners sit alternately, so the side follows parity relative to mano.
    pub fn side_of(&self, seat: Seat) -> Side {
        let offset = (seat as i16 - self.mano as i16).rem_euclid(self.seats.max(1) as i16);
        if offset % 2 == 0 {
            Side::Mano
        } else {
            Side::Pie
        }
    }

    pub fn next_seat(&self, seat: Seat) -> Seat {
        next_seat(seat, self.seats)
    }

    /// Seats in acting order starting from mano.
    pub fn seats_from_mano(&self) -> impl Iterator<Item = Seat> + '_ {
        (0..self.seats).map(move |n| seat_offset(self.mano, n as i16, self.seats))
    }

    pub fn is_finished(&self) -> bool {
        self.status == HandStatus::Finished
    }

    /// The round currently accepting cards.
    pub fn open_round(&self) -> Option<&Round> {
        self.rounds.last().filter(|r| r.outcome.is_none())
    }

    pub fn completed_rounds(&self) -> usize {
        self.rounds.iter().filter(|r| r.outcome.is_some()).count()
    }

    pub fn has_played(&self, seat: Seat, card: Card) -> bool {
        self.rounds
            .iter()
            .any(|r| r.plays.iter().any(|&(s, c)| s == seat && c == card))
    }

    pub fn owns(&self, seat: Seat, card: Card) -> bool {
        self.dealt
            .get(seat as usize)
            .is_some_and(|cards| cards.contains(&card))
    }

    pub fn cards_played_by(&self, seat: Seat) -> Vec<Card> {
        self.rounds.iter().filter_map(|r| r.card_of(seat)).collect()
    }

    pub fn remaining_cards(&self, seat: Seat) -> Vec<Card> {
        self.dealt
            .get(seat as usize)
            .map(|cards| {
                cards
                    .iter()
                    .copied()
                    .filter(|c| !self.has_played(seat, *c))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Envido may be called only while the first round is unresolved.
    pub fn envido_window_open(&self) -> bool {
        matches!(self.rounds.as_slice(), [only] if only.outcome.is_none())
    }
}

/// Seat math for a table of `seats` seats. Positive delta is the acting direction.
#[inline]
pub fn seat_offset(seat: Seat, delta: i16, seats: u8) -> Seat {
    let n = seats.max(1) as i16;
    ((seat as i16 + delta).rem_euclid(n)) as Seat
}

#[inline]
pub fn next_seat(seat: Seat, seats: u8) -> Seat {
    seat_offset(seat, 1, seats)
}

pub fn require_status(
    hand: &Hand,
    expected: HandStatus,
    detail: &'static str,
) -> Result<(), DomainError> {
    if hand.status != expected {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            detail,
        ));
    }
    Ok(())
}

pub fn require_player_turn(hand: &Hand, seat: Seat) -> Result<(), DomainError> {
    match hand.player_turn {
        Some(turn) if turn == seat => Ok(()),
        Some(_) => Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            "Out of turn",
        )),
        None => Err(DomainError::validation_other(
            "Invariant violated: player_turn must be set while cards are played",
        )),
    }
}

pub fn require_chant_turn(hand: &Hand, seat: Seat) -> Result<(), DomainError> {
    if hand.chant_turn != Some(seat) {
        return Err(DomainError::validation(
            ValidationKind::NotChantTurn,
            "Not your turn to chant",
        ));
    }
    Ok(())
}
