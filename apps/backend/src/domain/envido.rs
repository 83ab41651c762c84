//! Envido: the points side-bet negotiated before the second round.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::cards_logic::envido_score;
use crate::domain::state::{require_chant_turn, Hand, HandStatus, Seat, Side};
use crate::domain::Card;
use crate::errors::domain::{DomainError, ValidationKind};

/// Envido calls, in escalation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnvidoLevel {
    Envido,
    RealEnvido,
    FaltaEnvido,
}

impl EnvidoLevel {
    /// Points the call is worth; Falta Envido is worth what the leader still needs.
    pub const fn points(self, falta_points: u16) -> u16 {
        match self {
            EnvidoLevel::Envido => 2,
            EnvidoLevel::RealEnvido => 3,
            EnvidoLevel::FaltaEnvido => falta_points,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnvidoStatus {
    #[default]
    NotStarted,
    Chanting,
    Accepted,
    Declined,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnvidoState {
    pub status: EnvidoStatus,
    /// Calls made so far, strictly increasing.
    pub chanted: Vec<EnvidoLevel>,
    /// Seat of the last call.
    pub chanter: Option<Seat>,
    /// Cards shown by each seat after acceptance.
    pub revealed: BTreeMap<Seat, Vec<Card>>,
    pub scores: BTreeMap<Seat, u8>,
    /// Points at stake (accepted) or awarded (declined, finished).
    pub points: u16,
    pub winner: Option<Seat>,
}

impl EnvidoState {
    pub fn is_resolved(&self) -> bool {
        matches!(self.status, EnvidoStatus::Declined | EnvidoStatus::Finished)
    }

    fn last_call(&self) -> Option<EnvidoLevel> {
        self.chanted.last().copied()
    }
}

/// What a `responseToEnvido` turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvidoResponse {
    Accepted,
    Raised(EnvidoLevel),
}

/// Points for an accepted ladder: the sum of the calls, or the Falta value
/// alone when Falta Envido was called.
pub fn accepted_points(chanted: &[EnvidoLevel], falta_points: u16) -> u16 {
    if chanted.contains(&EnvidoLevel::FaltaEnvido) {
        return falta_points;
    }
    chanted.iter().map(|l| l.points(falta_points)).sum()
}

/// Points for declining the last call: what was on the table before it,
/// or 1 when the very first call is declined.
pub fn declined_points(chanted: &[EnvidoLevel], falta_points: u16) -> u16 {
    match chanted.split_last() {
        Some((_, [])) | None => 1,
        Some((_, before)) => accepted_points(before, falta_points),
    }
}

pub fn chant_envido(hand: &mut Hand, seat: Seat, level: EnvidoLevel) -> Result<(), DomainError> {
    if hand.status != HandStatus::InProgress {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Envido can only be called during trick play",
        ));
    }
    if hand.envido.status != EnvidoStatus::NotStarted {
        return Err(DomainError::validation(
            ValidationKind::EnvidoClosed,
            "Envido has already been called this hand",
        ));
    }
    if !hand.envido_window_open() {
        return Err(DomainError::validation(
            ValidationKind::EnvidoClosed,
            "Envido cannot be called after the first round",
        ));
    }
    require_chant_turn(hand, seat)?;

    hand.envido.chanted.push(level);
    hand.envido.chanter = Some(seat);
    hand.envido.status = EnvidoStatus::Chanting;
    hand.status = HandStatus::Envido;
    hand.chant_turn = Some(hand.next_seat(seat));
    Ok(())
}

fn require_pending_call(hand: &Hand, seat: Seat) -> Result<EnvidoLevel, DomainError> {
    let pending = match (hand.status, hand.envido.status, hand.envido.last_call()) {
        (HandStatus::Envido, EnvidoStatus::Chanting, Some(level)) => level,
        _ => {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "There is no envido call to answer",
            ))
        }
    };
    require_chant_turn(hand, seat)?;
    Ok(pending)
}

/// Answer a call with a level: the same level accepts, a higher one raises.
pub fn response_to_envido(
    hand: &mut Hand,
    seat: Seat,
    level: EnvidoLevel,
) -> Result<EnvidoResponse, DomainError> {
    let pending = require_pending_call(hand, seat)?;

    if level == pending {
        accept_envido(hand, seat)?;
        return Ok(EnvidoResponse::Accepted);
    }
    if level < pending {
        return Err(DomainError::validation(
            ValidationKind::EnvidoLadder,
            "Cannot call a lower envido",
        ));
    }

    hand.envido.chanted.push(level);
    hand.envido.chanter = Some(seat);
    hand.chant_turn = Some(hand.next_seat(seat));
    Ok(EnvidoResponse::Raised(level))
}

pub fn accept_envido(hand: &mut Hand, seat: Seat) -> Result<(), DomainError> {
    require_pending_call(hand, seat)?;

    hand.envido.points = accepted_points(&hand.envido.chanted, hand.falta_points);
    hand.envido.status = EnvidoStatus::Accepted;
    // Cards are shown in acting order starting from mano.
    hand.chant_turn = Some(hand.mano);
    Ok(())
}

pub fn decline_envido(hand: &mut Hand, seat: Seat) -> Result<(), DomainError> {
    require_pending_call(hand, seat)?;

    hand.envido.points = declined_points(&hand.envido.chanted, hand.falta_points);
    hand.envido.winner = hand.envido.chanter;
    hand.envido.status = EnvidoStatus::Declined;
    hand.status = HandStatus::InProgress;
    hand.chant_turn = hand.player_turn;
    Ok(())
}

/// Show one or two of the seat's dealt cards. The last seat to show settles the bet.
pub fn play_envido(hand: &mut Hand, seat: Seat, cards: &[Card]) -> Result<(), DomainError> {
    if hand.status != HandStatus::Envido || hand.envido.status != EnvidoStatus::Accepted {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Envido has not been accepted",
        ));
    }
    require_chant_turn(hand, seat)?;
    if hand.envido.revealed.contains_key(&seat) {
        return Err(DomainError::validation(
            ValidationKind::EnvidoCards,
            "Envido already shown",
        ));
    }
    if let Some(card) = cards.iter().find(|c| !hand.owns(seat, **c)) {
        return Err(DomainError::validation(
            ValidationKind::CardNotInHand,
            format!("Card not in hand: {card}"),
        ));
    }
    let score = envido_score(cards)?;

    hand.envido.revealed.insert(seat, cards.to_vec());
    hand.envido.scores.insert(seat, score);

    if hand.envido.revealed.len() < hand.seats as usize {
        hand.chant_turn = Some(hand.next_seat(seat));
        return Ok(());
    }

    let winner = envido_winner(hand);
    hand.envido.winner = winner;
    hand.envido.status = EnvidoStatus::Finished;
    hand.status = HandStatus::InProgress;
    hand.chant_turn = hand.player_turn;
    Ok(())
}

/// Best score per side decides; mano's side keeps ties. Inside the winning
/// side the best seat closest to mano takes the points.
fn envido_winner(hand: &Hand) -> Option<Seat> {
    let best_of = |side: Side| {
        hand.seats_from_mano()
            .filter(|s| hand.side_of(*s) == side)
            .filter_map(|s| hand.envido.scores.get(&s).map(|score| (s, *score)))
            .fold(None, |best: Option<(Seat, u8)>, (s, score)| match best {
                Some((_, b)) if b >= score => best,
                _ => Some((s, score)),
            })
    };

    match (best_of(Side::Mano), best_of(Side::Pie)) {
        (Some((m, ms)), Some((_, ps))) if ms >= ps => Some(m),
        (_, Some((p, _))) => Some(p),
        (Some((m, _)), None) => Some(m),
        (None, None) => None,
    }
}
