//! Match ledger: what a finished hand pays and when the match is over.

use std::collections::BTreeMap;

use crate::domain::state::{Hand, HandStatus, Seat};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwardReason {
    Truco,
    Envido,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandAward {
    pub seat: Seat,
    pub points: u16,
    pub reason: AwardReason,
}

/// Points earned in a finished hand. Trick points follow the last accepted
/// truco level (1 when never accepted); envido points go to its winner.
pub fn hand_awards(hand: &Hand) -> Result<Vec<HandAward>, DomainError> {
    if hand.status != HandStatus::Finished {
        return Err(DomainError::validation_other(
            "Invariant violated: awards requested for an unfinished hand",
        ));
    }
    let winner = hand.winner.ok_or_else(|| {
        DomainError::validation_other("Invariant violated: finished hand has no winner")
    })?;

    let mut awards = Vec::with_capacity(2);
    if hand.envido.is_resolved() {
        if let Some(seat) = hand.envido.winner {
            awards.push(HandAward {
                seat,
                points: hand.envido.points,
                reason: AwardReason::Envido,
            });
        }
    }
    awards.push(HandAward {
        seat: winner,
        points: hand.truco.accepted.points(),
        reason: AwardReason::Truco,
    });
    Ok(awards)
}

pub fn apply_awards(scores: &mut BTreeMap<Seat, u16>, awards: &[HandAward]) {
    for award in awards {
        let entry = scores.entry(award.seat).or_insert(0);
        *entry = entry.saturating_add(award.points);
    }
}

/// Seat that reached the target, highest score first, lowest seat on ties.
pub fn match_winner(scores: &BTreeMap<Seat, u16>, target: u16) -> Option<Seat> {
    scores
        .iter()
        .filter(|(_, points)| **points >= target)
        .fold(None, |best: Option<(Seat, u16)>, (seat, points)| match best {
            Some((_, b)) if b >= *points => best,
            _ => Some((*seat, *points)),
        })
        .map(|(seat, _)| seat)
}

/// What Falta Envido is worth: the points the leader still needs.
pub fn falta_points(scores: &BTreeMap<Seat, u16>, target: u16) -> u16 {
    let leader = scores.values().copied().max().unwrap_or(0);
    target.saturating_sub(leader).max(1)
}
