// apps/backend/src/domain/game_transition.rs

use crate::domain::envido::{EnvidoLevel, EnvidoState, EnvidoStatus};
use crate::domain::rounds::RoundOutcome;
use crate::domain::state::{Hand, HandStatus, Seat};
use crate::domain::truco::TrucoLevel;

/// The parts of a match that announcements are derived from.
#[derive(Debug, Clone, Copy)]
pub struct MatchLifecycleView<'a> {
    pub hand: Option<&'a Hand>,
    pub winner: Option<Seat>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandTransition {
    /// Edge-triggered: a new hand exists and waits for its dealer.
    HandReady { number: u32, dealer: Seat },

    /// Edge-triggered: NotStarted -> dealt.
    HandDealt { number: u32 },

    /// A round got its outcome.
    RoundResolved { index: usize, outcome: RoundOutcome },

    /// A new envido call (first call or raise).
    EnvidoChanted { seat: Seat, level: EnvidoLevel },
    EnvidoAccepted { points: u16 },
    EnvidoDeclined { winner: Option<Seat>, points: u16 },
    /// Every seat showed its cards and the bet is settled.
    EnvidoResolved { winner: Option<Seat>, points: u16 },

    /// A new truco call (first call or raise).
    TrucoChanted { seat: Seat, level: TrucoLevel },
    TrucoAccepted { level: TrucoLevel },
    TrucoDeclined { winner: Option<Seat> },

    /// Edge-triggered: hand -> Finished.
    HandFinished { winner: Option<Seat> },

    /// Edge-triggered: the match got its winner.
    MatchFinished { winner: Seat },
}

/// Derive domain transitions from before/after match state.
pub fn derive_hand_transitions(
    before: &MatchLifecycleView<'_>,
    after: &MatchLifecycleView<'_>,
) -> Vec<HandTransition> {
    let mut transitions = Vec::new();

    if let Some(hand) = after.hand {
        // Only compare against the same hand; a replaced hand starts from scratch.
        let prev = before.hand.filter(|h| h.number == hand.number);

        if prev.is_none() {
            transitions.push(HandTransition::HandReady {
                number: hand.number,
                dealer: hand.dealer,
            });
        }

        let prev_status = prev.map_or(HandStatus::NotStarted, |h| h.status);
        if prev_status == HandStatus::NotStarted && hand.status != HandStatus::NotStarted {
            transitions.push(HandTransition::HandDealt {
                number: hand.number,
            });
        }

        let resolved_before = prev.map_or(0, Hand::completed_rounds);
        for (index, round) in hand.rounds.iter().enumerate().skip(resolved_before) {
            if let Some(outcome) = round.outcome {
                transitions.push(HandTransition::RoundResolved { index, outcome });
            }
        }

        let empty = EnvidoState::default();
        envido_transitions(
            prev.map_or(&empty, |h| &h.envido),
            &hand.envido,
            &mut transitions,
        );
        truco_transitions(prev, hand, &mut transitions);

        if prev_status != HandStatus::Finished && hand.status == HandStatus::Finished {
            transitions.push(HandTransition::HandFinished {
                winner: hand.winner,
            });
        }
    }

    if let (None, Some(winner)) = (before.winner, after.winner) {
        transitions.push(HandTransition::MatchFinished { winner });
    }

    transitions
}

fn envido_transitions(before: &EnvidoState, after: &EnvidoState, out: &mut Vec<HandTransition>) {
    if after.chanted.len() > before.chanted.len() {
        if let (Some(seat), Some(level)) = (after.chanter, after.chanted.last()) {
            out.push(HandTransition::EnvidoChanted {
                seat,
                level: *level,
            });
        }
    }
    if before.status == after.status {
        return;
    }
    match after.status {
        EnvidoStatus::Accepted => out.push(HandTransition::EnvidoAccepted {
            points: after.points,
        }),
        EnvidoStatus::Declined => out.push(HandTransition::EnvidoDeclined {
            winner: after.winner,
            points: after.points,
        }),
        EnvidoStatus::Finished => out.push(HandTransition::EnvidoResolved {
            winner: after.winner,
            points: after.points,
        }),
        EnvidoStatus::NotStarted | EnvidoStatus::Chanting => {}
    }
}

fn truco_transitions(before: Option<&Hand>, after: &Hand, out: &mut Vec<HandTransition>) {
    let prev_pending = before.and_then(|h| h.truco.pending);
    let prev_accepted = before.map_or(TrucoLevel::NoCantado, |h| h.truco.accepted);
    let prev_declined = before.is_some_and(|h| h.truco.declined);

    if let (Some(level), Some(seat)) = (after.truco.pending, after.truco.chanter) {
        if prev_pending != Some(level) {
            out.push(HandTransition::TrucoChanted { seat, level });
        }
    }
    if after.truco.accepted > prev_accepted {
        out.push(HandTransition::TrucoAccepted {
            level: after.truco.accepted,
        });
    }
    if after.truco.declined && !prev_declined {
        out.push(HandTransition::TrucoDeclined {
            winner: after.winner,
        });
    }
}
