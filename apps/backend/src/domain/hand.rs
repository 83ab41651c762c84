//! Hand state machine: dealing, card play and dispatch to the two negotiations.
//!
//! Every operation validates against the current state before touching it, so
//! a rejected action leaves the hand exactly as it was.

use tracing::debug;

use crate::domain::dealing::deal_hands;
use crate::domain::envido::{self, EnvidoLevel};
use crate::domain::rounds::{hand_winner, resolve_round, RoundOutcome, SideOutcome};
use crate::domain::state::{
    require_player_turn, require_status, Hand, HandStatus, Round, Seat, Side,
};
use crate::domain::truco::{self, TrucoLevel};
use crate::domain::Card;
use crate::errors::domain::{Capability, DomainError, ValidationKind};

/// Every action a seated player can take on a hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandAction {
    DealCards,
    PlayCard(Card),
    ChantEnvido(EnvidoLevel),
    ResponseToEnvido(EnvidoLevel),
    AcceptEnvido,
    DeclineEnvido,
    PlayEnvido(Vec<Card>),
    ChantTruco(TrucoLevel),
    ResponseToTruco(TrucoLevel),
    ChantFlor,
}

/// Result of playing a card, describing what state changes occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayCardResult {
    /// Outcome of the round if this card completed it.
    pub round_outcome: Option<RoundOutcome>,
    /// Hand winner if the hand ended with this card.
    pub hand_winner: Option<Seat>,
}

pub fn apply_action(
    hand: &mut Hand,
    seat: Seat,
    action: HandAction,
    deal_seed: u64,
) -> Result<(), DomainError> {
    debug!(seat, ?action, status = ?hand.status, "applying hand action");
    match action {
        HandAction::DealCards => deal_cards(hand, seat, deal_seed),
        HandAction::PlayCard(card) => play_card(hand, seat, card).map(|_| ()),
        HandAction::ChantEnvido(level) => envido::chant_envido(hand, seat, level),
        HandAction::ResponseToEnvido(level) => {
            envido::response_to_envido(hand, seat, level).map(|_| ())
        }
        HandAction::AcceptEnvido => envido::accept_envido(hand, seat),
        HandAction::DeclineEnvido => envido::decline_envido(hand, seat),
        HandAction::PlayEnvido(cards) => envido::play_envido(hand, seat, &cards),
        HandAction::ChantTruco(level) => truco::chant_truco(hand, seat, level),
        HandAction::ResponseToTruco(level) => {
            truco::response_to_truco(hand, seat, level).map(|_| ())
        }
        HandAction::ChantFlor => chant_flor(hand, seat),
    }
}

/// Deal three cards per seat. Only the dealer, only before the hand starts.
pub fn deal_cards(hand: &mut Hand, seat: Seat, seed: u64) -> Result<(), DomainError> {
    require_status(hand, HandStatus::NotStarted, "Cards have already been dealt")?;
    if seat != hand.dealer {
        return Err(DomainError::validation(
            ValidationKind::NotDealer,
            "Only the dealer can deal",
        ));
    }

    let dealt = deal_hands(hand.seats as usize, seed)?;

    hand.dealt = dealt;
    hand.mano = hand.next_seat(hand.dealer);
    hand.player_turn = Some(hand.mano);
    hand.chant_turn = Some(hand.mano);
    hand.rounds = vec![Round::default()];
    hand.status = HandStatus::InProgress;
    Ok(())
}

/// Play a card into the open round, resolving the round and the hand when complete.
pub fn play_card(hand: &mut Hand, seat: Seat, card: Card) -> Result<PlayCardResult, DomainError> {
    match hand.status {
        HandStatus::InProgress => {}
        HandStatus::Locked => {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Answer the truco call first",
            ))
        }
        HandStatus::Envido => {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Settle the envido first",
            ))
        }
        HandStatus::NotStarted | HandStatus::Finished => {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Hand is not being played",
            ))
        }
    }
    require_player_turn(hand, seat)?;
    if !hand.owns(seat, card) {
        return Err(DomainError::validation(
            ValidationKind::CardNotInHand,
            "Card not in hand",
        ));
    }
    if hand.has_played(seat, card) {
        return Err(DomainError::validation(
            ValidationKind::CardAlreadyPlayed,
            "Card already played",
        ));
    }
    let seats = hand.seats as usize;
    let Some(round) = hand.rounds.last_mut().filter(|r| r.outcome.is_none()) else {
        return Err(DomainError::validation_other(
            "Invariant violated: an open round must exist while the hand is in progress",
        ));
    };

    round.plays.push((seat, card));
    let mut result = PlayCardResult {
        round_outcome: None,
        hand_winner: None,
    };

    if round.plays.len() < seats {
        let next = hand.next_seat(seat);
        hand.player_turn = Some(next);
        hand.chant_turn = Some(next);
        return Ok(result);
    }

    let outcome = resolve_round(&round.plays).ok_or_else(|| {
        DomainError::validation_other("Invariant violated: completed round has no plays")
    })?;
    round.outcome = Some(outcome);
    result.round_outcome = Some(outcome);

    let side_outcomes: Vec<SideOutcome> = hand
        .rounds
        .iter()
        .filter_map(|r| r.outcome)
        .map(|o| match o {
            RoundOutcome::Won(s) => SideOutcome::Won(hand.side_of(s)),
            RoundOutcome::Parda => SideOutcome::Parda,
        })
        .collect();

    if let Some(side) = hand_winner(&side_outcomes) {
        let winner = winning_seat(hand, side);
        hand.winner = Some(winner);
        hand.status = HandStatus::Finished;
        hand.player_turn = None;
        hand.chant_turn = None;
        result.hand_winner = Some(winner);
        return Ok(result);
    }

    // Round winner leads the next round; after a parda mano leads.
    let leader = match outcome {
        RoundOutcome::Won(s) => s,
        RoundOutcome::Parda => hand.mano,
    };
    hand.rounds.push(Round::default());
    hand.player_turn = Some(leader);
    hand.chant_turn = Some(leader);
    Ok(result)
}

/// Seat credited with a side's hand win: its first round winner, else the
/// side's first seat in acting order.
pub fn winning_seat(hand: &Hand, side: Side) -> Seat {
    hand.rounds
        .iter()
        .filter_map(|r| match r.outcome {
            Some(RoundOutcome::Won(s)) if hand.side_of(s) == side => Some(s),
            _ => None,
        })
        .next()
        .unwrap_or_else(|| match side {
            Side::Mano => hand.mano,
            Side::Pie => hand.next_seat(hand.mano),
        })
}

/// Flor is recognised on the wire but not played.
pub fn chant_flor(_hand: &mut Hand, _seat: Seat) -> Result<(), DomainError> {
    Err(DomainError::unimplemented(
        Capability::Flor,
        "Flor is not available",
    ))
}
