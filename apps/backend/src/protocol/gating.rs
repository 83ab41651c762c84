//! Action gating derived from the mirror alone.
//!
//! Every predicate is a pure function of the current mirror, so a client
//! that just received a full snapshot computes the same answers as one that
//! followed every push.

use crate::domain::cards_logic::envido_score;
use crate::domain::snapshot::HandSnapshot;
use crate::domain::{Card, EnvidoStatus, HandStatus, PlayerId, TrucoLevel};
use crate::protocol::mirror::Mirror;

fn hand_and_me(mirror: &Mirror) -> Option<(&HandSnapshot, PlayerId)> {
    Some((mirror.hand.as_ref()?, mirror.me()?))
}

pub fn is_player_turn(mirror: &Mirror) -> bool {
    hand_and_me(mirror).is_some_and(|(hand, me)| hand.player_turn == Some(me))
}

pub fn is_chant_turn(mirror: &Mirror) -> bool {
    hand_and_me(mirror).is_some_and(|(hand, me)| hand.chant_turn == Some(me))
}

pub fn is_hand_finished(mirror: &Mirror) -> bool {
    mirror
        .hand
        .as_ref()
        .is_some_and(|hand| hand.status == HandStatus::Finished)
}

/// The dealer of a fresh hand, or the next dealer once the hand is over.
pub fn can_deal(mirror: &Mirror) -> bool {
    let Some((hand, me)) = hand_and_me(mirror) else {
        return false;
    };
    match hand.status {
        HandStatus::NotStarted => hand.player_dealer == Some(me),
        HandStatus::Finished if mirror.match_winner.is_none() => {
            next_dealer(hand) == Some(me)
        }
        _ => false,
    }
}

fn next_dealer(hand: &HandSnapshot) -> Option<PlayerId> {
    let dealer = hand.player_dealer?;
    let seat = hand.seat_of(dealer)?.seat as usize;
    let seats = hand.players.len();
    hand.players.get((seat + 1) % seats).map(|p| p.id)
}

pub fn card_already_played(mirror: &Mirror, card: Card) -> bool {
    hand_and_me(mirror).is_some_and(|(hand, me)| {
        hand.cards_played
            .get(&me)
            .is_some_and(|played| played.contains(&card))
    })
}

/// A card button is disabled unless playing it right now would be accepted.
pub fn is_card_disabled(mirror: &Mirror, card: Card) -> bool {
    let Some((hand, _)) = hand_and_me(mirror) else {
        return true;
    };
    hand.status != HandStatus::InProgress
        || !is_player_turn(mirror)
        || !hand.cards_dealed.contains(&card)
        || card_already_played(mirror, card)
}

/// Envido value of the cards currently selected, `None` for an invalid selection.
pub fn envido_selection_value(selected: &[Card]) -> Option<u8> {
    envido_score(selected).ok()
}

pub fn can_chant_envido(mirror: &Mirror) -> bool {
    let Some((hand, _)) = hand_and_me(mirror) else {
        return false;
    };
    let window_open =
        matches!(hand.rounds.as_slice(), [only] if only.winner.is_none() && !only.parda);
    hand.status == HandStatus::InProgress
        && hand.envido.status == EnvidoStatus::NotStarted
        && window_open
        && is_chant_turn(mirror)
}

pub fn can_respond_envido(mirror: &Mirror) -> bool {
    mirror.hand.as_ref().is_some_and(|hand| {
        hand.status == HandStatus::Envido && hand.envido.status == EnvidoStatus::Chanting
    }) && is_chant_turn(mirror)
}

pub fn can_play_envido(mirror: &Mirror) -> bool {
    hand_and_me(mirror).is_some_and(|(hand, me)| {
        hand.status == HandStatus::Envido
            && hand.envido.status == EnvidoStatus::Accepted
            && !hand.envido.cards_played.contains_key(&me)
    }) && is_chant_turn(mirror)
}

pub fn can_chant_truco(mirror: &Mirror, level: TrucoLevel) -> bool {
    let Some((hand, me)) = hand_and_me(mirror) else {
        return false;
    };
    let my_side = hand.seat_of(me).map(|s| s.side);
    let holder_ok = hand.truco.holder.is_none() || hand.truco.holder == my_side;
    hand.status == HandStatus::InProgress
        && hand.truco.accepted.next() == Some(level)
        && holder_ok
        && is_chant_turn(mirror)
}

pub fn can_respond_truco(mirror: &Mirror) -> bool {
    mirror
        .hand
        .as_ref()
        .is_some_and(|hand| hand.status == HandStatus::Locked)
        && is_chant_turn(mirror)
}
