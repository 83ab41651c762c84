//! Per-viewer projections of a match, safe to send over the wire.
//!
//! Seats are identified by player id in every map so the shape does not
//! depend on table size or seat order. Only the viewer's own cards are
//! included; other seats appear as counts until they play or show them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::envido::{EnvidoLevel, EnvidoStatus};
use crate::domain::match_state::{MatchId, MatchState, PlayerId};
use crate::domain::rounds::RoundOutcome;
use crate::domain::state::{Hand, HandStatus, Seat, Side};
use crate::domain::truco::TrucoLevel;
use crate::domain::Card;

/// Public info about a single seat in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatPublic {
    pub seat: Seat,
    pub id: PlayerId,
    pub name: String,
    pub side: Side,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundPublic {
    pub cards_played: BTreeMap<PlayerId, Card>,
    pub winner: Option<PlayerId>,
    pub parda: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvidoPublic {
    pub chanted: Vec<EnvidoLevel>,
    pub chanter: Option<PlayerId>,
    pub points: u16,
    /// Cards shown after acceptance; public once shown.
    pub cards_played: BTreeMap<PlayerId, Vec<Card>>,
    pub winner: Option<PlayerId>,
    pub status: EnvidoStatus,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrucoPublic {
    pub accepted: TrucoLevel,
    pub pending: Option<TrucoLevel>,
    pub chanter: Option<PlayerId>,
    pub holder: Option<Side>,
}

/// Full hand state as one seat may see it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandSnapshot {
    pub id: MatchId,
    pub hand_no: u32,
    pub players: Vec<SeatPublic>,
    /// Mano: first to act this hand.
    pub player_hand: Option<PlayerId>,
    pub player_dealer: Option<PlayerId>,
    pub player_turn: Option<PlayerId>,
    pub chant_turn: Option<PlayerId>,
    pub cards_played: BTreeMap<PlayerId, Vec<Card>>,
    /// The viewer's three cards; empty for spectators and before the deal.
    pub cards_dealed: Vec<Card>,
    pub cards_remaining: BTreeMap<PlayerId, u8>,
    pub rounds: Vec<RoundPublic>,
    pub status: HandStatus,
    pub envido: EnvidoPublic,
    /// Highest truco level called so far, answered or not.
    pub truco_status: TrucoLevel,
    pub truco: TrucoPublic,
    pub winner: Option<PlayerId>,
}

impl HandSnapshot {
    pub fn seat_of(&self, player: PlayerId) -> Option<&SeatPublic> {
        self.players.iter().find(|p| p.id == player)
    }
}

/// Lobby entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub id: MatchId,
    pub name: String,
    pub current_players: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    pub score: BTreeMap<PlayerId, u16>,
    pub winner: Option<PlayerId>,
}

pub fn game_summary(state: &MatchState) -> GameSummary {
    GameSummary {
        id: state.id,
        name: state.name.clone(),
        current_players: state.roster.len(),
    }
}

pub fn score_snapshot(state: &MatchState) -> ScoreSnapshot {
    ScoreSnapshot {
        score: state
            .scores
            .iter()
            .filter_map(|(seat, points)| state.player_at(*seat).map(|p| (p.id, *points)))
            .collect(),
        winner: state
            .winner
            .and_then(|seat| state.player_at(seat))
            .map(|p| p.id),
    }
}

/// Build the hand as `viewer` may see it. `None` until the first hand exists.
pub fn hand_snapshot(state: &MatchState, viewer: Option<PlayerId>) -> Option<HandSnapshot> {
    let hand = state.hand.as_ref()?;
    let id_of = |seat: Seat| state.player_at(seat).map(|p| p.id);
    let viewer_seat = viewer.and_then(|v| state.find_seat(v));

    let players = state
        .roster
        .iter()
        .enumerate()
        .map(|(i, p)| SeatPublic {
            seat: i as Seat,
            id: p.id,
            name: p.name.clone(),
            side: hand.side_of(i as Seat),
        })
        .collect();

    let mut cards_played = BTreeMap::new();
    let mut cards_remaining = BTreeMap::new();
    for seat in 0..hand.seats {
        if let Some(id) = id_of(seat) {
            cards_played.insert(id, hand.cards_played_by(seat));
            cards_remaining.insert(id, hand.remaining_cards(seat).len() as u8);
        }
    }

    let cards_dealed = viewer_seat
        .and_then(|s| hand.dealt.get(s as usize))
        .cloned()
        .unwrap_or_default();

    Some(HandSnapshot {
        id: state.id,
        hand_no: hand.number,
        players,
        player_hand: id_of(hand.mano),
        player_dealer: id_of(hand.dealer),
        player_turn: hand.player_turn.and_then(id_of),
        chant_turn: hand.chant_turn.and_then(id_of),
        cards_played,
        cards_dealed,
        cards_remaining,
        rounds: rounds_public(hand, &id_of),
        status: hand.status,
        envido: EnvidoPublic {
            chanted: hand.envido.chanted.clone(),
            chanter: hand.envido.chanter.and_then(id_of),
            points: hand.envido.points,
            cards_played: hand
                .envido
                .revealed
                .iter()
                .filter_map(|(seat, cards)| id_of(*seat).map(|id| (id, cards.clone())))
                .collect(),
            winner: hand.envido.winner.and_then(id_of),
            status: hand.envido.status,
        },
        truco_status: hand.truco.status(),
        truco: TrucoPublic {
            accepted: hand.truco.accepted,
            pending: hand.truco.pending,
            chanter: hand.truco.chanter.and_then(id_of),
            holder: hand.truco.holder,
        },
        winner: hand.winner.and_then(id_of),
    })
}

fn rounds_public(hand: &Hand, id_of: &impl Fn(Seat) -> Option<PlayerId>) -> Vec<RoundPublic> {
    hand.rounds
        .iter()
        .map(|round| RoundPublic {
            cards_played: round
                .plays
                .iter()
                .filter_map(|(seat, card)| id_of(*seat).map(|id| (id, *card)))
                .collect(),
            winner: match round.outcome {
                Some(RoundOutcome::Won(seat)) => id_of(seat),
                _ => None,
            },
            parda: round.outcome == Some(RoundOutcome::Parda),
        })
        .collect()
}
