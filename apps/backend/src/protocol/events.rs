//! Wire envelopes: `{"event": <name>, "payload": {...}}` in both directions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::hand::HandAction;
use crate::domain::snapshot::{GameSummary, HandSnapshot};
use crate::domain::{Card, EnvidoLevel, MatchId, PlayerId, Rank, Suit, TrucoLevel};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "payload",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ClientEvent {
    CreateNewGame {
        player_id: PlayerId,
    },
    JoinGame {
        player_id: PlayerId,
        hand_id: MatchId,
    },
    DealCards {
        player_id: PlayerId,
        hand_id: MatchId,
    },
    PlayCard {
        player_id: PlayerId,
        hand_id: MatchId,
        suit: Suit,
        rank: Rank,
    },
    ChantEnvido {
        player_id: PlayerId,
        hand_id: MatchId,
        level: EnvidoLevel,
    },
    ResponseToEnvido {
        player_id: PlayerId,
        hand_id: MatchId,
        level: EnvidoLevel,
    },
    AcceptEnvido {
        player_id: PlayerId,
        hand_id: MatchId,
    },
    DeclineEnvido {
        player_id: PlayerId,
        hand_id: MatchId,
    },
    PlayEnvido {
        player_id: PlayerId,
        hand_id: MatchId,
        cards: Vec<Card>,
    },
    ChantTruco {
        player_id: PlayerId,
        hand_id: MatchId,
        level: TrucoLevel,
    },
    ResponseToTruco {
        player_id: PlayerId,
        hand_id: MatchId,
        level: TrucoLevel,
    },
    ChantFlor {
        player_id: PlayerId,
        hand_id: MatchId,
    },
    Message {
        player_id: PlayerId,
        message: String,
    },
}

impl ClientEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::CreateNewGame { .. } => "createNewGame",
            ClientEvent::JoinGame { .. } => "joinGame",
            ClientEvent::DealCards { .. } => "dealCards",
            ClientEvent::PlayCard { .. } => "playCard",
            ClientEvent::ChantEnvido { .. } => "chantEnvido",
            ClientEvent::ResponseToEnvido { .. } => "responseToEnvido",
            ClientEvent::AcceptEnvido { .. } => "acceptEnvido",
            ClientEvent::DeclineEnvido { .. } => "declineEnvido",
            ClientEvent::PlayEnvido { .. } => "playEnvido",
            ClientEvent::ChantTruco { .. } => "chantTruco",
            ClientEvent::ResponseToTruco { .. } => "responseToTruco",
            ClientEvent::ChantFlor { .. } => "chantFlor",
            ClientEvent::Message { .. } => "message",
        }
    }

    pub fn player_id(&self) -> PlayerId {
        match self {
            ClientEvent::CreateNewGame { player_id }
            | ClientEvent::JoinGame { player_id, .. }
            | ClientEvent::DealCards { player_id, .. }
            | ClientEvent::PlayCard { player_id, .. }
            | ClientEvent::ChantEnvido { player_id, .. }
            | ClientEvent::ResponseToEnvido { player_id, .. }
            | ClientEvent::AcceptEnvido { player_id, .. }
            | ClientEvent::DeclineEnvido { player_id, .. }
            | ClientEvent::PlayEnvido { player_id, .. }
            | ClientEvent::ChantTruco { player_id, .. }
            | ClientEvent::ResponseToTruco { player_id, .. }
            | ClientEvent::ChantFlor { player_id, .. }
            | ClientEvent::Message { player_id, .. } => *player_id,
        }
    }

    /// Split a hand action into its target match and the domain action.
    pub fn into_hand_action(self) -> Option<(MatchId, HandAction)> {
        let pair = match self {
            ClientEvent::DealCards { hand_id, .. } => (hand_id, HandAction::DealCards),
            ClientEvent::PlayCard {
                hand_id, suit, rank, ..
            } => (hand_id, HandAction::PlayCard(Card::new(suit, rank))),
            ClientEvent::ChantEnvido { hand_id, level, .. } => {
                (hand_id, HandAction::ChantEnvido(level))
            }
            ClientEvent::ResponseToEnvido { hand_id, level, .. } => {
                (hand_id, HandAction::ResponseToEnvido(level))
            }
            ClientEvent::AcceptEnvido { hand_id, .. } => (hand_id, HandAction::AcceptEnvido),
            ClientEvent::DeclineEnvido { hand_id, .. } => (hand_id, HandAction::DeclineEnvido),
            ClientEvent::PlayEnvido { hand_id, cards, .. } => {
                (hand_id, HandAction::PlayEnvido(cards))
            }
            ClientEvent::ChantTruco { hand_id, level, .. } => {
                (hand_id, HandAction::ChantTruco(level))
            }
            ClientEvent::ResponseToTruco { hand_id, level, .. } => {
                (hand_id, HandAction::ResponseToTruco(level))
            }
            ClientEvent::ChantFlor { hand_id, .. } => (hand_id, HandAction::ChantFlor),
            ClientEvent::CreateNewGame { .. }
            | ClientEvent::JoinGame { .. }
            | ClientEvent::Message { .. } => return None,
        };
        Some(pair)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub text: String,
    /// Sender's display name.
    pub player: String,
    /// Local wall-clock time, `HH:MM:SS`.
    pub time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: NoticeKind,
}

impl Notice {
    pub fn new(kind: NoticeKind, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            kind,
        }
    }

    pub fn info(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, title, text)
    }

    pub fn success(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, title, text)
    }

    pub fn error(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, title, text)
    }
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "payload",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ServerEvent {
    Connect {
        player: PlayerView,
    },
    GamesUpdate {
        games_list: Vec<GameSummary>,
    },
    JoinedHand {
        hand_id: MatchId,
        name: String,
        current_players: usize,
    },
    NewPlayerJoined {
        player: PlayerView,
    },
    HandUpdated {
        hand: HandSnapshot,
        version: u64,
    },
    UpdateScore {
        score: BTreeMap<PlayerId, u16>,
        winner: Option<PlayerId>,
        version: u64,
    },
    Message {
        message: ChatMessage,
    },
    Notify(Notice),
    Error(Notice),
}

impl ServerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::Connect { .. } => "connect",
            ServerEvent::GamesUpdate { .. } => "gamesUpdate",
            ServerEvent::JoinedHand { .. } => "joinedHand",
            ServerEvent::NewPlayerJoined { .. } => "newPlayerJoined",
            ServerEvent::HandUpdated { .. } => "handUpdated",
            ServerEvent::UpdateScore { .. } => "updateScore",
            ServerEvent::Message { .. } => "message",
            ServerEvent::Notify(_) => "notify",
            ServerEvent::Error(_) => "error",
        }
    }
}
