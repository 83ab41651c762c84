//! Client-side mirror of pushed state.
//!
//! Each event only touches its own sub-tree. Versioned sub-trees (hand and
//! score) drop anything not newer than what they hold, so duplicated or
//! reordered pushes converge to the same mirror.

use std::collections::{BTreeMap, VecDeque};

use crate::domain::snapshot::{GameSummary, HandSnapshot};
use crate::domain::{MatchId, PlayerId};
use crate::protocol::events::{ChatMessage, Notice, PlayerView, ServerEvent};

/// Chat lines kept in the mirror.
pub const CHAT_HISTORY: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedMatch {
    pub id: MatchId,
    pub name: String,
    pub current_players: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mirror {
    pub player: Option<PlayerView>,
    pub games: Vec<GameSummary>,
    pub joined: Option<JoinedMatch>,
    /// Players announced through `newPlayerJoined`, in arrival order.
    pub newcomers: Vec<PlayerView>,
    pub hand: Option<HandSnapshot>,
    pub hand_version: u64,
    pub score: BTreeMap<PlayerId, u16>,
    pub match_winner: Option<PlayerId>,
    pub score_version: u64,
    pub messages: VecDeque<ChatMessage>,
    pub last_notice: Option<Notice>,
}

impl Mirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn me(&self) -> Option<PlayerId> {
        self.player.as_ref().map(|p| p.id)
    }

    /// Fold one push into the mirror. Returns whether anything changed.
    pub fn apply(&mut self, event: &ServerEvent) -> bool {
        match event {
            ServerEvent::Connect { player } => replace(&mut self.player, Some(player.clone())),
            ServerEvent::GamesUpdate { games_list } => replace(&mut self.games, games_list.clone()),
            ServerEvent::JoinedHand {
                hand_id,
                name,
                current_players,
            } => {
                let switched = self.joined.as_ref().is_some_and(|j| j.id != *hand_id);
                if switched {
                    self.reset_match();
                }
                let joined = Some(JoinedMatch {
                    id: *hand_id,
                    name: name.clone(),
                    current_players: *current_players,
                });
                replace(&mut self.joined, joined) || switched
            }
            ServerEvent::NewPlayerJoined { player } => {
                if self.newcomers.iter().any(|p| p.id == player.id) {
                    return false;
                }
                self.newcomers.push(player.clone());
                if let Some(joined) = self.joined.as_mut() {
                    joined.current_players += 1;
                }
                true
            }
            ServerEvent::HandUpdated { hand, version } => {
                if *version <= self.hand_version || !self.is_current_match(hand.id) {
                    return false;
                }
                self.hand = Some(hand.clone());
                self.hand_version = *version;
                true
            }
            ServerEvent::UpdateScore {
                score,
                winner,
                version,
            } => {
                if *version <= self.score_version {
                    return false;
                }
                self.score = score.clone();
                self.match_winner = *winner;
                self.score_version = *version;
                true
            }
            ServerEvent::Message { message } => {
                if self.messages.iter().any(|m| m.id == message.id) {
                    return false;
                }
                self.messages.push_back(message.clone());
                while self.messages.len() > CHAT_HISTORY {
                    self.messages.pop_front();
                }
                true
            }
            ServerEvent::Notify(notice) | ServerEvent::Error(notice) => {
                replace(&mut self.last_notice, Some(notice.clone()))
            }
        }
    }

    fn is_current_match(&self, id: MatchId) -> bool {
        self.joined.as_ref().map_or(true, |j| j.id == id)
    }

    fn reset_match(&mut self) {
        self.newcomers.clear();
        self.hand = None;
        self.hand_version = 0;
        self.score.clear();
        self.match_winner = None;
        self.score_version = 0;
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
