//! Game flow orchestration: applies one request to the registries and says
//! who must hear about it.
//!
//! Each match lock is held only while its state is read or changed; lobby
//! listings are built after the lock is released.

use time::macros::format_description;
use time::OffsetDateTime;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::game_transition::{derive_hand_transitions, HandTransition, MatchLifecycleView};
use crate::domain::rounds::RoundOutcome;
use crate::domain::snapshot::{hand_snapshot, score_snapshot};
use crate::domain::{EnvidoLevel, HandAction, JoinOutcome, MatchId, MatchState, PlayerId, Seat, TrucoLevel};
use crate::errors::domain::DomainError;
use crate::protocol::{ChatMessage, Notice, PlayerView, ServerEvent};
use crate::services::games::GameService;
use crate::services::players::PlayerService;

/// Who receives an outbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    Player(PlayerId),
    Players(Vec<PlayerId>),
    Everyone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub audience: Audience,
    pub event: ServerEvent,
}

impl Outbound {
    pub fn to_player(player: PlayerId, event: ServerEvent) -> Self {
        Self {
            audience: Audience::Player(player),
            event,
        }
    }

    pub fn to_players(players: Vec<PlayerId>, event: ServerEvent) -> Self {
        Self {
            audience: Audience::Players(players),
            event,
        }
    }

    pub fn to_everyone(event: ServerEvent) -> Self {
        Self {
            audience: Audience::Everyone,
            event,
        }
    }
}

pub struct GameFlowService<'a> {
    games: &'a GameService,
    players: &'a PlayerService,
}

impl<'a> GameFlowService<'a> {
    pub fn new(games: &'a GameService, players: &'a PlayerService) -> Self {
        Self { games, players }
    }

    /// Pushes for a fresh connection.
    pub fn connected(&self, player: &PlayerView) -> Vec<Outbound> {
        vec![
            Outbound::to_player(
                player.id,
                ServerEvent::Connect {
                    player: player.clone(),
                },
            ),
            Outbound::to_player(
                player.id,
                ServerEvent::GamesUpdate {
                    games_list: self.games.available(),
                },
            ),
        ]
    }

    pub fn lobby_update(&self) -> Outbound {
        Outbound::to_everyone(ServerEvent::GamesUpdate {
            games_list: self.games.available(),
        })
    }

    /// Create a match named after its creator and seat the creator in it.
    pub fn create_game(&self, player_id: PlayerId) -> Result<Vec<Outbound>, DomainError> {
        let player = self.players.get(player_id)?;
        let (match_id, _) = self.games.create(format!("Partida de {}", player.name));
        self.join_game(player_id, match_id)
    }

    pub fn join_game(&self, player_id: PlayerId, match_id: MatchId) -> Result<Vec<Outbound>, DomainError> {
        let player = self.players.get(player_id)?;
        let mut out = self.games.with_match(match_id, |state| {
            let mut out = Vec::new();
            let outcome = state.join(player.id, player.name.clone())?;
            info!(match_id = %match_id, player_id = %player.id, ?outcome, "[GAME FLOW] join");

            out.push(Outbound::to_player(
                player.id,
                ServerEvent::JoinedHand {
                    hand_id: state.id,
                    name: state.name.clone(),
                    current_players: state.roster.len(),
                },
            ));

            match outcome {
                JoinOutcome::AlreadySeated(_) => {
                    // Resync the returning tab.
                    if let Some(hand) = hand_snapshot(state, Some(player.id)) {
                        out.push(Outbound::to_player(
                            player.id,
                            ServerEvent::HandUpdated {
                                hand,
                                version: state.version,
                            },
                        ));
                    }
                }
                JoinOutcome::Joined { started, .. } => {
                    let others = seated_except(state, player.id);
                    if !others.is_empty() {
                        out.push(Outbound::to_players(
                            others,
                            ServerEvent::NewPlayerJoined {
                                player: player.clone(),
                            },
                        ));
                    }
                    if started {
                        let transitions = derive_hand_transitions(
                            &MatchLifecycleView {
                                hand: None,
                                winner: None,
                            },
                            &MatchLifecycleView {
                                hand: state.hand.as_ref(),
                                winner: state.winner,
                            },
                        );
                        out.extend(match_pushes(state, &transitions, true));
                    }
                }
            }
            Ok(out)
        })?;

        out.push(self.lobby_update());
        Ok(out)
    }

    /// Apply a hand action. On success every seat gets its own `handUpdated`.
    pub fn apply_action(
        &self,
        player_id: PlayerId,
        match_id: MatchId,
        action: HandAction,
    ) -> Result<Vec<Outbound>, DomainError> {
        self.games.with_match(match_id, |state| {
            let report = state.apply(player_id, action)?;
            debug!(
                match_id = %match_id,
                player_id = %player_id,
                version = state.version,
                "[GAME FLOW] action accepted"
            );
            let score_changed = !report.awards.is_empty();
            Ok(match_pushes(state, &report.transitions, score_changed))
        })
    }

    pub fn chat(&self, player_id: PlayerId, text: String) -> Result<Outbound, DomainError> {
        let player = self.players.get(player_id)?;
        let message = ChatMessage {
            id: Uuid::new_v4(),
            text,
            player: player.name,
            time: clock_time(),
        };
        Ok(Outbound::to_everyone(ServerEvent::Message { message }))
    }

    /// Forget a closed connection. Unstarted matches lose the seat and
    /// matches left without a connected player are dropped.
    pub fn disconnected(&self, player_id: PlayerId) -> Vec<Outbound> {
        self.players.remove(player_id);
        if self.games.remove_player(player_id, |id| self.players.contains(id)) {
            info!(player_id = %player_id, "[GAME FLOW] player left open matches");
            vec![self.lobby_update()]
        } else {
            Vec::new()
        }
    }
}

fn seated(state: &MatchState) -> Vec<PlayerId> {
    state.roster.iter().map(|p| p.id).collect()
}

fn seated_except(state: &MatchState, player: PlayerId) -> Vec<PlayerId> {
    state
        .roster
        .iter()
        .map(|p| p.id)
        .filter(|id| *id != player)
        .collect()
}

/// Per-seat hand snapshots, then score and announcements for the table.
fn match_pushes(state: &MatchState, transitions: &[HandTransition], with_score: bool) -> Vec<Outbound> {
    let mut out = Vec::new();
    for entry in &state.roster {
        if let Some(hand) = hand_snapshot(state, Some(entry.id)) {
            out.push(Outbound::to_player(
                entry.id,
                ServerEvent::HandUpdated {
                    hand,
                    version: state.version,
                },
            ));
        }
    }
    if with_score {
        let score = score_snapshot(state);
        out.push(Outbound::to_players(
            seated(state),
            ServerEvent::UpdateScore {
                score: score.score,
                winner: score.winner,
                version: state.version,
            },
        ));
    }
    for transition in transitions {
        if let Some(notice) = announce(state, transition) {
            out.push(Outbound::to_players(seated(state), ServerEvent::Notify(notice)));
        }
    }
    out
}

fn name_of(state: &MatchState, seat: Option<Seat>) -> String {
    seat.and_then(|s| state.player_at(s))
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "Nadie".to_string())
}

fn envido_label(level: EnvidoLevel) -> &'static str {
    match level {
        EnvidoLevel::Envido => "Envido",
        EnvidoLevel::RealEnvido => "Real Envido",
        EnvidoLevel::FaltaEnvido => "Falta Envido",
    }
}

fn truco_label(level: TrucoLevel) -> &'static str {
    match level {
        TrucoLevel::NoCantado => "No cantado",
        TrucoLevel::Truco => "Truco",
        TrucoLevel::ReTruco => "Re Truco",
        TrucoLevel::ValeCuatro => "Vale Cuatro",
    }
}

fn announce(state: &MatchState, transition: &HandTransition) -> Option<Notice> {
    let notice = match transition {
        HandTransition::HandReady { number, dealer } => Notice::info(
            format!("Mano {number}"),
            format!("Reparte {}", name_of(state, Some(*dealer))),
        ),
        HandTransition::HandDealt { .. } => return None,
        HandTransition::RoundResolved { index, outcome } => {
            let text = match outcome {
                RoundOutcome::Won(seat) => format!("{} gana la ronda", name_of(state, Some(*seat))),
                RoundOutcome::Parda => "Parda".to_string(),
            };
            Notice::info(format!("Ronda {}", index + 1), text)
        }
        HandTransition::EnvidoChanted { seat, level } => Notice::info(
            "Envido",
            format!("{} canta {}", name_of(state, Some(*seat)), envido_label(*level)),
        ),
        HandTransition::EnvidoAccepted { points } => {
            Notice::info("Envido", format!("Quiero. Se juegan {points} puntos"))
        }
        HandTransition::EnvidoDeclined { winner, points } => Notice::info(
            "Envido",
            format!("No quiero. {} suma {points}", name_of(state, *winner)),
        ),
        HandTransition::EnvidoResolved { winner, points } => Notice::success(
            "Envido",
            format!("{} gana {points} puntos", name_of(state, *winner)),
        ),
        HandTransition::TrucoChanted { seat, level } => Notice::info(
            "Truco",
            format!("{} canta {}", name_of(state, Some(*seat)), truco_label(*level)),
        ),
        HandTransition::TrucoAccepted { level } => {
            Notice::info("Truco", format!("Quiero {}", truco_label(*level)))
        }
        HandTransition::TrucoDeclined { winner } => Notice::info(
            "Truco",
            format!("No quiero. {} gana la mano", name_of(state, *winner)),
        ),
        HandTransition::HandFinished { winner } => Notice::success(
            "Mano terminada",
            format!("{} gana la mano", name_of(state, *winner)),
        ),
        HandTransition::MatchFinished { winner } => Notice::success(
            "Partida terminada",
            format!("{} gana la partida", name_of(state, Some(*winner))),
        ),
    };
    Some(notice)
}

fn clock_time() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    now.format(format_description!("[hour]:[minute]:[second]"))
        .unwrap_or_default()
}
