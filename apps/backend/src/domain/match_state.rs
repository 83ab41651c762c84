//! A match: the roster, the current hand and the score ledger around it.

use std::collections::BTreeMap;

use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::game_transition::{derive_hand_transitions, HandTransition, MatchLifecycleView};
use crate::domain::hand::{apply_action, HandAction};
use crate::domain::rules::GameRules;
use crate::domain::scoring::{apply_awards, falta_points, hand_awards, match_winner, HandAward};
use crate::domain::seed_derivation::{derive_dealing_seed, derive_first_dealer};
use crate::domain::state::{Hand, Seat};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

pub type PlayerId = Uuid;
pub type MatchId = Uuid;

/// A seated player. The name is captured at join time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub id: PlayerId,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    AlreadySeated(Seat),
    /// `started` is true when this join filled the table and created the first hand.
    Joined { seat: Seat, started: bool },
}

/// What an accepted action changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionReport {
    pub seat: Seat,
    pub transitions: Vec<HandTransition>,
    pub awards: Vec<HandAward>,
}

#[derive(Debug, Clone)]
pub struct MatchState {
    pub id: MatchId,
    pub name: String,
    pub rules: GameRules,
    pub seed: u64,
    pub roster: Vec<RosterEntry>,
    pub hand: Option<Hand>,
    pub scores: BTreeMap<Seat, u16>,
    pub winner: Option<Seat>,
    /// Bumped on every accepted mutation; carried by pushes so mirrors can drop stale ones.
    pub version: u64,
}

impl MatchState {
    pub fn new(id: MatchId, name: impl Into<String>, rules: GameRules, seed: u64) -> Self {
        Self {
            id,
            name: name.into(),
            rules,
            seed,
            roster: Vec::with_capacity(rules.num_players as usize),
            hand: None,
            scores: BTreeMap::new(),
            winner: None,
            version: 0,
        }
    }

    pub fn seats(&self) -> u8 {
        self.rules.num_players
    }

    pub fn is_full(&self) -> bool {
        self.roster.len() >= self.seats() as usize
    }

    pub fn is_started(&self) -> bool {
        self.hand.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    /// Listed in the lobby: room left and not over.
    pub fn is_open(&self) -> bool {
        !self.is_full() && !self.is_finished()
    }

    pub fn player_at(&self, seat: Seat) -> Option<&RosterEntry> {
        self.roster.get(seat as usize)
    }

    pub fn find_seat(&self, player: PlayerId) -> Option<Seat> {
        self.roster
            .iter()
            .position(|p| p.id == player)
            .map(|i| i as Seat)
    }

    pub fn seat_of(&self, player: PlayerId) -> Result<Seat, DomainError> {
        self.find_seat(player).ok_or_else(|| {
            DomainError::validation(ValidationKind::NotSeated, "You are not part of this game")
        })
    }

    pub fn join(&mut self, player: PlayerId, name: impl Into<String>) -> Result<JoinOutcome, DomainError> {
        if let Some(seat) = self.find_seat(player) {
            return Ok(JoinOutcome::AlreadySeated(seat));
        }
        if self.is_full() || self.is_started() {
            return Err(DomainError::validation(
                ValidationKind::GameFull,
                "Partida completa",
            ));
        }

        let seat = self.roster.len() as Seat;
        self.roster.push(RosterEntry {
            id: player,
            name: name.into(),
        });
        self.scores.insert(seat, 0);
        self.version += 1;

        let started = self.is_full();
        if started {
            let dealer = derive_first_dealer(self.seed, self.seats());
            let falta = falta_points(&self.scores, self.rules.target_score);
            self.hand = Some(Hand::new(1, self.seats(), dealer, falta));
            info!(match_id = %self.id, dealer, "[MATCH] table full, first hand ready");
        }
        Ok(JoinOutcome::Joined { seat, started })
    }

    /// Drop a player before play begins. Returns whether the roster changed.
    pub fn leave(&mut self, player: PlayerId) -> bool {
        if self.is_started() {
            return false;
        }
        let Some(seat) = self.find_seat(player) else {
            return false;
        };
        self.roster.remove(seat as usize);
        self.scores = (0..self.roster.len() as Seat).map(|s| (s, 0)).collect();
        self.version += 1;
        true
    }

    /// Validate and apply one hand action. On error nothing changes.
    pub fn apply(&mut self, player: PlayerId, action: HandAction) -> Result<ActionReport, DomainError> {
        let seat = self.seat_of(player)?;
        if self.is_finished() {
            return Err(DomainError::validation(
                ValidationKind::MatchOver,
                "The match is over",
            ));
        }
        let current = self
            .hand
            .as_ref()
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Hand, "The game has not started"))?;

        // A finished hand is replaced by the next dealer's fresh hand on deal.
        let mut next = if matches!(action, HandAction::DealCards) && current.is_finished() {
            let dealer = current.next_seat(current.dealer);
            let falta = falta_points(&self.scores, self.rules.target_score);
            Hand::new(current.number + 1, self.seats(), dealer, falta)
        } else {
            current.clone()
        };

        let deal_seed = derive_dealing_seed(self.seed, next.number);
        apply_action(&mut next, seat, action, deal_seed)?;

        let mut scores = self.scores.clone();
        let mut awards = Vec::new();
        if next.is_finished() && !current.is_finished() {
            awards = hand_awards(&next)?;
            apply_awards(&mut scores, &awards);
        }
        let winner = match_winner(&scores, self.rules.target_score);

        let transitions = derive_hand_transitions(
            &MatchLifecycleView {
                hand: Some(current),
                winner: self.winner,
            },
            &MatchLifecycleView {
                hand: Some(&next),
                winner,
            },
        );
        debug!(match_id = %self.id, seat, ?transitions, "[MATCH] action applied");

        self.hand = Some(next);
        self.scores = scores;
        self.winner = winner;
        self.version += 1;

        if let Some(w) = winner {
            info!(match_id = %self.id, winner = w, "[MATCH] match finished");
        }
        Ok(ActionReport {
            seat,
            transitions,
            awards,
        })
    }
}
