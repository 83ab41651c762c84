//! In-memory match registry.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use rand::Rng;
use tracing::info;
use uuid::Uuid;

use crate::domain::snapshot::{game_summary, GameSummary};
use crate::domain::{GameRules, MatchId, MatchState, PlayerId};
use crate::errors::domain::{DomainError, NotFoundKind};

/// A match behind its own lock: actions on one match are applied one at a
/// time while other matches proceed in parallel.
pub type SharedMatch = Arc<Mutex<MatchState>>;

pub struct GameService {
    matches: DashMap<MatchId, SharedMatch>,
    rules: GameRules,
}

impl GameService {
    pub fn new(rules: GameRules) -> Self {
        Self {
            matches: DashMap::new(),
            rules,
        }
    }

    pub fn rules(&self) -> GameRules {
        self.rules
    }

    pub fn create(&self, name: impl Into<String>) -> (MatchId, SharedMatch) {
        let id = Uuid::new_v4();
        let seed: u64 = rand::rng().random();
        let state = MatchState::new(id, name, self.rules, seed);
        info!(match_id = %id, name = %state.name, "Match created");
        let shared = Arc::new(Mutex::new(state));
        self.matches.insert(id, Arc::clone(&shared));
        (id, shared)
    }

    pub fn get(&self, id: MatchId) -> Result<SharedMatch, DomainError> {
        self.matches
            .get(&id)
            .map(|m| Arc::clone(m.value()))
            .ok_or_else(|| not_found(id))
    }

    /// Run `f` on a registered match. The registry entry stays borrowed while
    /// the match is locked, so a removal of the same match waits for `f`.
    pub fn with_match<R>(
        &self,
        id: MatchId,
        f: impl FnOnce(&mut MatchState) -> Result<R, DomainError>,
    ) -> Result<R, DomainError> {
        let entry = self.matches.get(&id).ok_or_else(|| not_found(id))?;
        let mut state = entry.value().lock();
        f(&mut state)
    }

    pub fn summary(&self, id: MatchId) -> Result<GameSummary, DomainError> {
        self.with_match(id, |state| Ok(game_summary(state)))
    }

    /// Matches still accepting players, sorted by name.
    pub fn available(&self) -> Vec<GameSummary> {
        // Clone handles first so no shard lock is held while a match lock is taken.
        let handles: Vec<SharedMatch> = self.matches.iter().map(|m| Arc::clone(m.value())).collect();
        let mut open: Vec<GameSummary> = handles
            .iter()
            .filter_map(|shared| {
                let state = shared.lock();
                state.is_open().then(|| game_summary(&state))
            })
            .collect();
        open.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        open
    }

    /// Take a disconnected player out of every match that has not started,
    /// then drop the matches they sat in that nobody can play any more:
    /// empty, already won, or with no seated player still connected.
    /// Returns whether the lobby may have changed.
    pub fn remove_player(&self, player: PlayerId, is_connected: impl Fn(PlayerId) -> bool) -> bool {
        let handles: Vec<(MatchId, SharedMatch)> = self
            .matches
            .iter()
            .map(|m| (*m.key(), Arc::clone(m.value())))
            .collect();

        let mut changed = false;
        for (id, shared) in handles {
            let was_seated = {
                let mut state = shared.lock();
                let seated = state.find_seat(player).is_some();
                changed |= state.leave(player);
                seated
            };
            if !was_seated {
                continue;
            }
            // Re-checked under the shard lock so a join racing this removal
            // either lands first and keeps the match or finds it gone.
            let removed = self.matches.remove_if(&id, |_, shared| {
                let state = shared.lock();
                state.roster.is_empty()
                    || state.winner.is_some()
                    || !state.roster.iter().any(|p| is_connected(p.id))
            });
            if removed.is_some() {
                changed = true;
                info!(match_id = %id, "Abandoned match removed");
            }
        }
        changed
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

fn not_found(id: MatchId) -> DomainError {
    DomainError::not_found(NotFoundKind::Game, format!("Game {id} not found"))
}
