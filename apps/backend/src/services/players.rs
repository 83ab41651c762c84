//! Connected player registry.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use crate::domain::PlayerId;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::protocol::PlayerView;

/// One record per live connection. Nothing survives a restart.
#[derive(Default)]
pub struct PlayerService {
    players: DashMap<PlayerId, PlayerView>,
    counter: AtomicU64,
}

impl PlayerService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint an anonymous player with the next `Anónimo#N` name. Nothing is
    /// stored until [`PlayerService::insert`].
    pub fn next_player(&self) -> PlayerView {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        PlayerView {
            id: Uuid::new_v4(),
            name: format!("Anónimo#{n}"),
        }
    }

    pub fn insert(&self, player: PlayerView) {
        debug!(player_id = %player.id, name = %player.name, "Player registered");
        self.players.insert(player.id, player);
    }

    pub fn register(&self) -> PlayerView {
        let player = self.next_player();
        self.insert(player.clone());
        player
    }

    pub fn get(&self, id: PlayerId) -> Result<PlayerView, DomainError> {
        self.players
            .get(&id)
            .map(|p| p.value().clone())
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Player, format!("Player {id} not found")))
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    pub fn remove(&self, id: PlayerId) -> Option<PlayerView> {
        self.players.remove(&id).map(|(_, p)| p)
    }

    pub fn count(&self) -> usize {
        self.players.len()
    }
}
