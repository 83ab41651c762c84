use actix::prelude::*;
use dashmap::DashMap;
use tracing::{debug, warn};

use crate::domain::PlayerId;
use crate::protocol::ServerEvent;
use crate::services::game_flow::{Audience, Outbound};

/// A server push addressed to one live session.
#[derive(Message, Clone, Debug)]
#[rtype(result = "()")]
pub struct HubEvent(pub ServerEvent);

/// Live WebSocket sessions keyed by the player they were issued.
///
/// One connection is one player, so the player id doubles as the
/// connection id.
#[derive(Default)]
pub struct WsRegistry {
    connections: DashMap<PlayerId, Recipient<HubEvent>>,
}

impl WsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, player: PlayerId, recipient: Recipient<HubEvent>) {
        self.connections.insert(player, recipient);
        debug!(
            player_id = %player,
            active = self.connections.len(),
            "[WS HUB] registered connection"
        );
    }

    pub fn unregister(&self, player: PlayerId) {
        if self.connections.remove(&player).is_some() {
            debug!(
                player_id = %player,
                active = self.connections.len(),
                "[WS HUB] unregistered connection"
            );
        }
    }

    pub fn send_to(&self, player: PlayerId, event: ServerEvent) {
        match self.connections.get(&player) {
            Some(recipient) => recipient.value().do_send(HubEvent(event)),
            None => debug!(player_id = %player, "[WS HUB] no live session for player"),
        }
    }

    pub fn broadcast(&self, event: ServerEvent) {
        // Collect first so no shard lock is held while mailboxes are filled.
        let recipients: Vec<Recipient<HubEvent>> = self
            .connections
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        for recipient in recipients {
            recipient.do_send(HubEvent(event.clone()));
        }
    }

    /// Fan out a batch in order. Each session sees its events in the order
    /// they appear in the batch.
    pub fn deliver(&self, outbound: Vec<Outbound>) {
        for Outbound { audience, event } in outbound {
            match audience {
                Audience::Player(player) => self.send_to(player, event),
                Audience::Players(players) => {
                    for player in players {
                        self.send_to(player, event.clone());
                    }
                }
                Audience::Everyone => self.broadcast(event),
            }
        }
    }

    pub fn active_connections_count(&self) -> usize {
        self.connections.len()
    }

    pub fn is_connected(&self, player: PlayerId) -> bool {
        let connected = self
            .connections
            .get(&player)
            .is_some_and(|recipient| recipient.connected());
        if !connected && self.connections.contains_key(&player) {
            warn!(player_id = %player, "[WS HUB] registered session has a closed mailbox");
        }
        connected
    }
}
