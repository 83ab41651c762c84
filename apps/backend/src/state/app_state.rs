use std::sync::Arc;

use crate::config::ServerConfig;
use crate::error::AppError;
use crate::services::games::GameService;
use crate::services::players::PlayerService;
use crate::ws::hub::WsRegistry;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    /// Live matches
    pub games: Arc<GameService>,
    /// Connected players
    pub players: Arc<PlayerService>,
    /// Live WebSocket sessions
    pub registry: Arc<WsRegistry>,
}

impl AppState {
    /// Create a new AppState; fails when the configured rules are invalid.
    pub fn new(config: ServerConfig) -> Result<Self, AppError> {
        let rules = config.rules()?;
        Ok(Self {
            config,
            games: Arc::new(GameService::new(rules)),
            players: Arc::new(PlayerService::new()),
            registry: Arc::new(WsRegistry::new()),
        })
    }

    /// Two-seat state with default rules.
    pub fn for_tests() -> Self {
        let config = ServerConfig::default();
        let rules = crate::domain::GameRules::default();
        Self {
            config,
            games: Arc::new(GameService::new(rules)),
            players: Arc::new(PlayerService::new()),
            registry: Arc::new(WsRegistry::new()),
        }
    }
}
