use std::env;
use std::str::FromStr;

use crate::domain::rules::{DEFAULT_TARGET_SCORE, MIN_PLAYERS};
use crate::domain::GameRules;
use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;

/// Process configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub target_score: u16,
    pub num_players: u8,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            target_score: DEFAULT_TARGET_SCORE,
            num_players: MIN_PLAYERS,
        }
    }
}

impl ServerConfig {
    /// Read `TRUCO_HOST`, `TRUCO_PORT`, `TRUCO_TARGET_SCORE` and
    /// `TRUCO_NUM_PLAYERS`. Unset variables fall back to defaults.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();
        let config = Self {
            host: lookup("TRUCO_HOST")
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty())
                .unwrap_or(defaults.host),
            port: parse_var(&lookup, "TRUCO_PORT", defaults.port)?,
            target_score: parse_var(&lookup, "TRUCO_TARGET_SCORE", defaults.target_score)?,
            num_players: parse_var(&lookup, "TRUCO_NUM_PLAYERS", defaults.num_players)?,
        };
        config.rules()?;
        Ok(config)
    }

    /// Table rules every new match is created with.
    pub fn rules(&self) -> Result<GameRules, AppError> {
        let rules = GameRules {
            num_players: self.num_players,
            target_score: self.target_score,
            flor: false,
        };
        rules
            .validate()
            .map_err(|err| AppError::config(format!("Invalid game rules: {}", err.detail())))?;
        Ok(rules)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, AppError> {
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::config(format!("{name} must be a number, got '{raw}'"))),
    }
}
