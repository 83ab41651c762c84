use serde::{Deserialize, Serialize};

use crate::errors::domain::{Capability, DomainError, ValidationKind};

/// Cards dealt to each seat.
pub const HAND_SIZE: usize = 3;
pub const MIN_PLAYERS: u8 = 2;
pub const MAX_PLAYERS: u8 = 6;
pub const DEFAULT_TARGET_SCORE: u16 = 30;

/// Table rules fixed when a match is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRules {
    pub num_players: u8,
    pub target_score: u16,
    pub flor: bool,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            num_players: MIN_PLAYERS,
            target_score: DEFAULT_TARGET_SCORE,
            flor: false,
        }
    }
}

impl GameRules {
    /// Seats must split into two alternating sides, so the count is even.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.num_players) || self.num_players % 2 != 0 {
            return Err(DomainError::validation(
                ValidationKind::InvalidPlayerCount,
                format!(
                    "Player count must be even and within {MIN_PLAYERS}..={MAX_PLAYERS}, got {}",
                    self.num_players
                ),
            ));
        }
        if self.target_score == 0 {
            return Err(DomainError::validation(
                ValidationKind::InvalidRules,
                "Target score must be positive",
            ));
        }
        if self.flor {
            return Err(DomainError::unimplemented(
                Capability::Flor,
                "Flor is not available",
            ));
        }
        Ok(())
    }
}
