//! Error codes for the Truco backend.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses and WebSocket `error` pushes.

use core::fmt;

/// Centralized error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Illegal actions
    /// Out of turn
    OutOfTurn,
    /// Not the seat holding the chant turn
    NotChantTurn,
    /// Hand status does not allow the action
    PhaseMismatch,
    /// Card not in hand
    CardNotInHand,
    /// Card already played this hand
    CardAlreadyPlayed,
    /// Only the dealer may deal
    NotDealer,
    /// Envido window closed or envido already resolved
    EnvidoClosed,
    /// Envido call does not escalate
    EnvidoLadder,
    /// Envido reveal with an invalid card set
    EnvidoCards,
    /// Truco level out of sequence
    TrucoLadder,
    /// Truco raise by the side that does not hold the last acceptance
    TrucoHolder,
    /// Game roster is full
    GameFull,
    /// Player is not seated in the game
    NotSeated,
    /// Match already has a winner
    MatchOver,
    /// Parse card error
    ParseCard,
    /// Seat count not supported
    InvalidPlayerCount,
    /// Rules rejected at configuration time
    InvalidRules,
    /// General validation error
    ValidationError,

    // Request shape
    /// Invalid game ID provided
    InvalidGameId,

    // Resource Not Found
    /// Game not found
    GameNotFound,
    /// Player not found
    PlayerNotFound,
    /// No hand in progress
    HandNotFound,

    // Engine faults
    /// Deck cannot satisfy the deal
    InsufficientCards,
    /// Capability intentionally not implemented
    Unimplemented,

    // System Errors
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::NotChantTurn => "NOT_CHANT_TURN",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::CardNotInHand => "CARD_NOT_IN_HAND",
            Self::CardAlreadyPlayed => "CARD_ALREADY_PLAYED",
            Self::NotDealer => "NOT_DEALER",
            Self::EnvidoClosed => "ENVIDO_CLOSED",
            Self::EnvidoLadder => "ENVIDO_LADDER",
            Self::EnvidoCards => "ENVIDO_CARDS",
            Self::TrucoLadder => "TRUCO_LADDER",
            Self::TrucoHolder => "TRUCO_HOLDER",
            Self::GameFull => "GAME_FULL",
            Self::NotSeated => "NOT_SEATED",
            Self::MatchOver => "MATCH_OVER",
            Self::ParseCard => "PARSE_CARD",
            Self::InvalidPlayerCount => "INVALID_PLAYER_COUNT",
            Self::InvalidRules => "INVALID_RULES",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::InvalidGameId => "INVALID_GAME_ID",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::HandNotFound => "HAND_NOT_FOUND",

            Self::InsufficientCards => "INSUFFICIENT_CARDS",
            Self::Unimplemented => "UNIMPLEMENTED",

            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
