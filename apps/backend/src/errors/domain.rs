//! Domain-level error type used across the game engine and services.
//!
//! This error type is HTTP- and transport-agnostic. HTTP handlers convert it
//! into `crate::error::AppError`; the WebSocket router turns it into an
//! `error` push for the offending connection.

use thiserror::Error;

/// Why an action was rejected by the hand or match state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    OutOfTurn,
    NotChantTurn,
    PhaseMismatch,
    CardNotInHand,
    CardAlreadyPlayed,
    NotDealer,
    EnvidoClosed,
    EnvidoLadder,
    EnvidoCards,
    TrucoLadder,
    TrucoHolder,
    GameFull,
    NotSeated,
    MatchOver,
    ParseCard,
    InvalidPlayerCount,
    InvalidRules,
    Other(String),
}

/// Domain-level not found entities.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Game,
    Player,
    Hand,
}

/// Optional rule sets the engine recognises but does not play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Flor,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Illegal action: wrong turn, wrong status, card ownership, ladder violation.
    #[error("validation error ({0:?}): {1}")]
    Validation(ValidationKind, String),
    #[error("not found {0:?}: {1}")]
    NotFound(NotFoundKind, String),
    /// The deck cannot cover the requested deal. Fatal to the hand only.
    #[error("insufficient cards: needed {needed}, available {available}")]
    InsufficientCards { needed: usize, available: usize },
    #[error("unimplemented {0:?}: {1}")]
    Unimplemented(Capability, String),
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }

    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }

    pub fn unimplemented(capability: Capability, detail: impl Into<String>) -> Self {
        Self::Unimplemented(capability, detail.into())
    }

    /// Human-readable detail without the kind prefix.
    pub fn detail(&self) -> String {
        match self {
            DomainError::Validation(_, d)
            | DomainError::NotFound(_, d)
            | DomainError::Unimplemented(_, d) => d.clone(),
            DomainError::InsufficientCards { needed, available } => {
                format!("Deck has {available} cards, {needed} needed")
            }
        }
    }
}
