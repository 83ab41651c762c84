use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::errors::ErrorCode;

#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation {
        code: ErrorCode,
        detail: String,
        status: StatusCode,
    },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Internal error: {detail}")]
    Internal { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::BadRequest { code, .. }
            | AppError::Internal { code, .. } => *code,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            AppError::Validation { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::BadRequest { detail, .. }
            | AppError::Internal { detail, .. }
            | AppError::Config { detail } => detail.clone(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { status, .. } => *status,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Internal { .. } | AppError::Config { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
            status: StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Internal {
            code,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub(crate) fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let lower = word.to_lowercase();
                let mut chars = lower.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<&ValidationKind> for ErrorCode {
    fn from(kind: &ValidationKind) -> Self {
        match kind {
            ValidationKind::OutOfTurn => ErrorCode::OutOfTurn,
            ValidationKind::NotChantTurn => ErrorCode::NotChantTurn,
            ValidationKind::PhaseMismatch => ErrorCode::PhaseMismatch,
            ValidationKind::CardNotInHand => ErrorCode::CardNotInHand,
            ValidationKind::CardAlreadyPlayed => ErrorCode::CardAlreadyPlayed,
            ValidationKind::NotDealer => ErrorCode::NotDealer,
            ValidationKind::EnvidoClosed => ErrorCode::EnvidoClosed,
            ValidationKind::EnvidoLadder => ErrorCode::EnvidoLadder,
            ValidationKind::EnvidoCards => ErrorCode::EnvidoCards,
            ValidationKind::TrucoLadder => ErrorCode::TrucoLadder,
            ValidationKind::TrucoHolder => ErrorCode::TrucoHolder,
            ValidationKind::GameFull => ErrorCode::GameFull,
            ValidationKind::NotSeated => ErrorCode::NotSeated,
            ValidationKind::MatchOver => ErrorCode::MatchOver,
            ValidationKind::ParseCard => ErrorCode::ParseCard,
            ValidationKind::InvalidPlayerCount => ErrorCode::InvalidPlayerCount,
            ValidationKind::InvalidRules => ErrorCode::InvalidRules,
            ValidationKind::Other(_) => ErrorCode::ValidationError,
        }
    }
}

impl From<&DomainError> for ErrorCode {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::Validation(kind, _) => kind.into(),
            DomainError::NotFound(NotFoundKind::Game, _) => ErrorCode::GameNotFound,
            DomainError::NotFound(NotFoundKind::Player, _) => ErrorCode::PlayerNotFound,
            DomainError::NotFound(NotFoundKind::Hand, _) => ErrorCode::HandNotFound,
            DomainError::InsufficientCards { .. } => ErrorCode::InsufficientCards,
            DomainError::Unimplemented(..) => ErrorCode::Unimplemented,
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let code = ErrorCode::from(&err);
        let detail = err.detail();
        match err {
            DomainError::Validation(..) => AppError::invalid(code, detail),
            DomainError::NotFound(..) => AppError::not_found(code, detail),
            DomainError::InsufficientCards { .. } => AppError::internal(code, detail),
            DomainError::Unimplemented(..) => AppError::Validation {
                code,
                detail,
                status: StatusCode::NOT_IMPLEMENTED,
            },
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code().as_str();

        let problem_details = ProblemDetails {
            type_: format!("urn:truco:error:{}", code.to_lowercase()),
            title: Self::humanize_code(code),
            status: status.as_u16(),
            detail: self.detail(),
            code: code.to_string(),
        };

        HttpResponse::build(status)
            .content_type("application/problem+json")
            .json(problem_details)
    }
}
