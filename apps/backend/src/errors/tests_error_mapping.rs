// Unit tests for error mapping - pure domain logic without HTTP dependencies
use crate::errors::domain::{Capability, DomainError, NotFoundKind, ValidationKind};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_to_422() {
    let de = DomainError::validation(ValidationKind::OutOfTurn, "Out of turn");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::OutOfTurn);
    assert_eq!(app.status().as_u16(), 422);
    assert_eq!(app.detail(), "Out of turn");
}

#[test]
fn maps_other_validation_to_generic_code() {
    let de = DomainError::validation_other("Invariant violated: dealer must be set");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
}

#[test]
fn maps_bad_request() {
    let app = AppError::bad_request(ErrorCode::InvalidGameId, "not a uuid");
    assert_eq!(app.code().as_str(), "INVALID_GAME_ID");
    assert_eq!(app.status().as_u16(), 400);
}

#[test]
fn maps_not_found() {
    let nf = DomainError::not_found(NotFoundKind::Game, "no game");
    let app: AppError = nf.into();
    assert_eq!(app.code().as_str(), "GAME_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);
}

#[test]
fn maps_engine_faults() {
    let short = DomainError::InsufficientCards {
        needed: 42,
        available: 40,
    };
    let app: AppError = short.into();
    assert_eq!(app.code(), ErrorCode::InsufficientCards);
    assert_eq!(app.status().as_u16(), 500);

    let flor = DomainError::unimplemented(Capability::Flor, "Flor is not available");
    let app: AppError = flor.into();
    assert_eq!(app.code(), ErrorCode::Unimplemented);
    assert_eq!(app.status().as_u16(), 501);
}

#[test]
fn humanizes_codes() {
    assert_eq!(AppError::humanize_code("GAME_NOT_FOUND"), "Game Not Found");
}
