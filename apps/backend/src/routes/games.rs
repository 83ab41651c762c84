//! Game-related HTTP routes.

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::domain::MatchId;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::app_state::AppState;

/// GET /api/games
///
/// Open matches, the same list pushed to sockets as `gamesUpdate`.
async fn list_games(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(app_state.games.available()))
}

/// GET /api/games/{game_id}
async fn get_game(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_game_id(&path)?;
    let summary = app_state.games.summary(id)?;
    Ok(HttpResponse::Ok().json(summary))
}

fn parse_game_id(raw: &str) -> Result<MatchId, AppError> {
    Uuid::parse_str(raw).map_err(|_| {
        AppError::bad_request(
            ErrorCode::InvalidGameId,
            format!("Invalid game id: {raw}"),
        )
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_games))
        .route("/{game_id}", web::get().to(get_game));
}
