//! Routing of client events to the game flow.

use tracing::{debug, warn};

use crate::domain::PlayerId;
use crate::errors::domain::DomainError;
use crate::protocol::{ClientEvent, Notice, ServerEvent};
use crate::services::game_flow::{GameFlowService, Outbound};
use crate::state::app_state::AppState;

/// Handle one client event sent over `sender`'s connection.
///
/// Rejected events never change state and are answered with an `error`
/// push to the sender only.
pub fn route(state: &AppState, sender: PlayerId, event: ClientEvent) -> Vec<Outbound> {
    let name = event.name();
    match dispatch(state, sender, event) {
        Ok(outbound) => outbound,
        Err(err) => {
            debug!(player_id = %sender, event = name, error = %err, "[WS GAME] event rejected");
            vec![Outbound::to_player(sender, error_event(&err))]
        }
    }
}

fn dispatch(
    state: &AppState,
    sender: PlayerId,
    event: ClientEvent,
) -> Result<Vec<Outbound>, DomainError> {
    if event.player_id() != sender {
        warn!(
            player_id = %sender,
            claimed = %event.player_id(),
            event = event.name(),
            "[WS GAME] player id does not match connection"
        );
        return Err(DomainError::validation_other(
            "El jugador no corresponde a esta conexión",
        ));
    }

    let flow = GameFlowService::new(&state.games, &state.players);
    match event {
        ClientEvent::CreateNewGame { .. } => flow.create_game(sender),
        ClientEvent::JoinGame { hand_id, .. } => flow.join_game(sender, hand_id),
        ClientEvent::Message { message, .. } => Ok(vec![flow.chat(sender, message)?]),
        other => match other.into_hand_action() {
            Some((match_id, action)) => flow.apply_action(sender, match_id, action),
            None => Err(DomainError::validation_other("Evento no soportado")),
        },
    }
}

pub fn error_event(err: &DomainError) -> ServerEvent {
    let title = match err {
        DomainError::Validation(..) => "Acción inválida",
        DomainError::NotFound(..) => "No encontrado",
        DomainError::InsufficientCards { .. } => "Error de reparto",
        DomainError::Unimplemented(..) => "No disponible",
    };
    ServerEvent::Error(Notice::error(title, err.detail()))
}
