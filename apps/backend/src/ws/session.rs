use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{debug, info, warn};

use crate::protocol::{ClientEvent, PlayerView, ServerEvent};
use crate::services::game_flow::GameFlowService;
use crate::state::app_state::AppState;
use crate::ws::game;
use crate::ws::hub::HubEvent;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

/// Open a session. Every connection is a new anonymous player, stored once
/// the session actor starts.
pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let player = app_state.players.next_player();
    let session = WsSession::new(player, app_state);
    ws::start(session, &req, stream)
}

pub struct WsSession {
    player: PlayerView,
    app_state: web::Data<AppState>,
    last_heartbeat: Instant,
}

impl WsSession {
    fn new(player: PlayerView, app_state: web::Data<AppState>) -> Self {
        Self {
            player,
            app_state,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerEvent) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(player_id = %actor.player.id, "[WS SESSION] heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn handle_text(&self, text: &str) {
        let event: ClientEvent = match serde_json::from_str(text) {
            Ok(event) => event,
            Err(err) => {
                warn!(
                    player_id = %self.player.id,
                    error = %err,
                    "[WS SESSION] ignoring malformed event"
                );
                return;
            }
        };
        debug!(player_id = %self.player.id, event = event.name(), "[WS SESSION] event received");
        let outbound = game::route(&self.app_state, self.player.id, event);
        self.app_state.registry.deliver(outbound);
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            player_id = %self.player.id,
            name = %self.player.name,
            "[WS SESSION] started"
        );

        self.app_state.players.insert(self.player.clone());
        let recipient = ctx.address().recipient::<HubEvent>();
        self.app_state.registry.register(self.player.id, recipient);
        self.start_heartbeat(ctx);

        let flow = GameFlowService::new(&self.app_state.games, &self.app_state.players);
        self.app_state.registry.deliver(flow.connected(&self.player));
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.app_state.registry.unregister(self.player.id);
        let flow = GameFlowService::new(&self.app_state.games, &self.app_state.players);
        self.app_state
            .registry
            .deliver(flow.disconnected(self.player.id));
        info!(player_id = %self.player.id, "[WS SESSION] stopped");
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                self.handle_text(&text);
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                warn!(player_id = %self.player.id, "[WS SESSION] ignoring binary frame");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(
                    player_id = %self.player.id,
                    error = %err,
                    "[WS SESSION] ignoring malformed frame"
                );
            }
        }
    }
}

impl Handler<HubEvent> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: HubEvent, ctx: &mut Self::Context) -> Self::Result {
        Self::send_json(ctx, &msg.0);
    }
}
