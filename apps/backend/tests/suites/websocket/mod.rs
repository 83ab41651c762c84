mod connection_tests;
mod error_handling_tests;
mod game_flow_tests;

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use truco_backend::ws::hub::WsRegistry;
use truco_backend::AppState;

use crate::support::websocket::{start_test_server, ws_url};
use crate::support::websocket_client::WebSocketClient;

pub struct TestServer {
    pub handle: actix_web::dev::ServerHandle,
    pub join: tokio::task::JoinHandle<Result<(), std::io::Error>>,
    pub url: String,
    pub registry: Arc<WsRegistry>,
}

impl TestServer {
    pub async fn start() -> Result<Self, Box<dyn std::error::Error>> {
        let state = AppState::for_tests();
        let registry = state.registry.clone();
        let (handle, addr, join) = start_test_server(state).await?;
        Ok(Self {
            handle,
            join,
            url: ws_url(addr),
            registry,
        })
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
        let _ = self.join.await;
    }
}

/// A connected client that has consumed its `connect` and first `gamesUpdate`.
pub struct Player {
    pub client: WebSocketClient,
    pub id: String,
    pub name: String,
}

pub async fn join_server(server: &TestServer) -> Result<Player, Box<dyn std::error::Error>> {
    let mut client = WebSocketClient::connect_retry(&server.url, Duration::from_secs(1)).await?;
    let connect = client.expect_event("connect").await?;
    client.expect_event("gamesUpdate").await?;
    Ok(Player {
        client,
        id: as_string(&connect["player"]["id"]),
        name: as_string(&connect["player"]["name"]),
    })
}

pub fn as_string(value: &Value) -> String {
    value.as_str().unwrap_or_default().to_string()
}

/// A two-seat match whose first hand is ready to be dealt.
pub struct Table {
    pub hand_id: String,
    pub dealer: Player,
    pub other: Player,
}

pub async fn start_match(server: &TestServer) -> Result<Table, Box<dyn std::error::Error>> {
    let mut a = join_server(server).await?;
    let mut b = join_server(server).await?;

    a.client
        .emit("createNewGame", serde_json::json!({ "playerId": a.id }))
        .await?;
    let hand_id = as_string(&a.client.expect_event("joinedHand").await?["handId"]);

    b.client
        .emit(
            "joinGame",
            serde_json::json!({ "playerId": b.id, "handId": hand_id }),
        )
        .await?;
    let joined = b.client.expect_event("joinedHand").await?;
    assert_eq!(joined["currentPlayers"], 2);
    let newcomer = a.client.expect_event("newPlayerJoined").await?;
    assert_eq!(newcomer["player"]["id"], b.id.as_str());

    let hand_a = a.client.expect_event("handUpdated").await?;
    let hand_b = b.client.expect_event("handUpdated").await?;
    assert_eq!(hand_a["hand"]["status"], "NOT_STARTED");
    assert_eq!(hand_a["hand"]["player_dealer"], hand_b["hand"]["player_dealer"]);

    let dealer_id = as_string(&hand_a["hand"]["player_dealer"]);
    let (dealer, other) = if dealer_id == a.id { (a, b) } else { (b, a) };
    Ok(Table {
        hand_id,
        dealer,
        other,
    })
}
