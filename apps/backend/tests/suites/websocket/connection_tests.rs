use std::time::Duration;

use serde_json::json;

use super::{join_server, TestServer};
use crate::support::websocket::wait_for_connections;

#[tokio::test]
async fn connect_pushes_player_then_lobby() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start().await?;

    let a = join_server(&server).await?;
    let b = join_server(&server).await?;
    assert!(a.name.starts_with("Anónimo#"));
    assert!(b.name.starts_with("Anónimo#"));
    assert_ne!(a.id, b.id);
    wait_for_connections(&server.registry, 2, Duration::from_secs(2)).await?;

    drop(a);
    drop(b);
    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn lobby_follows_create_and_disconnect() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start().await?;
    let mut a = join_server(&server).await?;
    let mut b = join_server(&server).await?;

    a.client
        .emit("createNewGame", json!({ "playerId": a.id }))
        .await?;
    let joined = a.client.expect_event("joinedHand").await?;
    assert_eq!(joined["name"], format!("Partida de {}", a.name));
    assert_eq!(joined["currentPlayers"], 1);

    let lobby = b.client.expect_event("gamesUpdate").await?;
    assert_eq!(lobby["gamesList"][0]["id"], joined["handId"]);
    assert_eq!(lobby["gamesList"][0]["currentPlayers"], 1);

    // The creator leaves before anyone joins: the match disappears.
    a.client.close().await?;
    let lobby = b.client.expect_event("gamesUpdate").await?;
    assert_eq!(lobby["gamesList"], json!([]));
    wait_for_connections(&server.registry, 1, Duration::from_secs(2)).await?;

    b.client.close().await?;
    wait_for_connections(&server.registry, 0, Duration::from_secs(2)).await?;
    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn chat_reaches_everyone() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start().await?;
    let mut a = join_server(&server).await?;
    let mut b = join_server(&server).await?;

    a.client
        .emit("message", json!({ "playerId": a.id, "message": "buenas" }))
        .await?;

    for client in [&mut a.client, &mut b.client] {
        let msg = client.expect_event("message").await?;
        assert_eq!(msg["message"]["text"], "buenas");
        assert_eq!(msg["message"]["player"], a.name.as_str());
        assert_eq!(msg["message"]["time"].as_str().map(str::len), Some(8));
    }

    server.stop().await;
    Ok(())
}
