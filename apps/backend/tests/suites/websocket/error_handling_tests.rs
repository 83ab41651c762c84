use std::time::Duration;

use serde_json::json;

use super::{join_server, start_match, TestServer};

const QUIET: Duration = Duration::from_millis(200);

#[tokio::test]
async fn out_of_turn_play_errors_only_the_sender() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start().await?;
    let mut t = start_match(&server).await?;

    t.dealer
        .client
        .emit(
            "dealCards",
            json!({ "playerId": t.dealer.id, "handId": t.hand_id }),
        )
        .await?;
    let dealt = t.dealer.client.expect_event("handUpdated").await?;
    t.other.client.expect_event("handUpdated").await?;

    // The dealer is not mano and may not lead.
    let card = dealt["hand"]["cards_dealed"][0].clone();
    t.dealer
        .client
        .emit(
            "playCard",
            json!({
                "playerId": t.dealer.id,
                "handId": t.hand_id,
                "suit": card["suit"],
                "rank": card["rank"],
            }),
        )
        .await?;

    let err = t.dealer.client.expect_event("error").await?;
    assert_eq!(err["type"], "error");
    assert!(!err["text"].as_str().unwrap_or_default().is_empty());
    t.other.client.expect_no_event("error", QUIET).await?;
    t.other.client.expect_no_event("handUpdated", QUIET).await?;

    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn only_the_dealer_deals() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start().await?;
    let mut t = start_match(&server).await?;

    t.other
        .client
        .emit(
            "dealCards",
            json!({ "playerId": t.other.id, "handId": t.hand_id }),
        )
        .await?;
    let err = t.other.client.expect_event("error").await?;
    assert_eq!(err["title"], "Acción inválida");
    t.dealer.client.expect_no_event("handUpdated", QUIET).await?;

    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn flor_is_reported_unavailable() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start().await?;
    let mut t = start_match(&server).await?;

    t.other
        .client
        .emit(
            "chantFlor",
            json!({ "playerId": t.other.id, "handId": t.hand_id }),
        )
        .await?;
    let err = t.other.client.expect_event("error").await?;
    assert_eq!(err["title"], "No disponible");

    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn garbage_frames_keep_the_connection() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start().await?;
    let mut a = join_server(&server).await?;

    a.client.send_text("not json").await?;
    a.client
        .send_text(r#"{"event":"noSuchEvent","payload":{}}"#)
        .await?;
    a.client.expect_no_event("error", QUIET).await?;

    a.client
        .emit("createNewGame", json!({ "playerId": a.id }))
        .await?;
    a.client.expect_event("joinedHand").await?;

    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn spoofed_player_id_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start().await?;
    let mut a = join_server(&server).await?;
    let b = join_server(&server).await?;

    a.client
        .emit("createNewGame", json!({ "playerId": b.id }))
        .await?;
    a.client.expect_event("error").await?;

    drop(b);
    server.stop().await;
    Ok(())
}
