use serde_json::{json, Value};

use super::{as_string, start_match, TestServer};

#[tokio::test]
async fn deal_then_mano_leads() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start().await?;
    let mut t = start_match(&server).await?;

    t.dealer
        .client
        .emit(
            "dealCards",
            json!({ "playerId": t.dealer.id, "handId": t.hand_id }),
        )
        .await?;

    let seen_by_dealer = t.dealer.client.expect_event("handUpdated").await?;
    let seen_by_other = t.other.client.expect_event("handUpdated").await?;
    let (dh, oh) = (&seen_by_dealer["hand"], &seen_by_other["hand"]);
    assert_eq!(dh["status"], "IN_PROGRESS");
    assert_eq!(seen_by_dealer["version"], seen_by_other["version"]);

    // Each seat sees only its own three cards.
    let dealer_cards = dh["cards_dealed"].as_array().unwrap().clone();
    let other_cards = oh["cards_dealed"].as_array().unwrap().clone();
    assert_eq!(dealer_cards.len(), 3);
    assert_eq!(other_cards.len(), 3);
    assert!(dealer_cards.iter().all(|c| !other_cards.contains(c)));
    assert_eq!(dh["cards_remaining"][t.other.id.as_str()], 3);

    // Two seats: the non-dealer is mano and leads.
    assert_eq!(dh["player_turn"], t.other.id.as_str());
    assert_eq!(dh["player_hand"], t.other.id.as_str());

    let lead: Value = other_cards[0].clone();
    t.other
        .client
        .emit(
            "playCard",
            json!({
                "playerId": t.other.id,
                "handId": t.hand_id,
                "suit": lead["suit"],
                "rank": lead["rank"],
            }),
        )
        .await?;

    let after = t.dealer.client.expect_event("handUpdated").await?;
    let hand = &after["hand"];
    assert_eq!(hand["cards_played"][t.other.id.as_str()], json!([lead]));
    assert_eq!(hand["player_turn"], t.dealer.id.as_str());
    assert!(after["version"].as_u64() > seen_by_dealer["version"].as_u64());

    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn declined_truco_scores_and_ends_the_hand() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start().await?;
    let mut t = start_match(&server).await?;

    t.dealer
        .client
        .emit(
            "dealCards",
            json!({ "playerId": t.dealer.id, "handId": t.hand_id }),
        )
        .await?;
    t.other.client.expect_event("handUpdated").await?;
    t.dealer.client.expect_event("handUpdated").await?;

    // Mano calls truco, the dealer backs down.
    t.other
        .client
        .emit(
            "chantTruco",
            json!({ "playerId": t.other.id, "handId": t.hand_id, "level": 1 }),
        )
        .await?;
    let locked = t.dealer.client.expect_event("handUpdated").await?;
    assert_eq!(locked["hand"]["status"], "LOCKED");
    assert_eq!(locked["hand"]["chant_turn"], t.dealer.id.as_str());

    t.dealer
        .client
        .emit(
            "responseToTruco",
            json!({ "playerId": t.dealer.id, "handId": t.hand_id, "level": 0 }),
        )
        .await?;

    let finished = t.other.client.expect_event("handUpdated").await?;
    assert_eq!(finished["hand"]["status"], "FINISHED");
    assert_eq!(finished["hand"]["winner"], t.other.id.as_str());

    let score = t.other.client.expect_event("updateScore").await?;
    assert_eq!(score["score"][t.other.id.as_str()], 1);
    assert_eq!(score["score"][t.dealer.id.as_str()], 0);
    assert!(score["winner"].is_null());

    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn rejoining_resyncs_the_hand() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start().await?;
    let mut t = start_match(&server).await?;

    t.other
        .client
        .emit(
            "joinGame",
            json!({ "playerId": t.other.id, "handId": t.hand_id }),
        )
        .await?;
    let joined = t.other.client.expect_event("joinedHand").await?;
    assert_eq!(joined["currentPlayers"], 2);
    let resync = t.other.client.expect_event("handUpdated").await?;
    assert_eq!(as_string(&resync["hand"]["id"]), t.hand_id);

    server.stop().await;
    Ok(())
}
