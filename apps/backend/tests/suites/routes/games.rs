use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use serde_json::Value;
use truco_backend::AppState;
use uuid::Uuid;

use crate::support::app_builder::create_test_app;

#[actix_web::test]
async fn lists_open_games_sorted_by_name() {
    let state = AppState::for_tests();
    state.games.create("Partida de B");
    state.games.create("Partida de A");
    let app = create_test_app(state).await;

    let req = test::TestRequest::get().uri("/api/games").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Partida de A", "Partida de B"]);
    assert_eq!(body[0]["currentPlayers"], 0);
}

#[actix_web::test]
async fn full_games_leave_the_lobby() {
    let state = AppState::for_tests();
    let (_, shared) = state.games.create("Partida de A");
    {
        let mut m = shared.lock();
        m.join(Uuid::new_v4(), "A").unwrap();
        m.join(Uuid::new_v4(), "B").unwrap();
    }
    let app = create_test_app(state).await;

    let req = test::TestRequest::get().uri("/api/games").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, serde_json::json!([]));
}

#[actix_web::test]
async fn game_summary_by_id() {
    let state = AppState::for_tests();
    let (id, shared) = state.games.create("Partida de A");
    shared.lock().join(Uuid::new_v4(), "A").unwrap();
    let app = create_test_app(state).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["id"], id.to_string());
    assert_eq!(body["name"], "Partida de A");
    assert_eq!(body["currentPlayers"], 1);
}

#[actix_web::test]
async fn unknown_game_is_problem_details_404() {
    let app = create_test_app(AppState::for_tests()).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{}", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "GAME_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("not found"),
    )
    .await;
}

#[actix_web::test]
async fn malformed_game_id_is_bad_request() {
    let app = create_test_app(AppState::for_tests()).await;

    let req = test::TestRequest::get()
        .uri("/api/games/not-a-uuid")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_GAME_ID",
        StatusCode::BAD_REQUEST,
        Some("not-a-uuid"),
    )
    .await;
}
