use actix_web::test;
use truco_backend::AppState;

use crate::support::app_builder::create_test_app;

#[actix_web::test]
async fn failed_handshake_leaves_no_player() {
    let state = AppState::for_tests();
    let app = create_test_app(state.clone()).await;

    // Plain GET without upgrade headers.
    let req = test::TestRequest::get().uri("/ws").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_client_error());
    assert_eq!(state.players.count(), 0);
}
