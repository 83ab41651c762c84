use actix_web::test;
use serde_json::Value;
use truco_backend::AppState;

use crate::support::app_builder::create_test_app;

#[actix_web::test]
async fn health_reports_ok_and_version() {
    let app = create_test_app(AppState::for_tests()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["app_version"], env!("CARGO_PKG_VERSION"));
    assert!(body["time"].as_str().is_some_and(|t| !t.is_empty()));
}

#[actix_web::test]
async fn root_greets() {
    let app = create_test_app(AppState::for_tests()).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().contains("Truco"));
}
