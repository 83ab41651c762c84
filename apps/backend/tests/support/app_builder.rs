// In-process app for route tests

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use truco_backend::routes;
use truco_backend::state::app_state::AppState;

/// Build the production route table over `state`, without CORS.
pub async fn create_test_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await
}
