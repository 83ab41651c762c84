use actix_web::{web, App, HttpServer};
use tracing::{error, info};
use truco_backend::config::ServerConfig;
use truco_backend::middleware::{cors_middleware, RequestLogger};
use truco_backend::routes;
use truco_backend::state::app_state::AppState;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let app_state = match AppState::new(config.clone()) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        num_players = config.num_players,
        target_score = config.target_score,
        "Starting Truco backend"
    );

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(RequestLogger)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
