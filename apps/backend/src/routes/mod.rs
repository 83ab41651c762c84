use actix_web::web;

pub mod games;
pub mod health;
pub mod realtime;

/// Register every HTTP and WebSocket route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::root));

    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Games routes: /api/games/**
    cfg.service(web::scope("/api/games").configure(games::configure_routes));

    // Realtime routes: /ws
    cfg.service(web::scope("/ws").configure(realtime::configure_routes));
}
