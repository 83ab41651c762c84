pub mod cors;
pub mod request_logger;

pub use cors::cors_middleware;
pub use request_logger::RequestLogger;
