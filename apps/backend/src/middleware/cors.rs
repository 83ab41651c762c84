use std::env;

use actix_cors::Cors;
use actix_web::http::header;

/// Build CORS middleware for the browser client.
///
/// Origins come from the comma-separated `TRUCO_CORS_ORIGINS`; entries
/// that are empty, `null` or not http(s) are ignored. With nothing valid
/// configured only the local dev client is allowed.
pub fn cors_middleware() -> Cors {
    let allowed_raw = env::var("TRUCO_CORS_ORIGINS").unwrap_or_default();
    let mut origins = parse_origins(&allowed_raw);
    if origins.is_empty() {
        origins = vec![
            "http://localhost:3000".to_string(),
            "http://127.0.0.1:3000".to_string(),
        ];
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);
    for origin in origins {
        cors = cors.allowed_origin(&origin);
    }
    cors
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect()
}
