use std::env;

use actix_cors::Cors;
use actix_web::http::header;

const DEV_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Parse a comma-separated origin list, keeping only http(s) origins.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect()
}

/// CORS for the dashboard frontend. Origins come from `CORS_ALLOWED_ORIGINS`,
/// falling back to the local dev server.
pub fn cors_middleware() -> Cors {
    let mut origins = parse_origins(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());
    if origins.is_empty() {
        origins = DEV_ORIGINS.iter().map(|s| s.to_string()).collect();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .expose_headers(vec![
            header::HeaderName::from_static("x-trace-id"),
            header::HeaderName::from_static("x-request-id"),
        ])
        .max_age(3600);

    for origin in &origins {
        cors = cors.allowed_origin(origin);
    }
    cors
}
