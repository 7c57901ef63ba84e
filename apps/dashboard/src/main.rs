use actix_web::{web, App, HttpServer};
use dashboard::infra::state::build_state;
use dashboard::middleware::cors::cors_middleware;
use dashboard::middleware::request_trace::RequestTrace;
use dashboard::middleware::structured_logger::StructuredLogger;
use dashboard::routes;
use dashboard::state::security_config::SecurityConfig;
use db_infra::{DbKind, RuntimeEnv};
use tracing::{error, info};

mod telemetry;

fn fail(message: &str) -> ! {
    error!("{message}");
    eprintln!("❌ {message}");
    std::process::exit(1);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Configuration comes from the environment only.
    let host = std::env::var("DASHBOARD_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("DASHBOARD_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| fail("DASHBOARD_PORT must be a valid port number"));

    let jwt = std::env::var("DASHBOARD_JWT_SECRET")
        .unwrap_or_else(|_| fail("DASHBOARD_JWT_SECRET must be set"));

    let db_kind = match std::env::var("DASHBOARD_DB") {
        Ok(raw) => raw
            .parse::<DbKind>()
            .unwrap_or_else(|e| fail(&e.to_string())),
        Err(_) => DbKind::Postgres,
    };

    let app_state = match build_state()
        .with_env(RuntimeEnv::Prod)
        .with_db(db_kind)
        .with_security(SecurityConfig::new(jwt.into_bytes()))
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => fail(&format!("Failed to build application state: {e}")),
    };

    info!(host = %host, port, db = ?db_kind, "dashboard backend starting");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
