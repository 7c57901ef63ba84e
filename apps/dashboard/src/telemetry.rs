use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer, Registry};

const DEFAULT_FILTER: &str = "info,dashboard=info,actix_web=info,sqlx=warn,sea_orm=warn";

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the filter. `DASHBOARD_LOG_FORMAT=pretty` switches
/// from JSON lines to human-readable output for local runs.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let pretty = std::env::var("DASHBOARD_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("pretty"))
        .unwrap_or(false);

    let output: Box<dyn Layer<Registry> + Send + Sync> = if pretty {
        fmt::layer().with_target(true).compact().boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_ansi(false)
            .json()
            .with_current_span(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(output)
        .with(env_filter)
        .init();
}
