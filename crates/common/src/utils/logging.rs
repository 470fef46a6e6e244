use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Request spans from `tower_http` stay at info; per-statement sqlx logs are noise.
const DEFAULT_FILTER: &str = "info,tower_http=info,sqlx=warn,sea_orm_migration=warn";

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Human-readable one-line events on stdout. `RUST_LOG` overrides the filter.
pub fn init_logging_default() {
    let _ = fmt()
        .with_env_filter(filter())
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// One JSON object per event, with the span fields of the request flattened in.
pub fn init_logging_json() {
    let _ = fmt()
        .with_env_filter(filter())
        .json()
        .flatten_event(true)
        .with_current_span(true)
        .with_writer(io::stdout)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }

    #[test]
    fn init_twice_is_harmless() {
        init_logging_default();
        init_logging_json();
    }
}
