//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `server.log_level`. Production emits
/// JSON lines; other environments emit human-readable output.
pub fn init_tracing(server: &ServerConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_ansi(false)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
