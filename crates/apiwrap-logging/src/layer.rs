//! Subscriber installation

use crate::level::{level_filter, set_active_level};
use apiwrap_core::LogLevel;
use tracing_subscriber::EnvFilter;

/// Environment variable holding filter directives, e.g. `apiwrap_core=debug`
pub const LOG_ENV_VAR: &str = "APIWRAP_LOG";

/// Build the event filter for `level`, refined by optional directives.
///
/// Directives use the `EnvFilter` syntax; malformed ones are ignored rather
/// than failing start-up.
pub fn build_filter(level: LogLevel, directives: Option<&str>) -> EnvFilter {
    let default = level_filter(level).into();
    match directives.map(str::trim) {
        Some(directives) if !directives.is_empty() => EnvFilter::builder()
            .with_default_directive(default)
            .parse_lossy(directives),
        _ => EnvFilter::default().add_directive(default),
    }
}

/// Initialize logging at a fixed level
///
/// Returns `false` when a global subscriber was already installed; the
/// existing one is kept.
pub fn init_logging(level: LogLevel) -> bool {
    install(level, build_filter(level, None))
}

/// Initialize logging from [`LOG_ENV_VAR`], falling back to `default`
pub fn init_logging_from_env(default: LogLevel) -> bool {
    let directives = std::env::var(LOG_ENV_VAR).ok();
    install(default, build_filter(default, directives.as_deref()))
}

fn install(level: LogLevel, filter: EnvFilter) -> bool {
    use tracing_subscriber::prelude::*;

    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false),
    );

    // Try to set as global default (ignore error if already set)
    let installed = tracing::subscriber::set_global_default(subscriber).is_ok();
    if installed {
        set_active_level(level);
        tracing::debug!(level = %level, "logging initialised");
    }
    installed
}
