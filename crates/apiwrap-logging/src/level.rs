//! Level conversions and the process-wide active level

use apiwrap_core::LogLevel;
use once_cell::sync::OnceCell;
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;

static ACTIVE_LEVEL: OnceCell<LogLevel> = OnceCell::new();

/// Convert LogLevel to tracing LevelFilter
pub fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Trace => LevelFilter::TRACE,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Off => LevelFilter::OFF,
    }
}

/// Convert tracing Level to our LogLevel
pub fn from_tracing_level(level: &Level) -> LogLevel {
    match *level {
        Level::TRACE => LogLevel::Trace,
        Level::DEBUG => LogLevel::Debug,
        Level::INFO => LogLevel::Info,
        Level::WARN => LogLevel::Warn,
        Level::ERROR => LogLevel::Error,
    }
}

/// Level of the installed subscriber, `None` before initialisation
pub fn active_level() -> Option<LogLevel> {
    ACTIVE_LEVEL.get().copied()
}

/// Record the level of a freshly installed subscriber; the first one wins
pub(crate) fn set_active_level(level: LogLevel) {
    let _ = ACTIVE_LEVEL.set(level);
}

#[cfg(test)]
#[path = "level/level_tests.rs"]
mod level_tests;
