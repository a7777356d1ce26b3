//! apiwrap-logging - Diagnostics setup for the generator
//!
//! This crate provides:
//! - [`init_logging`] and [`init_logging_from_env`] to install a `tracing`
//!   subscriber writing to stderr
//! - [`level_filter`] mapping a [`LogLevel`] to a `tracing` level filter
//! - [`active_level`] reporting the level the subscriber was installed with

mod layer;
mod level;

pub use apiwrap_core::LogLevel;
pub use layer::{LOG_ENV_VAR, build_filter, init_logging, init_logging_from_env};
pub use level::{active_level, from_tracing_level, level_filter};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LogLevel, init_logging, init_logging_from_env};
}
