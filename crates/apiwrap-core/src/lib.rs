//! apiwrap-core - Binding generation engine
//!
//! This crate turns a native library's API description into the C fragments
//! of a CPython extension module:
//! - [`ApiNode`] is the read-only description tree
//! - [`type_rule`] decides how each native type crosses the boundary
//! - [`Shape`] renders one of the seven call shapes through a five-stage pipeline
//! - [`ClassBuilder`] and [`ModuleBuilder`] classify the tree and drive rendering
//! - [`GenError`] reports failures with the owning class and member attached

pub mod class_builder;
pub mod config;
pub mod docs;
pub mod error;
pub mod model;
pub mod module_builder;
pub mod naming;
pub mod registry;
pub mod shapes;
pub mod tree;
pub mod type_rule;

#[cfg(test)]
mod test_support;

pub use class_builder::{ClassBuilder, ClassPlan};
pub use config::GeneratorConfig;
pub use docs::{DocFormatter, PlainDocFormatter};
pub use error::{GenError, GenResult};
pub use model::{
    CallShape, ClassDescriptor, EnumDescriptor, EnumValue, EventDescriptor, MemberDescriptor,
    MethodSignature, ModuleDescriptor, Param, PropertyDescriptor, ReturnDesc,
};
pub use module_builder::{ModuleBuilder, generate};
pub use naming::Naming;
pub use registry::{ClassInfo, Registry, RegistryBuilder, Release};
pub use shapes::{Shape, Stages};
pub use tree::ApiNode;
pub use type_rule::{SemanticKind, TypeRule};

/// Verbosity of generator diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    /// Parse a level name, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" => Ok(LogLevel::Off),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ApiNode, ClassDescriptor, DocFormatter, GenError, GenResult, GeneratorConfig, LogLevel,
        ModuleBuilder, ModuleDescriptor, Naming, generate,
    };
}
