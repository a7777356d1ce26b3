//! # apiwrap
//!
//! Generate CPython extension bindings from a native C library's API
//! description.
//!
//! The generator reads the description tree (classes, enums, properties and
//! callback types of a library such as linphone) and produces, per class,
//! the C fragments of the extension module:
//! - method bodies for each of the seven call shapes, with handle checks,
//!   argument validation, entry and exit tracing and value conversion
//! - property accessor wiring for the `PyGetSetDef` table
//! - wrapper lifecycle (`new`, `new_from_native_ptr`, `dealloc`)
//! - callback trampolines for the session class, acquiring the interpreter
//!   lock before touching Python state
//!
//! Assembling the fragments into source files is left to a template step
//! that consumes the [`ModuleDescriptor`].
//!
//! ## Quick Start
//!
//! ```
//! use apiwrap::prelude::*;
//!
//! let api = br#"{
//!     "tag": "api",
//!     "children": [{
//!         "tag": "classes",
//!         "children": [{
//!             "tag": "class",
//!             "attributes": { "name": "LinphoneFoo", "cfunctionprefix": "linphone_foo_" }
//!         }]
//!     }]
//! }"#;
//!
//! let tree = ApiNode::from_json(api)?;
//! let module = generate(&tree, &GeneratorConfig::default())?;
//!
//! assert_eq!(module.classes[0].name(), "Foo");
//! # Ok::<(), GenError>(())
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`apiwrap_core`] - Description tree, type rules, call shapes and builders
//! - [`apiwrap_logging`] - `tracing` subscriber setup

// Re-export core types
pub use apiwrap_core::{
    ApiNode, CallShape, ClassBuilder, ClassDescriptor, ClassInfo, DocFormatter, EnumDescriptor,
    EventDescriptor, GenError, GenResult, GeneratorConfig, LogLevel, MemberDescriptor,
    ModuleBuilder, ModuleDescriptor, Naming, PlainDocFormatter, PropertyDescriptor, Release,
    SemanticKind, TypeRule, generate,
};

// Re-export submodules for lower-level access
pub use apiwrap_core::{naming, type_rule};

// Re-export logging setup
pub use apiwrap_logging::{init_logging, init_logging_from_env};

// Re-export common dependencies that generator users need
pub use serde_json;
pub use tracing;

/// Prelude module for convenient imports.
///
/// Use `use apiwrap::prelude::*;` to import commonly used types.
pub mod prelude {
    pub use crate::{
        ApiNode, DocFormatter, GenError, GenResult, GeneratorConfig, LogLevel, ModuleBuilder,
        ModuleDescriptor, Naming, generate, init_logging,
    };
}
