//! Immutable lookup tables shared by every generator.
//!
//! The [`Registry`] is assembled once by the module builder, after all enums
//! and classes have been classified, and is then passed by reference into
//! type resolution and every call shape. Nothing mutates it afterwards.

use crate::error::{GenError, GenResult};
use crate::naming::Naming;
use crate::type_rule::{self, TypeRule};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// How a wrapper releases its native resource on teardown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Release {
    /// Shared ownership: `<prefix>unref`
    Unref,
    /// Sole ownership: `<prefix>destroy`
    Destroy,
    /// Native memory is owned elsewhere
    None,
}

impl Release {
    /// Pick the discipline from the description flags; refcounting wins
    pub fn from_flags(refcountable: bool, destroyable: bool) -> Self {
        match (refcountable, destroyable) {
            (true, _) => Release::Unref,
            (false, true) => Release::Destroy,
            (false, false) => Release::None,
        }
    }
}

/// Capability record of one generated class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassInfo {
    /// Canonical name, library prefix stripped (`Call`)
    pub name: String,
    /// Native struct name (`LinphoneCall`)
    pub c_name: String,
    /// Native function prefix (`linphone_call_`)
    pub c_function_prefix: String,
    pub release: Release,
    /// Whether the native object exposes a user-data slot
    pub has_user_data: bool,
}

impl ClassInfo {
    pub fn new(name: impl Into<String>, c_name: impl Into<String>, c_function_prefix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            c_name: c_name.into(),
            c_function_prefix: c_function_prefix.into(),
            release: Release::None,
            has_user_data: false,
        }
    }

    pub fn with_release(mut self, release: Release) -> Self {
        self.release = release;
        self
    }

    pub fn with_user_data(mut self, has_user_data: bool) -> Self {
        self.has_user_data = has_user_data;
        self
    }

    pub fn is_refcountable(&self) -> bool {
        self.release == Release::Unref
    }

    pub fn is_destroyable(&self) -> bool {
        self.release == Release::Destroy
    }

    /// Native function of this class, e.g. `native_function("get_user_data")`
    pub fn native_function(&self, suffix: &str) -> String {
        format!("{}{}", self.c_function_prefix, suffix)
    }
}

/// Lookup tables for one generation run.
#[derive(Debug, Clone)]
pub struct Registry {
    naming: Naming,
    central_class: String,
    enum_names: BTreeSet<String>,
    classes: BTreeMap<String, ClassInfo>,
}

impl Registry {
    pub fn builder(naming: Naming) -> RegistryBuilder {
        RegistryBuilder {
            naming,
            central_class: "Core".to_string(),
            enum_names: BTreeSet::new(),
            classes: BTreeMap::new(),
        }
    }

    pub fn naming(&self) -> &Naming {
        &self.naming
    }

    pub fn enum_names(&self) -> &BTreeSet<String> {
        &self.enum_names
    }

    pub fn is_enum(&self, basic_type: &str) -> bool {
        self.enum_names.contains(self.naming.strip(basic_type))
    }

    /// Look up a class by canonical name
    pub fn class(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.get(name)
    }

    /// Look up the class backing a native type token (`LinphoneCall`)
    pub fn class_for_type(&self, basic_type: &str) -> Option<&ClassInfo> {
        self.class(self.naming.strip(basic_type))
    }

    /// Like [`Registry::class_for_type`], failing with [`GenError::UnknownClass`]
    pub fn require_class(&self, basic_type: &str) -> GenResult<&ClassInfo> {
        self.class_for_type(basic_type)
            .ok_or_else(|| GenError::UnknownClass(basic_type.to_string()))
    }

    pub fn central_class_name(&self) -> &str {
        &self.central_class
    }

    /// The session class owning the callback registry
    pub fn central(&self) -> GenResult<&ClassInfo> {
        self.class(&self.central_class)
            .ok_or_else(|| GenError::UnknownClass(self.central_class.clone()))
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassInfo> {
        self.classes.values()
    }

    /// Resolve the marshalling rule of a native type against this registry's enums
    pub fn rule(&self, basic_type: &str, complete_type: &str) -> TypeRule {
        type_rule::resolve(
            basic_type,
            complete_type,
            &self.enum_names,
            &self.naming.library_prefix,
        )
    }
}

/// Accumulates enums and classes before freezing them into a [`Registry`].
#[derive(Debug)]
pub struct RegistryBuilder {
    naming: Naming,
    central_class: String,
    enum_names: BTreeSet<String>,
    classes: BTreeMap<String, ClassInfo>,
}

impl RegistryBuilder {
    pub fn central_class(mut self, name: impl Into<String>) -> Self {
        self.central_class = name.into();
        self
    }

    /// Register an enum by canonical name
    pub fn enum_name(mut self, name: impl Into<String>) -> Self {
        self.enum_names.insert(name.into());
        self
    }

    pub fn class(mut self, info: ClassInfo) -> Self {
        if let Some(previous) = self.classes.insert(info.name.clone(), info) {
            tracing::warn!(class = %previous.name, "duplicate class definition replaced");
        }
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            naming: self.naming,
            central_class: self.central_class,
            enum_names: self.enum_names,
            classes: self.classes,
        }
    }
}

#[cfg(test)]
#[path = "registry/registry_tests.rs"]
mod registry_tests;
