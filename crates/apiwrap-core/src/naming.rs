//! Naming convention utilities for code generation.
//!
//! Native identifiers carry a library prefix (`LinphoneCall`,
//! `linphone_call_get_state`); the generated module exposes them without it
//! (`linphone.Call`). Generated C identifiers follow a fixed scheme built by
//! [`Naming`]:
//!
//! | Concept | Example |
//! |---------|---------|
//! | wrapper struct | `pylinphone_CallObject` |
//! | type object | `pylinphone_CallType` |
//! | native pointer accessor | `pylinphone_Call_get_native_ptr` |
//! | adopting factory | `pylinphone_Call_new_from_native_ptr` |
//! | member function | `pylinphone_Call_get_state` |
//! | event callback | `pylinphone_Core_callback_call_state_changed` |

use serde::{Deserialize, Serialize};

/// Remove `prefix` from the start of `s`, compared case-insensitively.
///
/// The prefix is removed repeatedly, so the result never starts with it and
/// applying the function twice equals applying it once.
///
/// # Examples
///
/// ```
/// use apiwrap_core::naming::strip_leading_prefix;
///
/// assert_eq!(strip_leading_prefix("LinphoneCall", "linphone"), "Call");
/// assert_eq!(strip_leading_prefix("linphone_call_new", "linphone"), "_call_new");
/// assert_eq!(strip_leading_prefix("bool_t", "linphone"), "bool_t");
/// ```
pub fn strip_leading_prefix<'a>(s: &'a str, prefix: &str) -> &'a str {
    if prefix.is_empty() {
        return s;
    }
    let mut rest = s;
    while let Some(head) = rest.get(..prefix.len()) {
        if !head.eq_ignore_ascii_case(prefix) {
            break;
        }
        rest = &rest[prefix.len()..];
    }
    rest
}

/// Derive the short event name of a native callback type.
///
/// Strips the library prefix, then the fixed `Core` head and `Cb` tail, and
/// converts the remaining CamelCase to a lowercase, underscore-delimited
/// identifier.
///
/// # Examples
///
/// ```
/// use apiwrap_core::naming::compute_event_name;
///
/// assert_eq!(
///     compute_event_name("LinphoneCoreCallStateChangedCb", "linphone"),
///     "call_state_changed"
/// );
/// assert_eq!(compute_event_name("LinphoneCoreDtmfReceivedCb", "linphone"), "dtmf_received");
/// ```
pub fn compute_event_name(native_name: &str, library_prefix: &str) -> String {
    let s = strip_leading_prefix(native_name, library_prefix);
    let s = s.strip_prefix("Core").unwrap_or(s);
    let s = s.strip_suffix("Cb").unwrap_or(s);
    camel_to_snake(s)
}

/// Convert CamelCase to snake_case, inserting one underscore before every
/// uppercase letter except the first character.
///
/// # Examples
///
/// ```
/// use apiwrap_core::naming::camel_to_snake;
///
/// assert_eq!(camel_to_snake("RegistrationStateChanged"), "registration_state_changed");
/// assert_eq!(camel_to_snake("already"), "already");
/// ```
pub fn camel_to_snake(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            result.push('_');
        }
        result.extend(c.to_lowercase());
    }
    result
}

/// Remove every `const` qualifier token from a C type spelling.
///
/// # Examples
///
/// ```
/// use apiwrap_core::naming::remove_const;
///
/// assert_eq!(remove_const("const LinphoneAddress *"), "LinphoneAddress *");
/// assert_eq!(remove_const("char * const"), "char *");
/// ```
pub fn remove_const(complete_type: &str) -> String {
    complete_type
        .split_whitespace()
        .filter(|token| *token != "const")
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strip a native function prefix from a function name.
///
/// Names that do not start with the prefix are returned unchanged.
pub fn member_name<'a>(native_name: &'a str, function_prefix: &str) -> &'a str {
    if function_prefix.is_empty() {
        return native_name;
    }
    native_name.strip_prefix(function_prefix).unwrap_or(native_name)
}

/// Identifier scheme for one generated module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Naming {
    /// Prefix carried by native type and constant names (`linphone`)
    #[serde(default = "default_library_prefix")]
    pub library_prefix: String,

    /// Name of the generated extension module (`linphone`)
    #[serde(default = "default_module_name")]
    pub module_name: String,

    /// Prefix of every generated C identifier (`pylinphone`)
    #[serde(default = "default_binding_prefix")]
    pub binding_prefix: String,
}

fn default_library_prefix() -> String {
    "linphone".to_string()
}

fn default_module_name() -> String {
    "linphone".to_string()
}

fn default_binding_prefix() -> String {
    "pylinphone".to_string()
}

impl Default for Naming {
    fn default() -> Self {
        Self {
            library_prefix: default_library_prefix(),
            module_name: default_module_name(),
            binding_prefix: default_binding_prefix(),
        }
    }
}

impl Naming {
    /// Canonical (prefix-free) form of a native name
    pub fn strip<'a>(&self, native: &'a str) -> &'a str {
        strip_leading_prefix(native, &self.library_prefix)
    }

    pub fn event_name(&self, native: &str) -> String {
        compute_event_name(native, &self.library_prefix)
    }

    /// `pylinphone_CallObject`
    pub fn object_struct(&self, class: &str) -> String {
        format!("{}_{}Object", self.binding_prefix, class)
    }

    /// `pylinphone_CallType`
    pub fn type_object(&self, class: &str) -> String {
        format!("{}_{}Type", self.binding_prefix, class)
    }

    pub fn get_native_ptr(&self, class: &str) -> String {
        format!("{}_{}_get_native_ptr", self.binding_prefix, class)
    }

    pub fn new_from_native_ptr(&self, class: &str) -> String {
        format!("{}_{}_new_from_native_ptr", self.binding_prefix, class)
    }

    /// `pylinphone_Call_get_state`
    pub fn member_function(&self, class: &str, member: &str) -> String {
        format!("{}_{}_{}", self.binding_prefix, class, member)
    }

    /// `pylinphone_Core_callback_call_state_changed`
    pub fn event_callback(&self, central_class: &str, event: &str) -> String {
        format!("{}_{}_callback_{}", self.binding_prefix, central_class, event)
    }

    /// `linphone.Call`, as shown to users in error messages
    pub fn qualified(&self, class: &str) -> String {
        format!("{}.{}", self.module_name, class)
    }

    pub fn trace_function(&self) -> String {
        format!("{}_trace", self.binding_prefix)
    }

    pub fn dispatch_messages(&self) -> String {
        format!("{}_dispatch_messages", self.binding_prefix)
    }

    /// Bracketed tag opening every trace line (`[PYLINPHONE]`)
    pub fn trace_tag(&self) -> String {
        format!("[{}]", self.binding_prefix.to_uppercase())
    }
}
