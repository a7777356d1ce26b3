//! Generator configuration types

use crate::naming::Naming;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Configuration for one generation run.
///
/// The exclusion and hand-written sets hold native names exactly as they
/// appear in the API description (`LinphoneBuffer`,
/// `linphone_core_get_sound_devices`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Identifier scheme for the generated module
    #[serde(default)]
    pub naming: Naming,

    /// Canonical name of the session class that owns the callback registry
    #[serde(default = "default_central_class")]
    pub central_class: String,

    /// Classes left out of the generated module
    #[serde(default)]
    pub blacklisted_classes: BTreeSet<String>,

    /// Callback types left out of the session registry
    #[serde(default)]
    pub blacklisted_events: BTreeSet<String>,

    /// Functions never exposed, whether as methods or as property accessors
    #[serde(default)]
    pub blacklisted_functions: BTreeSet<String>,

    /// Functions whose bodies are supplied by hand instead of generated
    #[serde(default)]
    pub hand_written_functions: BTreeSet<String>,
}

fn default_central_class() -> String {
    "Core".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            naming: Naming::default(),
            central_class: default_central_class(),
            blacklisted_classes: BTreeSet::new(),
            blacklisted_events: BTreeSet::new(),
            blacklisted_functions: BTreeSet::new(),
            hand_written_functions: BTreeSet::new(),
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from JSON bytes; empty input yields the defaults
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes)
    }

    pub fn with_naming(mut self, naming: Naming) -> Self {
        self.naming = naming;
        self
    }

    pub fn with_central_class(mut self, class: impl Into<String>) -> Self {
        self.central_class = class.into();
        self
    }

    pub fn blacklist_class(mut self, name: impl Into<String>) -> Self {
        self.blacklisted_classes.insert(name.into());
        self
    }

    pub fn blacklist_event(mut self, name: impl Into<String>) -> Self {
        self.blacklisted_events.insert(name.into());
        self
    }

    pub fn blacklist_function(mut self, name: impl Into<String>) -> Self {
        self.blacklisted_functions.insert(name.into());
        self
    }

    pub fn hand_write(mut self, name: impl Into<String>) -> Self {
        self.hand_written_functions.insert(name.into());
        self
    }

    pub fn is_class_excluded(&self, native_name: &str) -> bool {
        self.blacklisted_classes.contains(native_name)
    }

    pub fn is_event_excluded(&self, native_name: &str) -> bool {
        self.blacklisted_events.contains(native_name)
    }

    pub fn is_function_excluded(&self, native_name: &str) -> bool {
        self.blacklisted_functions.contains(native_name)
    }

    pub fn is_hand_written(&self, native_name: &str) -> bool {
        self.hand_written_functions.contains(native_name)
    }
}
