//! Manifest parsing and validation

use anyhow::{Context, Result};
use apiwrap_core::{GeneratorConfig, Naming};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// apiwrap.toml manifest structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub library: LibrarySection,

    #[serde(default)]
    pub exclude: ExcludeSection,

    #[serde(default)]
    pub hand_written: HandWrittenSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibrarySection {
    #[serde(default = "default_prefix")]
    pub prefix: String,

    #[serde(default = "default_module")]
    pub module: String,

    #[serde(default = "default_binding")]
    pub binding: String,

    #[serde(default = "default_central_class")]
    pub central_class: String,
}

impl Default for LibrarySection {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            module: default_module(),
            binding: default_binding(),
            central_class: default_central_class(),
        }
    }
}

fn default_prefix() -> String {
    "linphone".to_string()
}

fn default_module() -> String {
    "linphone".to_string()
}

fn default_binding() -> String {
    "pylinphone".to_string()
}

fn default_central_class() -> String {
    "Core".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcludeSection {
    #[serde(default)]
    pub classes: BTreeSet<String>,

    #[serde(default)]
    pub events: BTreeSet<String>,

    #[serde(default)]
    pub functions: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HandWrittenSection {
    #[serde(default)]
    pub functions: BTreeSet<String>,
}

impl Manifest {
    /// Load manifest from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read manifest: {:?}", path.as_ref()))?;

        Self::from_str(&content)
    }

    /// Parse manifest from string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse manifest")
    }

    /// Validate the manifest
    pub fn validate(&self) -> Result<()> {
        let library = &self.library;
        for (field, value) in [
            ("prefix", &library.prefix),
            ("module", &library.module),
            ("binding", &library.binding),
            ("central_class", &library.central_class),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("[library] {} cannot be empty", field);
            }
        }

        let excluded = self
            .exclude
            .classes
            .iter()
            .chain(&self.exclude.events)
            .chain(&self.exclude.functions);
        for name in excluded {
            if name.is_empty() {
                anyhow::bail!("[exclude] entries cannot be empty");
            }
            if self.hand_written.functions.contains(name) {
                anyhow::bail!("'{}' is both excluded and hand-written", name);
            }
        }

        if self.hand_written.functions.iter().any(String::is_empty) {
            anyhow::bail!("[hand_written] entries cannot be empty");
        }

        Ok(())
    }

    /// Translate the manifest into the generator's configuration
    pub fn to_config(&self) -> GeneratorConfig {
        let naming = Naming {
            library_prefix: self.library.prefix.clone(),
            module_name: self.library.module.clone(),
            binding_prefix: self.library.binding.clone(),
        };

        GeneratorConfig {
            naming,
            central_class: self.library.central_class.clone(),
            blacklisted_classes: self.exclude.classes.clone(),
            blacklisted_events: self.exclude.events.clone(),
            blacklisted_functions: self.exclude.functions.clone(),
            hand_written_functions: self.hand_written.functions.clone(),
        }
    }
}

/// Load and validate a manifest, falling back to the defaults when no path is given
pub fn load(manifest_path: Option<&str>) -> Result<Manifest> {
    let manifest = match manifest_path {
        Some(path) => Manifest::from_file(path)?,
        None => {
            tracing::debug!("No manifest given, using defaults");
            Manifest::default()
        }
    };
    manifest.validate()?;

    Ok(manifest)
}

/// Check command implementation
pub fn check(manifest_path: Option<String>) -> Result<()> {
    let path = manifest_path.unwrap_or_else(|| "apiwrap.toml".to_string());

    println!("Checking manifest: {}", path);

    let manifest = load(Some(&path))?;

    println!(
        "✓ Library: {} (module {}, binding {})",
        manifest.library.prefix, manifest.library.module, manifest.library.binding
    );
    println!("✓ Central class: {}", manifest.library.central_class);
    println!(
        "✓ Excluded: {} classes, {} events, {} functions",
        manifest.exclude.classes.len(),
        manifest.exclude.events.len(),
        manifest.exclude.functions.len()
    );
    println!("✓ Hand-written: {}", manifest.hand_written.functions.len());
    println!("\nManifest is valid!");

    Ok(())
}

#[cfg(test)]
#[path = "manifest/manifest_tests.rs"]
mod manifest_tests;
