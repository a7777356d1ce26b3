//! Generate command: API tree in, populated module model out

use crate::manifest;
use anyhow::{Context, Result};
use apiwrap_core::{ApiNode, ModuleDescriptor, generate};
use std::path::Path;

/// Read the API description tree from a JSON file
pub fn load_tree(path: impl AsRef<Path>) -> Result<ApiNode> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read API description: {:?}", path))?;

    ApiNode::from_json(&bytes)
        .with_context(|| format!("Failed to parse API description: {:?}", path))
}

/// Run generation for one API description and return the model
pub fn build_module(api: &str, manifest_path: Option<&str>) -> Result<ModuleDescriptor> {
    let manifest = manifest::load(manifest_path)?;
    let config = manifest.to_config();
    let tree = load_tree(api)?;

    let module = generate(&tree, &config)
        .with_context(|| format!("Failed to generate bindings from {:?}", api))?;

    Ok(module)
}

/// Generate command implementation
pub fn run(api: &str, output: &str, manifest_path: Option<String>) -> Result<()> {
    println!("Generating bindings from: {}", api);

    let module = build_module(api, manifest_path.as_deref())?;
    let json = module.to_json_pretty()?;

    let output_path = Path::new(output);
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
    }
    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write model: {:?}", output_path))?;

    tracing::info!(output = %output_path.display(), "Wrote module model");

    println!("✓ Module: {}", module.module_name);
    println!("✓ Enums: {}", module.enums.len());
    println!("✓ Classes: {}", module.classes.len());
    println!("✓ Events: {}", module.events().count());
    println!("\nModel written to {}", output_path.display());

    Ok(())
}
