#![allow(non_snake_case)]

use super::*;

// Manifest parsing tests

#[test]
fn Manifest___from_str___parses_full_manifest() {
    let toml = r#"
[library]
prefix = "linphone"
module = "linphone"
binding = "pylinphone"
central_class = "Core"

[exclude]
classes = ["LinphoneBuffer"]
events = ["LinphoneCoreFileTransferRecvCb"]
functions = ["linphone_core_get_sound_devices"]

[hand_written]
functions = ["linphone_core_new"]
"#;

    let manifest = Manifest::from_str(toml).unwrap();

    assert_eq!(manifest.library.binding, "pylinphone");
    assert!(manifest.exclude.classes.contains("LinphoneBuffer"));
    assert!(manifest.exclude.events.contains("LinphoneCoreFileTransferRecvCb"));
    assert!(manifest.exclude.functions.contains("linphone_core_get_sound_devices"));
    assert!(manifest.hand_written.functions.contains("linphone_core_new"));
}

#[test]
fn Manifest___from_str___empty_document_uses_defaults() {
    let manifest = Manifest::from_str("").unwrap();

    assert_eq!(manifest.library.prefix, "linphone");
    assert_eq!(manifest.library.module, "linphone");
    assert_eq!(manifest.library.binding, "pylinphone");
    assert_eq!(manifest.library.central_class, "Core");
    assert!(manifest.exclude.classes.is_empty());
    assert!(manifest.hand_written.functions.is_empty());
}

#[test]
fn Manifest___from_str___partial_library_section_fills_defaults() {
    let toml = r#"
[library]
binding = "pylp"
"#;

    let manifest = Manifest::from_str(toml).unwrap();

    assert_eq!(manifest.library.binding, "pylp");
    assert_eq!(manifest.library.prefix, "linphone");
}

#[test]
fn Manifest___from_str___invalid_toml___returns_error() {
    let result = Manifest::from_str("[library\nprefix = ");

    assert!(result.is_err());
}

#[test]
fn Manifest___from_str___wrong_field_type___returns_error() {
    let toml = r#"
[exclude]
classes = "LinphoneBuffer"
"#;

    assert!(Manifest::from_str(toml).is_err());
}

// Manifest validation tests

#[test]
fn Manifest___validate___defaults_are_valid() {
    assert!(Manifest::default().validate().is_ok());
}

#[test]
fn Manifest___validate___empty_prefix___returns_error() {
    let toml = r#"
[library]
prefix = ""
"#;
    let manifest = Manifest::from_str(toml).unwrap();

    let err = manifest.validate().unwrap_err();

    assert!(err.to_string().contains("prefix"));
}

#[test]
fn Manifest___validate___blank_binding___returns_error() {
    let toml = r#"
[library]
binding = "   "
"#;
    let manifest = Manifest::from_str(toml).unwrap();

    let err = manifest.validate().unwrap_err();

    assert!(err.to_string().contains("binding"));
}

#[test]
fn Manifest___validate___excluded_and_hand_written___returns_error() {
    let toml = r#"
[exclude]
functions = ["linphone_core_new"]

[hand_written]
functions = ["linphone_core_new"]
"#;
    let manifest = Manifest::from_str(toml).unwrap();

    let err = manifest.validate().unwrap_err();

    assert!(err.to_string().contains("linphone_core_new"));
}

#[test]
fn Manifest___validate___empty_exclusion_entry___returns_error() {
    let toml = r#"
[exclude]
events = [""]
"#;
    let manifest = Manifest::from_str(toml).unwrap();

    assert!(manifest.validate().is_err());
}

// Conversion tests

#[test]
fn Manifest___to_config___maps_every_section() {
    let toml = r#"
[library]
prefix = "belle"
module = "belle"
binding = "pybelle"
central_class = "Stack"

[exclude]
classes = ["BelleBuffer"]
events = ["BelleStackIdleCb"]
functions = ["belle_stack_get_devices"]

[hand_written]
functions = ["belle_stack_new"]
"#;
    let manifest = Manifest::from_str(toml).unwrap();

    let config = manifest.to_config();

    assert_eq!(config.naming.library_prefix, "belle");
    assert_eq!(config.naming.module_name, "belle");
    assert_eq!(config.naming.binding_prefix, "pybelle");
    assert_eq!(config.central_class, "Stack");
    assert!(config.is_class_excluded("BelleBuffer"));
    assert!(config.is_event_excluded("BelleStackIdleCb"));
    assert!(config.is_function_excluded("belle_stack_get_devices"));
    assert!(config.is_hand_written("belle_stack_new"));
}

#[test]
fn Manifest___to_config___defaults_match_generator_defaults() {
    assert_eq!(Manifest::default().to_config(), GeneratorConfig::default());
}

// load tests

#[test]
fn load___no_path___returns_defaults() {
    let manifest = load(None).unwrap();

    assert_eq!(manifest.library.central_class, "Core");
}

#[test]
fn load___missing_file___error_names_path() {
    let err = load(Some("/nonexistent/apiwrap.toml")).unwrap_err();

    assert!(format!("{err:#}").contains("Failed to read manifest"));
}

#[test]
fn load___invalid_manifest_file___fails_validation() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("apiwrap.toml");
    std::fs::write(&path, "[library]\nmodule = \"\"\n").unwrap();

    let err = load(path.to_str()).unwrap_err();

    assert!(err.to_string().contains("module"));
}
