//! Integration tests for the apiwrap binary.
//!
//! Runs the compiled CLI against manifests and API trees written to a
//! temporary directory and checks output files and exit codes.

#![allow(non_snake_case)]

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

const API_TREE: &str = r#"{
  "tag": "api",
  "children": [
    {
      "tag": "classes",
      "children": [
        {
          "tag": "class",
          "attributes": { "name": "LinphoneCore", "cfunctionprefix": "linphone_core_" },
          "children": [
            {
              "tag": "instancemethods",
              "children": [
                {
                  "tag": "instancemethod",
                  "attributes": { "name": "linphone_core_invite" },
                  "children": [
                    { "tag": "return", "attributes": { "type": "LinphoneCall", "completetype": "LinphoneCall *" } },
                    {
                      "tag": "arguments",
                      "children": [
                        { "tag": "argument", "attributes": { "name": "lc", "type": "LinphoneCore", "completetype": "LinphoneCore *" } },
                        { "tag": "argument", "attributes": { "name": "url", "type": "char", "completetype": "const char *" } }
                      ]
                    }
                  ]
                }
              ]
            }
          ]
        },
        {
          "tag": "class",
          "attributes": { "name": "LinphoneCall", "cfunctionprefix": "linphone_call_", "refcountable": "true" }
        }
      ]
    }
  ]
}"#;

fn apiwrap() -> Command {
    Command::new(env!("CARGO_BIN_EXE_apiwrap"))
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// =============================================================================
// Generate
// =============================================================================

mod generate {
    use super::*;

    #[test]
    fn generate___valid_tree___writes_model_and_summary() {
        let dir = TempDir::new().unwrap();
        let api = write_file(&dir, "api.json", API_TREE);
        let output = dir.path().join("model.json");

        let result = apiwrap()
            .arg("generate")
            .arg("--api")
            .arg(&api)
            .arg("--output")
            .arg(&output)
            .output()
            .unwrap();

        assert!(result.status.success(), "stderr: {}", stderr(&result));
        assert!(stdout(&result).contains("✓ Classes: 2"));
        let model: serde_json::Value = serde_json::from_slice(&fs::read(&output).unwrap()).unwrap();
        assert_eq!(model["classes"][0]["name"], "Core");
        assert_eq!(model["classes"][1]["release"], "unref");
    }

    #[test]
    fn generate___with_manifest___applies_naming() {
        let dir = TempDir::new().unwrap();
        let api = write_file(&dir, "api.json", API_TREE);
        let manifest = write_file(&dir, "apiwrap.toml", "[library]\nbinding = \"pylp\"\n");
        let output = dir.path().join("model.json");

        let result = apiwrap()
            .args(["generate", "--api"])
            .arg(&api)
            .arg("--manifest")
            .arg(&manifest)
            .arg("--output")
            .arg(&output)
            .output()
            .unwrap();

        assert!(result.status.success(), "stderr: {}", stderr(&result));
        let model = fs::read_to_string(&output).unwrap();
        assert!(model.contains("pylp_Call_new_from_native_ptr"));
    }

    #[test]
    fn generate___missing_api_file___exits_with_one() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("model.json");

        let result = apiwrap()
            .args(["generate", "--api", "/nonexistent/api.json", "--output"])
            .arg(&output)
            .output()
            .unwrap();

        assert_eq!(result.status.code(), Some(1));
        assert!(stderr(&result).contains("Failed to read API description"));
        assert!(!output.exists());
    }

    #[test]
    fn generate___unknown_class___exits_with_generation_code() {
        let dir = TempDir::new().unwrap();
        let api = write_file(&dir, "api.json", API_TREE);
        let manifest = write_file(&dir, "apiwrap.toml", "[exclude]\nclasses = [\"LinphoneCall\"]\n");
        let output = dir.path().join("model.json");

        let result = apiwrap()
            .args(["generate", "--api"])
            .arg(&api)
            .arg("--manifest")
            .arg(&manifest)
            .arg("--output")
            .arg(&output)
            .output()
            .unwrap();

        assert_eq!(result.status.code(), Some(12));
        assert!(stderr(&result).contains("Core.invite"));
        assert!(!output.exists());
    }

    #[test]
    fn generate___malformed_tree___exits_with_json_code() {
        let dir = TempDir::new().unwrap();
        let api = write_file(&dir, "api.json", "{ \"tag\": ");
        let output = dir.path().join("model.json");

        let result = apiwrap()
            .args(["generate", "--api"])
            .arg(&api)
            .arg("--output")
            .arg(&output)
            .output()
            .unwrap();

        assert_eq!(result.status.code(), Some(16));
    }
}

// =============================================================================
// Check
// =============================================================================

mod check {
    use super::*;

    #[test]
    fn check___valid_manifest___reports_sections() {
        let dir = TempDir::new().unwrap();
        let manifest = write_file(
            &dir,
            "apiwrap.toml",
            "[exclude]\nclasses = [\"LinphoneBuffer\"]\n\n[hand_written]\nfunctions = [\"linphone_core_new\"]\n",
        );

        let result = apiwrap().arg("check").arg("--manifest").arg(&manifest).output().unwrap();

        assert!(result.status.success(), "stderr: {}", stderr(&result));
        let out = stdout(&result);
        assert!(out.contains("✓ Excluded: 1 classes, 0 events, 0 functions"));
        assert!(out.contains("✓ Hand-written: 1"));
        assert!(out.contains("Manifest is valid!"));
    }

    #[test]
    fn check___conflicting_manifest___fails() {
        let dir = TempDir::new().unwrap();
        let manifest = write_file(
            &dir,
            "apiwrap.toml",
            "[exclude]\nfunctions = [\"linphone_core_new\"]\n\n[hand_written]\nfunctions = [\"linphone_core_new\"]\n",
        );

        let result = apiwrap().arg("check").arg("--manifest").arg(&manifest).output().unwrap();

        assert_eq!(result.status.code(), Some(1));
        assert!(stderr(&result).contains("both excluded and hand-written"));
    }

    #[test]
    fn check___missing_manifest___fails() {
        let result = apiwrap()
            .args(["check", "--manifest", "/nonexistent/apiwrap.toml"])
            .output()
            .unwrap();

        assert!(!result.status.success());
    }
}

// =============================================================================
// Global flags
// =============================================================================

#[test]
fn log_level___unknown_value___rejected_by_parser() {
    let result = apiwrap()
        .args(["--log-level", "loud", "check"])
        .output()
        .unwrap();

    assert!(!result.status.success());
    assert!(stderr(&result).contains("loud"));
}
