//! Tests for plugin manifests and contract validation.

use super::*;
use crate::domain::DomainSource;
use crate::params::{ParamKind, ParamValue};
use std::path::{Path, PathBuf};

const VISITALL: &str = r#"{
    "parser": {
        "description": "Visit-all grid problems.",
        "arguments": [
            { "name": "x", "type": "int", "help": "grid width" },
            { "name": "y", "type": "int", "help": "grid height" },
            { "name": "ratio_goal_cells", "type": "float" }
        ]
    },
    "main": {
        "executable": "grid",
        "args": ["-x", "{x}", "-y", "{y}", "-u", "0", "-r", "{ratio_goal_cells}", "-s", "{seed}"]
    },
    "domain_file": "domain.pddl"
}"#;

fn manifest_without(key: &str) -> String {
    let mut value: serde_json::Value = serde_json::from_str(VISITALL).unwrap();
    value.as_object_mut().unwrap().remove(key);
    value.to_string()
}

fn manifest_with(path: &[&str], replacement: serde_json::Value) -> String {
    let mut value: serde_json::Value = serde_json::from_str(VISITALL).unwrap();
    let mut cursor = &mut value;
    for key in &path[..path.len() - 1] {
        cursor = cursor.get_mut(*key).unwrap();
    }
    cursor[path[path.len() - 1]] = replacement;
    value.to_string()
}

fn invalid_errors(json: &str) -> Vec<ManifestValidationError> {
    match PluginManifest::from_json(json) {
        Err(ContractError::Invalid(errors)) => errors,
        other => panic!("expected invalid manifest, got {:?}", other),
    }
}

// ============================================================================
// Capability Tests
// ============================================================================

#[test]
fn test_visitall_manifest_loads() {
    let manifest = PluginManifest::from_json(VISITALL).unwrap();
    assert_eq!(manifest.parser.arguments.len(), 3);
    assert_eq!(manifest.main.executable, "grid");
    assert_eq!(manifest.positionals().count(), 3);
    assert_eq!(
        manifest.domain_source(Path::new("/opt/domains/visitall")),
        DomainSource::Shared(PathBuf::from("/opt/domains/visitall/domain.pddl"))
    );
}

#[test]
fn test_each_missing_capability_is_named() {
    for capability in Capability::ALL {
        let err = PluginManifest::from_json(&manifest_without(capability.key())).unwrap_err();
        assert_eq!(err.missing_capability(), Some(capability));
        assert!(
            err.to_string().contains(capability.key()),
            "message should cite {}: {}",
            capability,
            err
        );
    }
}

#[test]
fn test_missing_main_message() {
    let err = PluginManifest::from_json(&manifest_without("main")).unwrap_err();
    assert_eq!(err.to_string(), "the plugin lacks a main function (`main`)");
}

#[test]
fn test_null_domain_file_is_present() {
    let json = manifest_with(&["domain_file"], serde_json::Value::Null);
    let manifest = PluginManifest::from_json(&json).unwrap();
    assert_eq!(manifest.domain_source(Path::new("/p")), DomainSource::Absent);
}

#[test]
fn test_domain_args_make_synthesized_source() {
    let mut value: serde_json::Value = serde_json::from_str(VISITALL).unwrap();
    value["domain_file"] = serde_json::Value::Null;
    value["main"]["domain_args"] = serde_json::json!(["--domain", "-s", "{seed}"]);
    let manifest = PluginManifest::from_json(&value.to_string()).unwrap();
    assert_eq!(manifest.domain_source(Path::new("/p")), DomainSource::Synthesized);
}

#[test]
fn test_not_an_object() {
    assert_eq!(
        PluginManifest::from_json("[1, 2]").unwrap_err(),
        ContractError::NotAnObject
    );
}

#[test]
fn test_malformed_json() {
    assert!(matches!(
        PluginManifest::from_json("{ not json"),
        Err(ContractError::Parse(_))
    ));
}

#[test]
fn test_wrong_shape_is_parse_error() {
    let json = manifest_with(&["main"], serde_json::json!("grid"));
    assert!(matches!(
        PluginManifest::from_json(&json),
        Err(ContractError::Parse(_))
    ));
}

// ============================================================================
// Structural Validation Tests
// ============================================================================

#[test]
fn test_empty_executable() {
    let json = manifest_with(&["main", "executable"], serde_json::json!(" "));
    assert!(invalid_errors(&json).contains(&ManifestValidationError::EmptyExecutable));
}

#[test]
fn test_unknown_placeholder() {
    let json = manifest_with(&["main", "args"], serde_json::json!(["-z", "{z}"]));
    let errors = invalid_errors(&json);
    assert!(errors.iter().any(|e| matches!(
        e,
        ManifestValidationError::Template(TemplateError::Unknown { name, .. }) if name == "z"
    )));
}

#[test]
fn test_reserved_and_duplicate_arguments() {
    let json = manifest_with(
        &["parser", "arguments"],
        serde_json::json!([
            { "name": "seed", "type": "int" },
            { "name": "x", "type": "int" },
            { "name": "x", "type": "int" },
            { "name": "bad-name" }
        ]),
    );
    let errors = invalid_errors(&json);
    assert!(errors.contains(&ManifestValidationError::ReservedArgument("seed".into())));
    assert!(errors.contains(&ManifestValidationError::DuplicateArgument("x".into())));
    assert!(errors.contains(&ManifestValidationError::InvalidArgumentName("bad-name".into())));
}

#[test]
fn test_default_type_mismatch() {
    let json = manifest_with(
        &["parser", "arguments"],
        serde_json::json!([
            { "name": "x", "type": "int" },
            { "name": "y", "type": "int", "default": "four" },
            { "name": "ratio_goal_cells", "type": "float", "default": 1 }
        ]),
    );
    let errors = invalid_errors(&json);
    assert_eq!(
        errors,
        vec![ManifestValidationError::DefaultTypeMismatch {
            name: "y".into(),
            kind: "int".into(),
        }]
    );
}

#[test]
fn test_conflicting_domain_source() {
    let json = manifest_with(&["main", "domain_args"], serde_json::json!(["--domain"]));
    assert!(invalid_errors(&json).contains(&ManifestValidationError::ConflictingDomainSource));
}

#[test]
fn test_argument_defaults() {
    let json = manifest_with(
        &["parser", "arguments"],
        serde_json::json!([
            { "name": "x", "type": "int" },
            { "name": "y", "type": "int", "default": 4 },
            { "name": "ratio_goal_cells", "type": "float", "default": 0.5 },
            { "name": "verbose_mode", "type": "flag" }
        ]),
    );
    let manifest = PluginManifest::from_json(&json).unwrap();
    let args = &manifest.parser.arguments;

    assert!(args[0].is_positional());
    assert_eq!(args[0].default_value(), None);
    assert!(!args[1].is_positional());
    assert_eq!(args[1].default_value(), Some(ParamValue::Int(4)));
    assert_eq!(args[2].default_value(), Some(ParamValue::Float(0.5)));
    assert_eq!(args[3].kind, ParamKind::Flag);
    assert!(!args[3].is_positional());
    assert_eq!(args[3].default_value(), Some(ParamValue::Flag(false)));
    assert_eq!(args[3].long_name(), "verbose-mode");
}
