//! Plugin contract enforcement.

use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

use super::manifest::PluginManifest;
use super::template::{self, TemplateError, BUILTIN_PLACEHOLDERS};

const ARGUMENT_NAME_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";

static ARGUMENT_NAME_REGEX: OnceLock<Regex> = OnceLock::new();

fn argument_name_regex() -> &'static Regex {
    ARGUMENT_NAME_REGEX
        .get_or_init(|| Regex::new(ARGUMENT_NAME_PATTERN).expect("invalid regex pattern"))
}

/// One of the three capabilities every plugin must expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Parser,
    Main,
    DomainFile,
}

impl Capability {
    /// All capabilities, in the order they are checked.
    pub const ALL: [Capability; 3] = [Capability::Parser, Capability::Main, Capability::DomainFile];

    /// Manifest key of this capability.
    pub fn key(&self) -> &'static str {
        match self {
            Capability::Parser => "parser",
            Capability::Main => "main",
            Capability::DomainFile => "domain_file",
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Capability::Parser => "a parser",
            Capability::Main => "a main function",
            Capability::DomainFile => "a domain_file attribute",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A plugin that does not satisfy the contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContractError {
    /// The manifest is not valid JSON or has the wrong shape.
    #[error("malformed plugin manifest: {0}")]
    Parse(String),

    /// The manifest is not a JSON object.
    #[error("plugin manifest must be a JSON object")]
    NotAnObject,

    /// A required capability is missing.
    #[error("the plugin lacks {} (`{}`)", .0.describe(), .0)]
    MissingCapability(Capability),

    /// The capabilities are present but inconsistent.
    #[error("invalid plugin manifest: {}", join_errors(.0))]
    Invalid(Vec<ManifestValidationError>),
}

impl ContractError {
    /// The missing capability, for [`ContractError::MissingCapability`].
    pub fn missing_capability(&self) -> Option<Capability> {
        match self {
            ContractError::MissingCapability(capability) => Some(*capability),
            _ => None,
        }
    }
}

fn join_errors(errors: &[ManifestValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Structural problems in an otherwise complete manifest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestValidationError {
    #[error("main.executable is empty")]
    EmptyExecutable,

    #[error("domain_file is empty")]
    EmptyDomainFile,

    #[error("invalid argument name '{0}'")]
    InvalidArgumentName(String),

    #[error("duplicate argument '{0}'")]
    DuplicateArgument(String),

    #[error("argument name '{0}' is reserved")]
    ReservedArgument(String),

    #[error("default of argument '{name}' is not a valid {kind}")]
    DefaultTypeMismatch { name: String, kind: String },

    #[error("{0}")]
    Template(#[from] TemplateError),

    #[error("domain_file and main.domain_args are mutually exclusive")]
    ConflictingDomainSource,

    #[error("parser.description and parser.description_file are mutually exclusive")]
    ConflictingDescription,
}

/// Checks that the three capability keys are present on a raw manifest.
///
/// `domain_file` may be `null`; only the key itself is required.
pub fn check_capabilities(value: &serde_json::Value) -> Result<(), ContractError> {
    let object = value.as_object().ok_or(ContractError::NotAnObject)?;
    for capability in Capability::ALL {
        if !object.contains_key(capability.key()) {
            return Err(ContractError::MissingCapability(capability));
        }
    }
    Ok(())
}

/// Validates a manifest's internal consistency.
pub fn validate_plugin_manifest(
    manifest: &PluginManifest,
) -> Result<(), Vec<ManifestValidationError>> {
    let mut errors = Vec::new();

    if manifest.main.executable.trim().is_empty() {
        errors.push(ManifestValidationError::EmptyExecutable);
    }
    if manifest.domain_file.as_deref() == Some("") {
        errors.push(ManifestValidationError::EmptyDomainFile);
    }
    if manifest.domain_file.is_some() && manifest.main.domain_args.is_some() {
        errors.push(ManifestValidationError::ConflictingDomainSource);
    }
    if manifest.parser.description.is_some() && manifest.parser.description_file.is_some() {
        errors.push(ManifestValidationError::ConflictingDescription);
    }

    let mut seen = HashSet::new();
    for arg in &manifest.parser.arguments {
        if !argument_name_regex().is_match(&arg.name) {
            errors.push(ManifestValidationError::InvalidArgumentName(arg.name.clone()));
        } else if BUILTIN_PLACEHOLDERS.contains(&arg.name.as_str()) {
            errors.push(ManifestValidationError::ReservedArgument(arg.name.clone()));
        } else if !seen.insert(arg.name.as_str()) {
            errors.push(ManifestValidationError::DuplicateArgument(arg.name.clone()));
        }

        if arg.default.is_some() && arg.default_value().is_none() {
            errors.push(ManifestValidationError::DefaultTypeMismatch {
                name: arg.name.clone(),
                kind: arg.kind.to_string(),
            });
        }
    }

    let templates = manifest
        .main
        .args
        .iter()
        .chain(manifest.main.domain_args.iter().flatten());
    for t in templates {
        match template::placeholders(t) {
            Ok(names) => {
                for name in names {
                    if !seen.contains(name) && !BUILTIN_PLACEHOLDERS.contains(&name) {
                        errors.push(
                            TemplateError::Unknown {
                                template: t.clone(),
                                name: name.to_string(),
                            }
                            .into(),
                        );
                    }
                }
            }
            Err(e) => errors.push(e.into()),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
