//! Plugin manifest types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::contract::{check_capabilities, validate_plugin_manifest, ContractError};
use crate::domain::DomainSource;
use crate::params::{ParamKind, ParamValue};

/// File name of the manifest inside a domain directory.
pub const MANIFEST_FILE: &str = "plugin.json";

/// A domain plugin manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Arguments accepted from the forwarded `rest` tokens.
    pub parser: ParserSpec,
    /// Generator invocation.
    pub main: MainSpec,
    /// Shared domain file relative to the plugin directory, or `null`.
    pub domain_file: Option<String>,
}

/// The `parser` capability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParserSpec {
    /// Inline help description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Help description read from a file in the plugin directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_file: Option<String>,
    /// Declared arguments, in order.
    #[serde(default)]
    pub arguments: Vec<ArgumentSpec>,
}

/// One declared plugin argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentSpec {
    /// Parameter name; also the template placeholder and `dict:` key.
    pub name: String,
    /// Value type.
    #[serde(rename = "type", default)]
    pub kind: ParamKind,
    /// Help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    /// Default value; its presence makes the argument an `--option`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

impl ArgumentSpec {
    /// Creates a required positional argument.
    pub fn positional(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            help: None,
            default: None,
        }
    }

    /// Returns true for required positionals (no default, not a flag).
    pub fn is_positional(&self) -> bool {
        self.default.is_none() && self.kind != ParamKind::Flag
    }

    /// `--long-name` spelling of an optional argument, without the dashes.
    pub fn long_name(&self) -> String {
        self.name.replace('_', "-")
    }

    /// The typed default, if declared and well-typed.
    pub fn default_value(&self) -> Option<ParamValue> {
        match (&self.default, self.kind) {
            (None, ParamKind::Flag) => Some(ParamValue::Flag(false)),
            (None, _) => None,
            (Some(value), kind) => ParamValue::from_json(kind, value),
        }
    }
}

/// The `main` capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainSpec {
    /// Executable, relative to the plugin directory or looked up on `PATH`.
    pub executable: String,
    /// Argument templates for the problem run.
    #[serde(default)]
    pub args: Vec<String>,
    /// Extra environment variables for the generator.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    /// Argument templates for a second run whose output is the domain file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_args: Option<Vec<String>>,
}

impl PluginManifest {
    /// Parses and validates a manifest.
    ///
    /// Capability presence is checked on the raw JSON before typed
    /// deserialization so a missing key is reported by its capability name.
    pub fn from_json(json: &str) -> Result<Self, ContractError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| ContractError::Parse(e.to_string()))?;
        check_capabilities(&value)?;

        let manifest: PluginManifest =
            serde_json::from_value(value).map_err(|e| ContractError::Parse(e.to_string()))?;
        validate_plugin_manifest(&manifest).map_err(ContractError::Invalid)?;
        Ok(manifest)
    }

    /// Classifies where this plugin's domain file comes from.
    pub fn domain_source(&self, plugin_dir: &Path) -> DomainSource {
        match (&self.domain_file, &self.main.domain_args) {
            (Some(file), _) => DomainSource::Shared(plugin_dir.join(file)),
            (None, Some(_)) => DomainSource::Synthesized,
            (None, None) => DomainSource::Absent,
        }
    }

    /// Iterates the required positional arguments in order.
    pub fn positionals(&self) -> impl Iterator<Item = &ArgumentSpec> {
        self.parser.arguments.iter().filter(|a| a.is_positional())
    }
}
