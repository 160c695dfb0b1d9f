//! Domain plugin manifests and the plugin contract.
//!
//! Every domain directory carries a `plugin.json` whose three top-level keys
//! are the three capabilities a plugin must expose:
//!
//! - **`parser`**: the arguments the plugin accepts from `rest`
//! - **`main`**: how to invoke the generator (executable and argument templates)
//! - **`domain_file`**: the shared domain file, or `null` when the plugin has none
//!   or synthesizes one per run
//!
//! Loading fails closed: a manifest missing any capability, or failing
//! structural validation, is rejected before anything is executed.
//!
//! # Example
//!
//! ```
//! use pddlgen_spec::plugin::{Capability, ContractError, PluginManifest};
//!
//! let json = r#"{
//!     "parser": { "arguments": [ { "name": "x", "type": "int" } ] },
//!     "domain_file": "domain.pddl"
//! }"#;
//!
//! let err = PluginManifest::from_json(json).unwrap_err();
//! assert_eq!(err, ContractError::MissingCapability(Capability::Main));
//! ```

mod contract;
mod manifest;
pub mod template;

pub use contract::{
    check_capabilities, validate_plugin_manifest, Capability, ContractError,
    ManifestValidationError,
};
pub use manifest::{ArgumentSpec, MainSpec, ParserSpec, PluginManifest, MANIFEST_FILE};
pub use template::TemplateError;

#[cfg(test)]
mod tests;
