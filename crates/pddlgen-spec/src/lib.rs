//! pddl-generators core library
//!
//! This crate provides the data model and the pure rules behind the
//! `pddl-generators` front end: how an invocation is described, how a domain
//! plugin declares its capabilities, how output files are named and where they
//! go, and how every generated file is stamped with its own provenance.
//!
//! Nothing in this crate spawns processes or talks to the terminal; the CLI
//! crate owns those concerns.
//!
//! # Example
//!
//! ```
//! use pddlgen_spec::{resolve_targets, parameter_hash, DomainSource, InvocationRequest};
//! use pddlgen_spec::output::Destination;
//!
//! let request = InvocationRequest::new("visitall").with_seed(7);
//! let args = ["-x", "3", "-y", "4", "-u", "0", "-r", "0.5", "-s", "7"];
//! let hash = parameter_hash("visitall", &args);
//!
//! let target = resolve_targets(&request, &DomainSource::Absent, &hash);
//! assert_eq!(
//!     target.problem,
//!     Destination::File(format!("output/{}.pddl", hash).into())
//! );
//! ```
//!
//! # Modules
//!
//! - [`domain`]: Domain descriptors and where a domain file comes from
//! - [`error`]: Error types shared by the resolver
//! - [`hash`]: Canonical parameter-vector hashing
//! - [`metadata`]: The `;;` provenance block prepended to generated files
//! - [`output`]: Output path resolution
//! - [`params`]: Typed parameter records
//! - [`plugin`]: Plugin manifest types and contract validation
//! - [`request`]: The invocation request built from the command line

pub mod domain;
pub mod error;
pub mod hash;
pub mod metadata;
pub mod output;
pub mod params;
pub mod plugin;
pub mod request;

pub use domain::{DomainDescriptor, DomainSource};
pub use error::ResolveError;
pub use hash::{canonical_vector, parameter_hash};
pub use metadata::GenerationMetadata;
pub use output::{create_output_dirs, resolve_targets, Destination, DomainTarget, ResolvedTarget};
pub use params::{ParamKind, ParamSet, ParamValue};
pub use plugin::{
    validate_plugin_manifest, Capability, ContractError, ManifestValidationError, PluginManifest,
};
pub use request::{InvocationRequest, OutputOverride, STDOUT_SENTINEL};
