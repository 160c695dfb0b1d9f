//! pddl-generators End-to-End Test Infrastructure
//!
//! This crate builds throwaway domain roots and drives the CLI against them:
//!
//! - Generation: arguments -> stamped problem and domain files
//! - Dispatch: unknown domains, broken plugins, failing generators
//! - **Determinism**: same arguments -> same file name and content
//!
//! Generators are small `/bin/sh` scripts, so the end-to-end tests are
//! unix-only.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p pddlgen-tests
//! ```

pub mod fixtures;
pub mod harness;

pub use harness::{CliResult, TestHarness};
