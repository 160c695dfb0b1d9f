//! End-to-End Dispatch Error Tests for pddl-generators
//!
//! Tests verify that every failure is fatal, reported, and leaves no output:
//! - Unknown and missing domains (usage errors)
//! - Contract violations and unsupported domains
//! - Failing generators
//! - `--helpall` isolating broken domains
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p pddlgen-tests --test e2e_dispatch
//! ```

#![cfg(unix)]

use pddlgen_tests::fixtures::{self, FAILING_SCRIPT};
use pddlgen_tests::TestHarness;

// ============================================================================
// Usage Error Tests
// ============================================================================

#[test]
fn test_unknown_domain() {
    let harness = TestHarness::with_visitall();
    let result = harness.generate("sokoban", &["3"]);

    result.assert_exit_code(2);
    assert!(result.stderr.contains("invalid domain 'sokoban'"));
    assert!(result.stderr.contains("visitall"));
    assert!(result.stdout.is_empty());
    assert!(!harness.out_dir().exists());
}

#[test]
fn test_missing_domain() {
    let harness = TestHarness::with_visitall();
    let result = harness.run_cli(&[]);

    result.assert_exit_code(2);
    assert!(result.stderr.contains("a domain is required"));
    assert!(result.stderr.contains("Usage:"));
}

#[test]
fn test_bad_plugin_arguments() {
    let harness = TestHarness::with_visitall();

    let result = harness.generate("visitall", &["3", "four", "0.5"]);
    result.assert_exit_code(2);
    assert!(result.stderr.contains("four"));

    let result = harness.generate("visitall", &["3", "4"]);
    result.assert_exit_code(2);
    assert!(result.stderr.contains("ratio_goal_cells"));
    assert!(!harness.out_dir().exists());
}

// ============================================================================
// Plugin Failure Tests
// ============================================================================

#[test]
fn test_missing_main_is_reported_and_never_run() {
    let harness = TestHarness::new();
    let mut manifest = fixtures::visitall_manifest();
    manifest.as_object_mut().unwrap().remove("main");
    harness.add_domain("visitall", &manifest);
    harness.add_file("visitall", "README.txt", "Visit every cell.\n");
    let marker = harness.path().join("ran");
    harness.add_script(
        "visitall",
        "grid",
        &format!("touch '{}'\n", marker.display()),
    );

    let result = harness.generate("visitall", &["3", "4", "0.5"]);
    result.assert_exit_code(1);
    assert!(result.stderr.contains("main"), "stderr: {}", result.stderr);
    assert!(!marker.exists());
    assert!(!harness.out_dir().exists());
}

#[test]
fn test_unsupported_domain() {
    let harness = TestHarness::with_visitall();
    harness.add_bare_domain("sokoban");

    let result = harness.generate("sokoban", &["3"]);
    result.assert_exit_code(1);
    assert!(result.stderr.contains("not supported"));
}

#[test]
fn test_failing_generator_leaves_no_file() {
    let harness = TestHarness::with_visitall();
    harness.add_script("visitall", "grid", FAILING_SCRIPT);

    let result = harness.generate("visitall", &["3", "4", "0.5"]);
    result.assert_exit_code(1);
    assert!(result.stderr.contains("status 4"), "stderr: {}", result.stderr);
    assert!(result.stdout.is_empty());
    assert!(harness.output_files().is_empty());
}

#[test]
fn test_missing_generator_executable() {
    let harness = TestHarness::new();
    let mut manifest = fixtures::visitall_manifest();
    manifest["main"]["executable"] = "bin/grid".into();
    harness.add_domain("visitall", &manifest);
    harness.add_file("visitall", "README.txt", "Visit every cell.\n");

    let result = harness.generate("visitall", &["3", "4", "0.5"]);
    result.assert_exit_code(1);
    assert!(result.stderr.contains("bin/grid"));
}

#[test]
fn test_empty_domains_root() {
    let harness = TestHarness::new();
    let result = harness.run_cli(&["--list"]);

    result.assert_exit_code(1);
    assert!(result.stderr.contains("No domains found"));
}

// ============================================================================
// Help-All Tests
// ============================================================================

#[test]
fn test_helpall_isolates_broken_domains() {
    let harness = TestHarness::with_visitall();

    let mut broken = fixtures::visitall_manifest();
    broken.as_object_mut().unwrap().remove("parser");
    harness.add_domain("broken", &broken);
    harness.add_bare_domain("unsupported");

    let result = harness.run_cli(&["--helpall"]);
    result.assert_success();

    for name in ["broken", "unsupported", "visitall"] {
        let banner = format!(
            "################################ {} ################################",
            name
        );
        assert!(result.stdout.contains(&banner), "missing banner for {}", name);
    }
    assert!(result.stdout.contains("lacks a parser"));
    assert!(result.stdout.contains("not supported"));
    assert!(result.stdout.contains("Visit every cell of a grid."));

    // Banners come in sorted order.
    let broken_at = result.stdout.find(" broken ").unwrap();
    let visitall_at = result.stdout.find(" visitall ").unwrap();
    assert!(broken_at < visitall_at);
}
