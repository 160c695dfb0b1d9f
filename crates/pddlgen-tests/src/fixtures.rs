//! Plugin manifests and fake generators shared by the end-to-end tests.

use serde_json::{json, Value};
use std::path::PathBuf;

/// Visit-all manifest whose generator is the local `grid` script.
pub fn visitall_manifest() -> Value {
    json!({
        "parser": {
            "description_file": "README.txt",
            "arguments": [
                { "name": "x", "type": "int", "help": "grid width" },
                { "name": "y", "type": "int", "help": "grid height" },
                { "name": "ratio_goal_cells", "type": "float", "help": "fraction of goal cells" }
            ]
        },
        "main": {
            "executable": "grid",
            "args": ["-x", "{x}", "-y", "{y}", "-u", "0", "-r", "{ratio_goal_cells}", "-s", "{seed}"]
        },
        "domain_file": "domain.pddl"
    })
}

/// A manifest whose generator also writes a domain file per run.
pub fn synthesized_manifest() -> Value {
    json!({
        "parser": {
            "description": "Compiled domain per problem.",
            "arguments": [ { "name": "n", "type": "int" } ]
        },
        "main": {
            "executable": "gen",
            "args": ["{n}", "{seed}"],
            "domain_args": ["--domain", "{n}"]
        },
        "domain_file": null
    })
}

/// Echoes its arguments inside a problem body.
pub const GRID_SCRIPT: &str = r#"echo "(define (problem grid)"
echo "  (:args $*))"
"#;

/// Writes a problem, or a domain when called with `--domain`.
pub const SYNTHESIZED_SCRIPT: &str = r#"if [ "$1" = "--domain" ]; then
  echo "(define (domain compiled-$2))"
else
  echo "(define (problem p-$1-$2))"
fi
"#;

/// Prints partial output, complains on stderr, and fails.
pub const FAILING_SCRIPT: &str = r#"echo "(define (problem partial"
echo "grid: invalid ratio" >&2
exit 4
"#;

/// Shared domain file of the fake visit-all plugin.
pub const VISITALL_DOMAIN: &str = "(define (domain grid-visit-all))\n";

/// The domains shipped with the repository.
pub fn shipped_domains_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("domains")
}
