//! Provenance block stamped at the top of generated files.
//!
//! The block mimics Emacs file-local variables inside PDDL comments:
//!
//! ```text
//! ;; pddl-generators:
//! ;; command: /opt/domains/visitall/grid -x 3 -y 4 -u 0 -r 0.5 -s 7
//! ;; dict: {"x": 3, "y": 4, "ratio_goal_cells": 0.5, "seed": 7}
//! ;; date: 2026-10-18T09:30:00.000+00:00
//! ;; end:
//! ```

use chrono::{DateTime, SecondsFormat, Utc};

use crate::params::ParamSet;

/// Comment prefix of every metadata line.
pub const COMMENT_PREFIX: &str = ";; ";

/// First line marker.
pub const START_MARKER: &str = "pddl-generators:";

/// Last line marker.
pub const END_MARKER: &str = "end:";

/// How a file was generated. Written once, never read back.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationMetadata {
    /// The generator command line, shell-quoted.
    pub command: String,
    /// Final applied configuration, in insertion order.
    pub parameters: ParamSet,
    /// Generation instant.
    pub timestamp: DateTime<Utc>,
}

impl GenerationMetadata {
    /// Creates a record stamped with the current time.
    pub fn new(command: impl Into<String>, parameters: ParamSet) -> Self {
        Self::with_timestamp(command, parameters, Utc::now())
    }

    /// Creates a record with an explicit timestamp.
    pub fn with_timestamp(
        command: impl Into<String>,
        parameters: ParamSet,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            command: command.into(),
            parameters,
            timestamp,
        }
    }

    /// Renders the comment block, one field per line, newline-terminated.
    pub fn render(&self) -> String {
        let fields = [
            START_MARKER.to_string(),
            format!("command: {}", single_line(&self.command)),
            format!("dict: {}", single_line(&render_dict(&self.parameters))),
            format!(
                "date: {}",
                self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, false)
            ),
            END_MARKER.to_string(),
        ];

        let mut block = String::new();
        for field in fields {
            block.push_str(COMMENT_PREFIX);
            block.push_str(&field);
            block.push('\n');
        }
        block
    }

    /// Prepends the block to captured generator output.
    pub fn stamp(&self, content: &[u8]) -> Vec<u8> {
        let header = self.render();
        let mut out = Vec::with_capacity(header.len() + content.len());
        out.extend_from_slice(header.as_bytes());
        out.extend_from_slice(content);
        out
    }
}

/// Renders parameters as a JSON object, keeping insertion order.
pub fn render_dict(params: &ParamSet) -> String {
    let pairs: Vec<String> = params
        .iter()
        .map(|(name, value)| {
            format!(
                "{}: {}",
                serde_json::Value::String(name.to_string()),
                value.to_json()
            )
        })
        .collect();
    format!("{{{}}}", pairs.join(", "))
}

fn single_line(s: &str) -> String {
    s.replace(['\r', '\n'], " ")
}
