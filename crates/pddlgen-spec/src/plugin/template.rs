//! `{name}` placeholder templates in generator arguments.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Placeholders available to every plugin without declaring them.
pub const BUILTIN_PLACEHOLDERS: [&str; 2] = ["seed", "plugin_dir"];

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| {
        Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("invalid regex pattern")
    })
}

/// Errors in argument templates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("malformed placeholder in template '{0}'")]
    Malformed(String),

    #[error("unknown placeholder '{{{name}}}' in template '{template}'")]
    Unknown { template: String, name: String },
}

/// Lists the placeholder names used by a template.
pub fn placeholders(template: &str) -> Result<Vec<&str>, TemplateError> {
    let stripped = placeholder_regex().replace_all(template, "");
    if stripped.contains(['{', '}']) {
        return Err(TemplateError::Malformed(template.to_string()));
    }
    Ok(placeholder_regex()
        .captures_iter(template)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect())
}

/// Substitutes every placeholder using `lookup`.
///
/// # Example
/// ```
/// use pddlgen_spec::plugin::template::expand;
///
/// let out = expand("-s{seed}", |name| (name == "seed").then(|| "7".to_string())).unwrap();
/// assert_eq!(out, "-s7");
/// ```
pub fn expand<F>(template: &str, lookup: F) -> Result<String, TemplateError>
where
    F: Fn(&str) -> Option<String>,
{
    // Reject stray braces up front so they never reach a generator.
    placeholders(template)?;

    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    for caps in placeholder_regex().captures_iter(template) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let value = lookup(name.as_str()).ok_or_else(|| TemplateError::Unknown {
            template: template.to_string(),
            name: name.as_str().to_string(),
        })?;
        out.push_str(&template[last..whole.start()]);
        out.push_str(&value);
        last = whole.end();
    }
    out.push_str(&template[last..]);
    Ok(out)
}
