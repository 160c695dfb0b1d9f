//! Canonical parameter-vector hashing.
//!
//! Default problem file names are derived from the exact argument vector handed
//! to a domain's generator:
//!
//! ```text
//! parameter_hash = hex(BLAKE3(JCS([domain, arg_1, ..., arg_n])))
//! ```
//!
//! The vector is serialized as a JSON array of strings in the RFC 8785 (JCS)
//! canonical form, so the digest depends only on the domain name and the
//! argument text, never on the executable's install location.

/// Computes the content hash that names a generated problem file.
///
/// # Arguments
/// * `domain` - The domain name, hashed as the first vector element
/// * `args` - The generator arguments after template substitution (seed included)
///
/// # Returns
/// * A 64-character lowercase hexadecimal string
///
/// # Example
/// ```
/// use pddlgen_spec::hash::parameter_hash;
///
/// let a = parameter_hash("visitall", &["-x", "3", "-s", "42"]);
/// let b = parameter_hash("visitall", &["-x", "3", "-s", "43"]);
/// assert_eq!(a.len(), 64);
/// assert_ne!(a, b);
/// ```
pub fn parameter_hash<S: AsRef<str>>(domain: &str, args: &[S]) -> String {
    let mut vector: Vec<&str> = Vec::with_capacity(args.len() + 1);
    vector.push(domain);
    vector.extend(args.iter().map(AsRef::as_ref));
    blake3_hash(canonical_vector(&vector).as_bytes())
}

/// Serializes a string vector as a canonical (JCS) JSON array.
///
/// ```
/// use pddlgen_spec::hash::canonical_vector;
///
/// assert_eq!(canonical_vector(&["a", "b c"]), r#"["a","b c"]"#);
/// ```
pub fn canonical_vector<S: AsRef<str>>(items: &[S]) -> String {
    let body: Vec<String> = items.iter().map(|s| jcs_string(s.as_ref())).collect();
    format!("[{}]", body.join(","))
}

/// Computes a BLAKE3 hash of arbitrary data as lowercase hex.
pub fn blake3_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Formats a string literal with JCS minimal escaping.
fn jcs_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < '\x20' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
