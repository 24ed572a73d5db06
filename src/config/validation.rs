//! Config validation: unknown-key detection with "did you mean?" suggestions.
//!
//! The raw TOML is parsed into a `toml::Value` first, every dotted key path is
//! compared against the keys `SortConfig` understands, and unknown ones become
//! warnings. Serde deserialization runs afterwards and ignores them, so a typo
//! never breaks a config but is never silent either.

use std::fmt;

/// A non-fatal config warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Every valid dotted key path of `SortConfig`, sorted.
///
/// Kept by hand in step with sort_config.rs.
pub const KNOWN_CONFIG_KEYS: &[&str] = &[
    "buckets",
    "buckets.large",
    "buckets.large.max_rooms",
    "buckets.large.min_rooms",
    "buckets.large.output",
    "buckets.small",
    "buckets.small.max_rooms",
    "buckets.small.min_rooms",
    "buckets.small.output",
    "errors",
    "errors.policy",
    "input",
    "input.pattern",
    "input.root",
];

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively collect all dotted key paths of a `toml::Value` tree.
///
/// A table `{ a = { b = 1, c = 2 } }` yields `["a", "a.b", "a.c"]`.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            if v.is_table() {
                keys.push(path.clone());
                keys.extend(walk_toml_keys(v, &path));
            } else {
                keys.push(path);
            }
        }
    }
    keys
}

// ============================================================================
// Suggestions
// ============================================================================

/// Levenshtein edit distance over chars.
fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Closest known key within edit distance 3. Ties go to the first key in
/// sorted order.
pub fn suggest_correction(unknown: &str, known: &[&str]) -> Option<String> {
    known
        .iter()
        .map(|&k| (k, levenshtein(unknown, k)))
        .filter(|&(_, dist)| dist <= 3)
        .min_by_key(|&(_, dist)| dist)
        .map(|(k, _)| k.to_string())
}

// ============================================================================
// Entry Point
// ============================================================================

/// Warnings for every unknown key in a raw TOML document.
///
/// Unparseable input yields no warnings; serde reports the syntax error.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };

    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !KNOWN_CONFIG_KEYS.contains(&key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, KNOWN_CONFIG_KEYS),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}
