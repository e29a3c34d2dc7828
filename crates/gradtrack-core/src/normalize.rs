//! Course-code normalization.
//!
//! Canonicalizes raw course-code strings so that the many spellings of a
//! cross-listed course all compare equal: case folds up, runs of whitespace
//! collapse to single spaces, and known cross-listed spellings map to one
//! canonical code through the [`AliasTable`].

use std::collections::HashMap;

/// A fixed mapping from non-canonical cross-listed code spellings to their
/// canonical code. Built once when the catalog loads, never mutated after.
///
/// Keys are stored pre-collapsed and upper-cased so lookup happens on the
/// already-normalized form.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    map: HashMap<String, String>,
}

impl AliasTable {
    /// Build an alias table, normalizing the casing/whitespace of every key
    /// so lookups match regardless of how the catalog spelled them.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (collapse_upper(k.as_ref()), v.into()))
            .collect();
        Self { map }
    }

    /// Look up the canonical code for an already-collapsed, upper-cased code.
    pub fn resolve(&self, code: &str) -> Option<&str> {
        self.map.get(code).map(String::as_str)
    }

    /// Iterate over (alias, canonical) pairs.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Canonicalize a raw course-code string.
///
/// Trims, collapses internal whitespace, upper-cases, then substitutes the
/// alias target if the result is a known cross-listed spelling. Empty input
/// yields an empty string. Idempotent: normalizing a canonical code returns
/// it unchanged.
pub fn normalize(raw: &str, aliases: &AliasTable) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }
    let collapsed = collapse_upper(raw);
    match aliases.resolve(&collapsed) {
        Some(canonical) => canonical.to_string(),
        None => collapsed,
    }
}

fn collapse_upper(s: &str) -> String {
    s.to_uppercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
