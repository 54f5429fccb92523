//! Case-insensitive name matching.
//!
//! Layer metadata is inconsistent about the casing of field names (a subtype's
//! domain map may say `STATUS` while the field list says `Status`), so lookups
//! fold case on the requested key once and compare candidates lazily.

use std::collections::BTreeMap;

/// A lookup key folded to lower case.
#[derive(Debug, Clone)]
pub struct FoldedKey {
    folded: String,
}

impl FoldedKey {
    pub fn new(key: &str) -> Self {
        Self {
            folded: fold(key).collect(),
        }
    }

    /// Returns true when `candidate` equals the key ignoring case.
    pub fn matches(&self, candidate: &str) -> bool {
        fold(candidate).eq(self.folded.chars())
    }
}

/// Lowercases per character so both sides of a comparison fold alike
/// (`str::to_lowercase` treats a word-final sigma specially).
fn fold(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

/// Compares two names ignoring case.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || FoldedKey::new(a).matches(b)
}

/// Finds the key of `map` matching `key` ignoring case.
///
/// An exact match wins over a case-folded one.
pub fn key_ignoring_case<'m, V>(key: &str, map: &'m BTreeMap<String, V>) -> Option<&'m String> {
    if let Some((k, _)) = map.get_key_value(key) {
        return Some(k);
    }
    let folded = FoldedKey::new(key);
    map.keys().find(|k| folded.matches(k))
}

/// Looks up `key` in `map` ignoring case.
pub fn get_ignoring_case<'m, V>(key: &str, map: &'m BTreeMap<String, V>) -> Option<&'m V> {
    key_ignoring_case(key, map).and_then(|k| map.get(k))
}

/// Looks up `key` in a JSON object ignoring case.
pub fn json_get_ignoring_case<'m>(
    key: &str,
    map: &'m serde_json::Map<String, serde_json::Value>,
) -> Option<&'m serde_json::Value> {
    if let Some(value) = map.get(key) {
        return Some(value);
    }
    let folded = FoldedKey::new(key);
    map.iter().find(|(k, _)| folded.matches(k)).map(|(_, v)| v)
}
