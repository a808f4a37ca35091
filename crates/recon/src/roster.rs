use std::collections::HashSet;

use crate::normalize::normalize;

/// Split pasted free text into an ordered list of facility names.
/// Separators are newlines, commas, and semicolons; pieces are trimmed and
/// empties dropped. No deduplication.
pub fn parse_list(text: &str) -> Vec<String> {
    text.split(['\n', ',', ';'])
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Drop repeats of the same facility, keyed by normalized form, keeping
/// the first spelling seen (trimmed, original casing).
pub fn deduplicate(names: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(names.len());
    for name in names {
        if seen.insert(normalize(name)) {
            kept.push(name.trim().to_string());
        }
    }
    kept
}
