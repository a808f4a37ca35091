/// Facility-type phrases stripped by core-name extraction, most specific
/// phrase first so no pattern is shadowed by one of its own substrings
/// ("sub county hospital" before "county hospital", bare "hospital" after
/// every compound hospital phrase).
pub(crate) const FACILITY_TYPE_PATTERNS: &[&str] = &[
    "sub county hospital",
    "county hospital",
    "referral hospital",
    "general hospital",
    "district hospital",
    "hospital",
    "health centre",
    "health center",
    "medical centre",
    "medical center",
    "maternity & nursing home",
    "maternity home",
    "nursing home",
    "health clinic",
    "medical clinic",
    "dispensary",
    "clinic",
];

/// Canonicalize a raw facility name for comparison: trim, lower-case,
/// drop apostrophe variants, collapse whitespace runs to single spaces.
///
/// Total over all strings and idempotent. "Joseph's" and "Josephs"
/// normalize identically.
pub fn normalize(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stripped: String = lowered
        .chars()
        .filter(|c| !matches!(c, '\'' | '\u{2019}' | '`'))
        .collect();
    collapse(&stripped)
}

/// The identity part of a facility name: normalized, parenthetical
/// qualifiers removed, and the first matching facility-type pattern
/// stripped (every occurrence of it).
///
/// May legitimately be empty (the input was only a facility-type word);
/// callers must treat an empty core as "no extraction possible", never as
/// a wildcard.
pub fn extract_core(name: &str) -> String {
    core_of_normalized(&normalize(name))
}

/// [`extract_core`] for a name that is already normalized.
pub(crate) fn core_of_normalized(normalized: &str) -> String {
    // Parentheticals go first so a trailing qualifier like
    // "Health Centre(Manga)" does not block suffix detection.
    let collapsed = collapse(&strip_parentheticals(normalized));
    for pattern in FACILITY_TYPE_PATTERNS {
        if find_phrase(&collapsed, pattern).is_some() {
            return collapse(&remove_phrase(&collapsed, pattern));
        }
    }
    collapsed
}

fn collapse(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Replace each non-nested `(...)` segment with a single space. An
/// unclosed `(` swallows the rest of the string.
fn strip_parentheticals(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_paren = false;
    for c in s.chars() {
        match c {
            '(' if !in_paren => {
                in_paren = true;
                out.push(' ');
            }
            ')' if in_paren => in_paren = false,
            _ if in_paren => {}
            c => out.push(c),
        }
    }
    out
}

/// Find `phrase` as a whole-word occurrence in `haystack`. Boundaries are
/// spaces or string edges only; a hyphen is a word character, so
/// "county hospital" is not found inside "sub-county hospital".
fn find_phrase(haystack: &str, phrase: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(phrase) {
        let at = from + pos;
        let end = at + phrase.len();
        let left_ok = at == 0 || haystack.as_bytes()[at - 1] == b' ';
        let right_ok = end == haystack.len() || haystack.as_bytes()[end] == b' ';
        if left_ok && right_ok {
            return Some(at);
        }
        from = at + 1;
    }
    None
}

/// Remove every whole-word occurrence of `phrase`, leaving a space in its
/// place. Output is not collapsed.
fn remove_phrase(haystack: &str, phrase: &str) -> String {
    let mut out = String::with_capacity(haystack.len());
    let mut rest = haystack;
    while let Some(at) = find_phrase(rest, phrase) {
        out.push_str(&rest[..at]);
        out.push(' ');
        rest = &rest[at + phrase.len()..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(normalize("  Kakamega County  Hospital "), "kakamega county hospital");
    }

    #[test]
    fn strips_apostrophe_variants() {
        assert_eq!(normalize("St. Mary's"), "st. marys");
        assert_eq!(normalize("St. Mary\u{2019}s"), "st. marys");
        assert_eq!(normalize("St. Mary`s"), "st. marys");
        assert_eq!(normalize("Joseph's"), normalize("Josephs"));
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(normalize("a\t b\n  c"), "a b c");
    }

    #[test]
    fn normalize_is_idempotent() {
        for name in ["  Obama Children's Hospital ", "", "a  b", "MANGA"] {
            let once = normalize(name);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn normalize_is_total_on_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn core_strips_suffix() {
        assert_eq!(extract_core("Ober Kamoth Sub County Hospital"), "ober kamoth");
        assert_eq!(extract_core("Ober Kamoth Health Centre"), "ober kamoth");
        assert_eq!(extract_core("Riat Dispensary"), "riat");
    }

    #[test]
    fn core_prefers_most_specific_pattern() {
        // "sub county hospital" must win over "county hospital" and "hospital".
        assert_eq!(extract_core("Manga Sub County Hospital"), "manga");
        // "maternity & nursing home" must win over "nursing home".
        assert_eq!(extract_core("Eldoret Maternity & Nursing Home"), "eldoret");
        // "medical clinic" must win over "clinic".
        assert_eq!(extract_core("Mumias Medical Clinic"), "mumias");
    }

    #[test]
    fn core_requires_whole_word_phrase() {
        // Hyphenated "sub-county" keeps "county hospital" from matching;
        // only the bare "hospital" word is stripped.
        assert_eq!(extract_core("Manga Sub-County Hospital"), "manga sub-county");
    }

    #[test]
    fn core_removes_every_occurrence_of_the_matched_pattern() {
        assert_eq!(extract_core("Hospital Hill Hospital"), "hill");
    }

    #[test]
    fn core_strips_parentheticals_before_suffixes() {
        assert_eq!(extract_core("Aga Khan Hospital (Kisumu)"), extract_core("Aga Khan Hospital"));
        assert_eq!(extract_core("Manga Health Centre(Manga)"), "manga");
    }

    #[test]
    fn core_may_be_empty() {
        assert_eq!(extract_core("Dispensary"), "");
        assert_eq!(extract_core("  Health Centre "), "");
    }

    #[test]
    fn core_handles_unclosed_paren() {
        assert_eq!(extract_core("Aga Khan Hospital (Kisumu"), "aga khan");
    }
}
