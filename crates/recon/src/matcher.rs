use std::fmt;

use serde::Serialize;

use crate::normalize::{core_of_normalized, normalize};

/// Words shorter than this are ignored by the word-level strategies, so
/// short filler words ("the", "of") cannot carry a match.
const MIN_WORD_LEN: usize = 3;
/// Minimum length for a contained-substring claim, on whole strings and on
/// core names alike.
const MIN_SUBSTRING_LEN: usize = 4;

/// Which strategy decided that a pair of names denotes the same facility.
/// Recorded on matched pairs as evidence; strategy order is fixed and the
/// first success wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    Exact,
    CoreName,
    Substring,
    WordAlignment,
    Abbreviation,
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::CoreName => write!(f, "core_name"),
            Self::Substring => write!(f, "substring"),
            Self::WordAlignment => write!(f, "word_alignment"),
            Self::Abbreviation => write!(f, "abbreviation"),
        }
    }
}

/// Decide whether two raw facility names denote the same facility.
pub fn names_match(a: &str, b: &str) -> bool {
    match_names(a, b).is_some()
}

/// Like [`names_match`], but reports the strategy that fired.
///
/// Symmetric: the two normalized forms are ordered by (length, content)
/// before any shorter/longer test, so the result cannot depend on which
/// side was passed first.
pub fn match_names(a: &str, b: &str) -> Option<MatchStrategy> {
    let na = normalize(a);
    let nb = normalize(b);
    let (shorter, longer) = if (na.len(), na.as_str()) <= (nb.len(), nb.as_str()) {
        (na.as_str(), nb.as_str())
    } else {
        (nb.as_str(), na.as_str())
    };

    if shorter == longer {
        return Some(MatchStrategy::Exact);
    }
    if core_name_match(shorter, longer) {
        return Some(MatchStrategy::CoreName);
    }
    if substring_match(shorter, longer) {
        return Some(MatchStrategy::Substring);
    }
    if word_alignment_match(shorter, longer) {
        return Some(MatchStrategy::WordAlignment);
    }
    if abbreviation_match(shorter, longer) {
        return Some(MatchStrategy::Abbreviation);
    }
    None
}

/// Compare the identity parts of the names with facility-type suffixes and
/// parenthetical qualifiers stripped, so "X Sub County Hospital" can meet
/// "X Health Centre".
fn core_name_match(a: &str, b: &str) -> bool {
    let ca = core_of_normalized(a);
    let cb = core_of_normalized(b);
    // Empty core = extraction failed, not a wildcard.
    if ca.is_empty() || cb.is_empty() {
        return false;
    }
    let (shorter, longer) = if (ca.len(), ca.as_str()) <= (cb.len(), cb.as_str()) {
        (ca.as_str(), cb.as_str())
    } else {
        (cb.as_str(), ca.as_str())
    };
    // A single-word core is the locality token alone; distinct facilities
    // in one town share it, so it cannot assert identity by itself.
    if !shorter.contains(' ') {
        return false;
    }
    shorter == longer
        || longer.starts_with(shorter)
        || (shorter.len() >= MIN_SUBSTRING_LEN && longer.contains(shorter))
}

/// Whole-string prefix, or contained substring once the shorter form is
/// long enough to be meaningful.
fn substring_match(shorter: &str, longer: &str) -> bool {
    longer.starts_with(shorter)
        || (shorter.len() >= MIN_SUBSTRING_LEN && longer.contains(shorter))
}

fn word_pair_matches(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

fn significant_words(s: &str) -> Vec<&str> {
    s.split_whitespace().filter(|w| w.len() >= MIN_WORD_LEN).collect()
}

/// Word-by-word comparison of the full normalized strings. Condition A:
/// every significant word of the shorter side matches the same-index word
/// of the longer side. Condition B (two or more significant words): every
/// significant word matches some word of the longer side, position
/// ignored.
fn word_alignment_match(shorter: &str, longer: &str) -> bool {
    let shorter_words = significant_words(shorter);
    let longer_words: Vec<&str> = longer.split_whitespace().collect();
    if shorter_words.is_empty() || shorter_words.len() > longer_words.len() {
        return false;
    }
    let positional = shorter_words
        .iter()
        .enumerate()
        .all(|(i, w)| word_pair_matches(w, longer_words[i]));
    if positional {
        return true;
    }
    shorter_words.len() >= 2
        && shorter_words
            .iter()
            .all(|w| longer_words.iter().any(|lw| word_pair_matches(w, lw)))
}

/// Final fallback for truncated entries: at least two significant leading
/// words, each matching the word at the same index of the longer side.
fn abbreviation_match(shorter: &str, longer: &str) -> bool {
    let shorter_words = significant_words(shorter);
    let longer_words: Vec<&str> = longer.split_whitespace().collect();
    shorter_words.len() >= 2
        && longer_words.len() >= shorter_words.len()
        && shorter_words
            .iter()
            .enumerate()
            .all(|(i, w)| word_pair_matches(w, longer_words[i]))
}
