use crate::normalize::normalize;

/// A known pair of administrative-type phrases that denote the same
/// facility under two classification schemes, with the comment shown to
/// reviewers when the pair is detected.
struct VariationRule {
    type_a: &'static str,
    type_b: &'static str,
    comment: &'static str,
}

/// Fixed, ordered table of known administrative aliasing conventions.
/// These encode real renaming/reclassification patterns; do not infer new
/// pairs from data.
const VARIATION_RULES: &[VariationRule] = &[
    VariationRule {
        type_a: "district hospital",
        type_b: "sub county hospital",
        comment: "District / Sub County",
    },
    VariationRule {
        type_a: "district hospital",
        type_b: "county referral hospital",
        comment: "District / County Referral",
    },
    VariationRule {
        type_a: "county hospital",
        type_b: "county referral hospital",
        comment: "County / County Referral",
    },
    VariationRule {
        type_a: "sub county hospital",
        type_b: "sub district hospital",
        comment: "Sub County / Sub District",
    },
    VariationRule {
        type_a: "health centre",
        type_b: "health center",
        comment: "Centre / Center",
    },
    VariationRule {
        type_a: "dispensary",
        type_b: "health centre",
        comment: "Dispensary / Health Centre",
    },
];

/// Detect a same-facility-different-administrative-type pair: both names
/// share their first word (the facility's proper name token) and their
/// remaining type phrases form a known variation pair.
///
/// Returns the pair's comment, or `None`. This is not a matching strategy;
/// reconciliation consults it only for master facilities that pass 1 left
/// missing, to explain the gap better than a bare "missing".
pub fn match_with_variation(a: &str, b: &str) -> Option<&'static str> {
    let na = normalize(a);
    let nb = normalize(b);
    let words_a: Vec<&str> = na.split_whitespace().collect();
    let words_b: Vec<&str> = nb.split_whitespace().collect();
    if words_a.len() < 2 || words_b.len() < 2 {
        return None;
    }
    if words_a[0] != words_b[0] {
        return None;
    }
    let type_a = canon_type(&words_a[1..]);
    let type_b = canon_type(&words_b[1..]);
    for rule in VARIATION_RULES {
        if (type_a == rule.type_a && type_b == rule.type_b)
            || (type_a == rule.type_b && type_b == rule.type_a)
        {
            return Some(rule.comment);
        }
    }
    None
}

/// Join the words after the leading name token, folding hyphens to spaces
/// so "sub-county" and "sub county" compare equal.
fn canon_type(words: &[&str]) -> String {
    words
        .join(" ")
        .replace('-', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
