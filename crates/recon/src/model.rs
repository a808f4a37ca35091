use std::collections::HashMap;

use serde::Serialize;

use crate::matcher::MatchStrategy;

/// Advisory attached to every reported name that matched no master
/// facility.
pub const UNMATCHED_COMMENT: &str =
    "Not in master list - needs to be added to master list for proper tracking";

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Pre-loaded facility rosters keyed by configured source name.
pub struct ReconInput {
    pub rosters: HashMap<String, Vec<String>>,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconBucket {
    Matched,
    MatchedVariation,
    Missing,
    UnmatchedReported,
}

impl std::fmt::Display for ReconBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Matched => write!(f, "matched"),
            Self::MatchedVariation => write!(f, "matched_variation"),
            Self::Missing => write!(f, "missing"),
            Self::UnmatchedReported => write!(f, "unmatched_reported"),
        }
    }
}

/// A master facility paired with the reported entry that satisfied it in
/// pass 1, plus the strategy that decided the pair.
#[derive(Debug, Clone, Serialize)]
pub struct MatchedFacility {
    pub master: String,
    pub reported: String,
    pub strategy: MatchStrategy,
}

/// A master facility rescued in pass 2: reported under a different known
/// administrative type, with the explanatory comment.
#[derive(Debug, Clone, Serialize)]
pub struct VariationMatch {
    pub master: String,
    pub reported: String,
    pub comment: String,
}

/// A reported entry no strategy could link to any master facility.
#[derive(Debug, Clone, Serialize)]
pub struct UnmatchedFacility {
    pub name: String,
    pub comment: String,
}

/// The four disjoint partitions of a master/reported roster pair. Every
/// master name lands in exactly one of the first three buckets; every
/// reported index is either consumed by a pairing or listed here as
/// unmatched.
#[derive(Debug, Clone, Serialize)]
pub struct ReconReport {
    pub matched: Vec<MatchedFacility>,
    pub matched_with_comment: Vec<VariationMatch>,
    pub missing: Vec<String>,
    pub unmatched_reported: Vec<UnmatchedFacility>,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ReconSummary {
    pub total_master: usize,
    pub total_reported: usize,
    pub matched: usize,
    pub matched_with_comment: usize,
    pub missing: usize,
    pub unmatched_reported: usize,
    /// Percentage of master facilities accounted for (plain + variation).
    pub reporting_rate: f64,
    pub bucket_counts: HashMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub report: ReconReport,
}
