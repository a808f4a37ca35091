use std::collections::HashMap;

use crate::model::{ReconBucket, ReconReport, ReconSummary};

/// Compute summary statistics from a classified report.
pub fn compute_summary(report: &ReconReport) -> ReconSummary {
    let matched = report.matched.len();
    let matched_with_comment = report.matched_with_comment.len();
    let missing = report.missing.len();
    let unmatched_reported = report.unmatched_reported.len();

    let total_master = matched + matched_with_comment + missing;
    let total_reported = matched + matched_with_comment + unmatched_reported;

    let reporting_rate = if total_master == 0 {
        0.0
    } else {
        (matched + matched_with_comment) as f64 * 100.0 / total_master as f64
    };

    let mut bucket_counts = HashMap::new();
    bucket_counts.insert(ReconBucket::Matched.to_string(), matched);
    bucket_counts.insert(ReconBucket::MatchedVariation.to_string(), matched_with_comment);
    bucket_counts.insert(ReconBucket::Missing.to_string(), missing);
    bucket_counts.insert(ReconBucket::UnmatchedReported.to_string(), unmatched_reported);

    ReconSummary {
        total_master,
        total_reported,
        matched,
        matched_with_comment,
        missing,
        unmatched_reported,
        reporting_rate,
        bucket_counts,
    }
}
