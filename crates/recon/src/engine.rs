use crate::config::{ReconConfig, SourceConfig, SourceFormat, SourceKind};
use crate::error::ReconError;
use crate::matcher::match_names;
use crate::model::{
    MatchedFacility, ReconInput, ReconMeta, ReconReport, ReconResult, UnmatchedFacility,
    VariationMatch, UNMATCHED_COMMENT,
};
use crate::roster::{deduplicate, parse_list};
use crate::summary::compute_summary;
use crate::variation::match_with_variation;

/// Run reconciliation per config. Resolves the master and reported rosters
/// from the input, applies optional deduplication, and returns the
/// classified report with summary and run metadata.
pub fn run(config: &ReconConfig, input: &ReconInput) -> Result<ReconResult, ReconError> {
    let (master_name, _) = config.source_of_kind(SourceKind::Master)?;
    let (reported_name, _) = config.source_of_kind(SourceKind::Reported)?;

    let master = input.rosters.get(master_name).ok_or_else(|| {
        ReconError::UnknownSource(format!("no roster loaded for source '{master_name}'"))
    })?;
    let reported = input.rosters.get(reported_name).ok_or_else(|| {
        ReconError::UnknownSource(format!("no roster loaded for source '{reported_name}'"))
    })?;

    let report = if config.options.deduplicate {
        reconcile(&deduplicate(master), &deduplicate(reported))
    } else {
        reconcile(master, reported)
    };

    let summary = compute_summary(&report);

    Ok(ReconResult {
        meta: ReconMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        report,
    })
}

/// Partition a master/reported roster pair into matched, matched-with-
/// comment, missing, and unmatched-reported buckets.
///
/// Three passes, each scanning in list order and taking the first eligible
/// candidate (never a best-score assignment), so the outcome is a
/// deterministic function of the two input orders:
///
/// 1. for each master name, consume the first un-consumed reported entry
///    the matcher accepts;
/// 2. for each master name still missing, consume the first un-consumed
///    reported entry the variation matcher explains;
/// 3. every reported index left un-consumed becomes an unmatched entry
///    with the fixed advisory comment.
///
/// Consumption is tracked per reported index, not per name, so duplicate
/// reported entries each fill their own slot. Never panics, never mutates
/// its inputs; empty lists are fine on either side.
pub fn reconcile(master: &[String], reported: &[String]) -> ReconReport {
    let mut consumed = vec![false; reported.len()];
    let mut matched = Vec::new();
    let mut provisional_missing: Vec<&String> = Vec::new();

    // Pass 1 — exact/heuristic match.
    for master_name in master {
        let hit = reported.iter().enumerate().find_map(|(i, reported_name)| {
            if consumed[i] {
                return None;
            }
            match_names(master_name, reported_name).map(|strategy| (i, strategy))
        });
        match hit {
            Some((i, strategy)) => {
                consumed[i] = true;
                matched.push(MatchedFacility {
                    master: master_name.clone(),
                    reported: reported[i].clone(),
                    strategy,
                });
            }
            None => provisional_missing.push(master_name),
        }
    }

    // Pass 2 — variation rescue.
    let mut matched_with_comment = Vec::new();
    let mut missing = Vec::new();
    for master_name in provisional_missing {
        let hit = reported.iter().enumerate().find_map(|(i, reported_name)| {
            if consumed[i] {
                return None;
            }
            match_with_variation(master_name, reported_name).map(|comment| (i, comment))
        });
        match hit {
            Some((i, comment)) => {
                consumed[i] = true;
                matched_with_comment.push(VariationMatch {
                    master: master_name.clone(),
                    reported: reported[i].clone(),
                    comment: comment.to_string(),
                });
            }
            None => missing.push(master_name.clone()),
        }
    }

    // Pass 3 — residue classification.
    let unmatched_reported = reported
        .iter()
        .enumerate()
        .filter(|(i, _)| !consumed[*i])
        .map(|(_, name)| UnmatchedFacility {
            name: name.clone(),
            comment: UNMATCHED_COMMENT.to_string(),
        })
        .collect();

    let report = ReconReport {
        matched,
        matched_with_comment,
        missing,
        unmatched_reported,
    };

    // The pairing scheme is exhaustive and mutually exclusive by
    // construction; a violation here is an engine defect.
    debug_assert_eq!(
        report.matched.len() + report.matched_with_comment.len() + report.missing.len(),
        master.len()
    );
    debug_assert_eq!(
        report.matched.len() + report.matched_with_comment.len() + report.unmatched_reported.len(),
        reported.len()
    );

    report
}

/// Load roster rows from raw file data, applying the source's format,
/// column mapping, and filter. Order of appearance is preserved; blank
/// names are skipped; nothing is deduplicated here.
pub fn load_roster_rows(
    source_name: &str,
    data: &str,
    source_config: &SourceConfig,
) -> Result<Vec<String>, ReconError> {
    match source_config.format {
        SourceFormat::List => Ok(parse_list(data)),
        SourceFormat::Csv => load_csv_names(source_name, data, source_config),
    }
}

fn load_csv_names(
    source_name: &str,
    data: &str,
    source_config: &SourceConfig,
) -> Result<Vec<String>, ReconError> {
    let columns = source_config.columns.as_ref().ok_or_else(|| {
        ReconError::ConfigValidation(format!(
            "source '{source_name}': csv format requires a [sources.{source_name}.columns] table"
        ))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ReconError::Io(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let idx = |name: &str| -> Result<usize, ReconError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ReconError::MissingColumn {
                source: source_name.into(),
                column: name.into(),
            })
    };

    let facility_idx = idx(&columns.facility)?;
    let filter_idx = if let Some(ref filter) = source_config.filter {
        Some(idx(&filter.column)?)
    } else {
        None
    };

    let mut names = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ReconError::Io(e.to_string()))?;

        if let (Some(ref filter), Some(fi)) = (&source_config.filter, filter_idx) {
            let val = record.get(fi).unwrap_or("");
            if !filter.values.iter().any(|v| v == val) {
                continue;
            }
        }

        let name = record.get(facility_idx).unwrap_or("").trim();
        if !name.is_empty() {
            names.push(name.to_string());
        }
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColumnMapping, RowFilter};
    use crate::matcher::MatchStrategy;

    fn roster(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn end_to_end_three_facility_scenario() {
        let master = roster(&[
            "Nyamira County Referral Hospital",
            "Manga Sub-County Hospital",
            "Keroka Sub-County Hospital",
        ]);
        let reported = roster(&[
            "nyamira county referral hospital",
            "Manga District Hospital",
            "Unknown Clinic XYZ",
        ]);

        let report = reconcile(&master, &reported);

        assert_eq!(report.matched.len(), 1);
        assert_eq!(report.matched[0].master, "Nyamira County Referral Hospital");
        assert_eq!(report.matched[0].strategy, MatchStrategy::Exact);

        assert_eq!(report.matched_with_comment.len(), 1);
        assert_eq!(report.matched_with_comment[0].master, "Manga Sub-County Hospital");
        assert_eq!(report.matched_with_comment[0].reported, "Manga District Hospital");
        assert_eq!(report.matched_with_comment[0].comment, "District / Sub County");

        assert_eq!(report.missing, roster(&["Keroka Sub-County Hospital"]));

        assert_eq!(report.unmatched_reported.len(), 1);
        assert_eq!(report.unmatched_reported[0].name, "Unknown Clinic XYZ");
        assert_eq!(report.unmatched_reported[0].comment, UNMATCHED_COMMENT);
    }

    #[test]
    fn empty_master_sends_everything_to_unmatched() {
        let report = reconcile(&[], &roster(&["A Dispensary", "B Clinic"]));
        assert!(report.matched.is_empty());
        assert!(report.matched_with_comment.is_empty());
        assert!(report.missing.is_empty());
        assert_eq!(report.unmatched_reported.len(), 2);
    }

    #[test]
    fn empty_reported_sends_everything_to_missing() {
        let report = reconcile(&roster(&["A Dispensary", "B Clinic"]), &[]);
        assert!(report.matched.is_empty());
        assert!(report.matched_with_comment.is_empty());
        assert_eq!(report.missing, roster(&["A Dispensary", "B Clinic"]));
        assert!(report.unmatched_reported.is_empty());
    }

    #[test]
    fn duplicate_reported_entries_each_fill_one_slot() {
        let master = roster(&["Riat Dispensary", "Riat Dispensary"]);
        let reported = roster(&["riat dispensary", "Riat Dispensary", "riat dispensary"]);
        let report = reconcile(&master, &reported);
        assert_eq!(report.matched.len(), 2);
        // One reported copy is left over.
        assert_eq!(report.unmatched_reported.len(), 1);
        assert!(report.missing.is_empty());
    }

    #[test]
    fn first_eligible_reported_entry_wins() {
        let master = roster(&["Aga Khan Hospital"]);
        let reported = roster(&["Aga Khan Hospital (Kisumu)", "aga khan hospital"]);
        let report = reconcile(&master, &reported);
        assert_eq!(report.matched.len(), 1);
        assert_eq!(report.matched[0].reported, "Aga Khan Hospital (Kisumu)");
        assert_eq!(report.unmatched_reported.len(), 1);
        assert_eq!(report.unmatched_reported[0].name, "aga khan hospital");
    }

    #[test]
    fn exhaustiveness_over_mixed_lists() {
        let master = roster(&[
            "Nyamira County Referral Hospital",
            "Ober Kamoth Sub County Hospital",
            "Kisumu County Hospital",
            "Manga Health Centre",
        ]);
        let reported = roster(&[
            "Ober Kamoth Health Centre",
            "Kisumu General Hospital",
            "Manga Health Center",
            "nyamira county referral hospital",
        ]);
        let report = reconcile(&master, &reported);
        assert_eq!(
            report.matched.len() + report.matched_with_comment.len() + report.missing.len(),
            master.len()
        );
        assert_eq!(
            report.matched.len()
                + report.matched_with_comment.len()
                + report.unmatched_reported.len(),
            reported.len()
        );
    }

    #[test]
    fn reconcile_does_not_reorder_inputs() {
        let master = roster(&["B Clinic", "A Dispensary"]);
        let reported = roster(&["c health centre"]);
        let before = master.clone();
        let _ = reconcile(&master, &reported);
        assert_eq!(master, before);
    }

    fn csv_source(filter: Option<RowFilter>) -> SourceConfig {
        SourceConfig {
            kind: SourceKind::Master,
            file: "master.csv".into(),
            format: SourceFormat::Csv,
            columns: Some(ColumnMapping { facility: "facility_name".into() }),
            filter,
        }
    }

    #[test]
    fn load_csv_basic() {
        let csv = "\
facility_name,location
Nyamira County Referral Hospital,Nyamira
,Nyamira
Keroka Sub-County Hospital,Nyamira
";
        let names = load_roster_rows("master", csv, &csv_source(None)).unwrap();
        assert_eq!(
            names,
            roster(&["Nyamira County Referral Hospital", "Keroka Sub-County Hospital"])
        );
    }

    #[test]
    fn load_csv_with_filter() {
        let csv = "\
facility_name,location
Nyamira County Referral Hospital,Nyamira
Aga Khan Hospital,Kisumu
Keroka Sub-County Hospital,Nyamira
";
        let filter = RowFilter { column: "location".into(), values: vec!["Kisumu".into()] };
        let names = load_roster_rows("master", csv, &csv_source(Some(filter))).unwrap();
        assert_eq!(names, roster(&["Aga Khan Hospital"]));
    }

    #[test]
    fn load_csv_missing_column() {
        let csv = "name,location\nA,Nyamira\n";
        let err = load_roster_rows("master", csv, &csv_source(None)).unwrap_err();
        assert!(err.to_string().contains("facility_name"));
    }

    #[test]
    fn load_list_format() {
        let source = SourceConfig {
            kind: SourceKind::Reported,
            file: "reported.txt".into(),
            format: SourceFormat::List,
            columns: None,
            filter: None,
        };
        let names = load_roster_rows("reported", "a, b\nc;", &source).unwrap();
        assert_eq!(names, roster(&["a", "b", "c"]));
    }
}
