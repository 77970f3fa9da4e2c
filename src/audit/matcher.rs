use tracing::debug;

use super::constraint::{normalize_range, ConstraintSet};
use super::index::VersionIndex;
use crate::model::{CompromiseRecord, Finding};

/// Matches every advisory record against the version index, preserving
/// record order in the output.
///
/// Per-record anomalies are skips, never errors: an empty package name or
/// a package absent from the index simply produces no finding, and
/// processing continues with the next record.
pub fn match_records(index: &VersionIndex, records: &[CompromiseRecord]) -> Vec<Finding> {
    records
        .iter()
        .filter_map(|record| match_record(index, record))
        .collect()
}

fn match_record(index: &VersionIndex, record: &CompromiseRecord) -> Option<Finding> {
    let package = record.package.trim();
    if package.is_empty() {
        return None;
    }

    let Some(installed) = index.versions(package) else {
        debug!(package, "not present in lockfile, skipping");
        return None;
    };

    let range = normalize_range(&record.version_range);
    let constraints = ConstraintSet::parse(&range);

    let versions: Vec<String> = installed
        .iter()
        .filter(|version| constraints.matches(version))
        .cloned()
        .collect();

    if versions.is_empty() {
        return None;
    }

    Some(Finding {
        package: package.to_string(),
        matched_range: range,
        versions,
        notes: record.notes.clone(),
    })
}
