use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One matched compromise: an installed package with at least one indexed
/// version inside a record's declared range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub package: String,
    /// The record's range after normalization.
    pub matched_range: String,
    /// Installed versions inside the range, in the index's stable order.
    pub versions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Complete result of one audit run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditResult {
    pub audit_time: DateTime<Utc>,
    pub lockfile: String,
    pub packages_indexed: usize,
    pub records_checked: usize,
    pub findings: Vec<Finding>,
}

impl AuditResult {
    pub fn new(lockfile: impl Into<String>, packages_indexed: usize) -> Self {
        Self {
            audit_time: Utc::now(),
            lockfile: lockfile.into(),
            packages_indexed,
            records_checked: 0,
            findings: Vec::new(),
        }
    }

    /// True when no compromised version was found.
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}
