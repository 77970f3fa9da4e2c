use serde::{Deserialize, Serialize};

/// One row of the compromised-package advisory list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompromiseRecord {
    /// Exact package name, case-sensitive.
    pub package: String,
    /// Raw declared range. Empty means every version is compromised.
    #[serde(default)]
    pub version_range: String,
    /// Free-text context (advisory id, incident link, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CompromiseRecord {
    pub fn new(package: impl Into<String>, version_range: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            version_range: version_range.into(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
