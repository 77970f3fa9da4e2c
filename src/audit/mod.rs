//! The matching engine: version comparison, range parsing, lockfile
//! indexing, and advisory matching.
//!
//! Everything here is synchronous and side-effect-free; inputs are fully
//! materialized before indexing starts and the index is read-only once
//! built.
//!
//! # Example
//!
//! ```
//! use lockaudit::audit::audit_lockfile;
//! use lockaudit::model::CompromiseRecord;
//!
//! let lockfile = serde_json::from_str(
//!     r#"{"dependencies": {"left-pad": {"version": "1.3.0"}}}"#,
//! ).unwrap();
//! let records = vec![CompromiseRecord::new("left-pad", "<=1.3.0")];
//!
//! let findings = audit_lockfile(&lockfile, &records).unwrap();
//! assert_eq!(findings[0].versions, vec!["1.3.0"]);
//! ```

mod constraint;
mod index;
mod matcher;
mod version;

pub use constraint::{normalize_range, Constraint, ConstraintSet, Op};
pub use index::VersionIndex;
pub use matcher::match_records;
pub use version::compare;

use thiserror::Error;

use crate::input::lockfile::Lockfile;
use crate::model::{CompromiseRecord, Finding};

/// Errors originating in the matching engine.
///
/// Note what is deliberately absent: malformed range expressions never
/// error. A range side that fails to parse is dropped and a fully
/// unparseable range matches every version, so a mistyped advisory
/// over-reports instead of going silent.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The lockfile yielded zero (name, version) pairs across both
    /// indexing sources. Usually means the file is not a lockfile of the
    /// expected shape, so the audit must not report a clean result.
    #[error("no dependencies discovered in lockfile")]
    EmptyIndex,
}

/// Runs the full matching pipeline: index the lockfile, then match every
/// record against the index in order.
pub fn audit_lockfile(
    lockfile: &Lockfile,
    records: &[CompromiseRecord],
) -> Result<Vec<Finding>, AuditError> {
    let index = VersionIndex::build(lockfile)?;
    Ok(match_records(&index, records))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_list_is_a_clean_run() {
        let lockfile: Lockfile =
            serde_json::from_str(r#"{"dependencies": {"a": {"version": "1.0.0"}}}"#).unwrap();

        let findings = audit_lockfile(&lockfile, &[]).unwrap();
        assert!(findings.is_empty());
    }

    #[test]
    fn test_empty_lockfile_is_distinct_from_clean() {
        let lockfile: Lockfile = serde_json::from_str("{}").unwrap();

        let result = audit_lockfile(&lockfile, &[CompromiseRecord::new("a", "*")]);
        assert!(matches!(result, Err(AuditError::EmptyIndex)));
    }
}
