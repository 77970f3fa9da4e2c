//! Core data types for advisory records, findings, and audit results.
//!
//! - [`CompromiseRecord`] - One known-compromised package/range row
//! - [`Finding`] - A matched compromise in the audited lockfile
//! - [`AuditResult`] - Complete result of one audit run
//!
//! # Example
//!
//! ```
//! use lockaudit::model::{CompromiseRecord, AuditResult};
//!
//! let record = CompromiseRecord::new("left-pad", "<=1.3.0");
//! let result = AuditResult::new("package-lock.json", 42);
//!
//! assert!(result.is_clean());
//! assert_eq!(record.package, "left-pad");
//! ```

mod finding;
mod record;

pub use finding::*;
pub use record::*;
