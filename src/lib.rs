pub mod audit;
pub mod config;
pub mod input;
pub mod model;
pub mod output;

pub use audit::{audit_lockfile, AuditError, VersionIndex};
pub use config::Config;
pub use input::Lockfile;
pub use model::{AuditResult, CompromiseRecord, Finding};
