//! Input loading: the lockfile JSON and the advisory CSV.
//!
//! These are the thin collaborator surfaces around the matching engine —
//! all they do is get two files off disk and into memory.

pub mod advisories;
pub mod lockfile;

pub use advisories::load_advisories;
pub use lockfile::{load_lockfile, Lockfile};
