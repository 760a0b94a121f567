//! code_archive - Project Source Archiver
//!
//! Walks a project tree once, classifies every entry against a cascading
//! rule chain (explicit include patterns, hidden-file policy, directory and
//! file exclusion catalogs, binary detection), and streams the survivors
//! into a zip archive. Dry runs execute the same classification and report
//! the same statistics without writing anything.

pub mod app;

// Re-export the pieces integration tests and embedders work with
pub use app::archiver::ArchiveWriter;
pub use app::classifier::{Classifier, SNIFF_MAX_FILE_SIZE, SNIFF_READ_LEN};
pub use app::models::{Config, Entry, Outcome, WalkResult};
pub use app::rules::RuleSet;
pub use app::walker::Walker;
