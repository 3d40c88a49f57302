pub mod config;
pub mod consolidate;
pub mod error;
pub mod fs;
pub mod layout;
pub mod naming;
pub mod progress;
pub mod report;
pub mod roster;

pub use config::AppConfig;
pub use consolidate::{Consolidator, ConsolidationReport};
pub use error::Error;
pub use fs::{LocalFs, SubmissionFs};
pub use progress::{ProgressReporter, SilentReporter};
pub use roster::RosterEntry;
