use std::path::Path;

/// Trait for reporting consolidation progress.
///
/// CLI implements with an indicatif bar. Overwrite and copy-failure events are
/// also logged by the consolidator, so implementations only need to present
/// them. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_start(&self, _total_students: usize) {}
    fn on_student(&self, _index: usize, _folder_name: &str) {}
    fn on_overwrite(&self, _destination: &Path) {}
    fn on_copy_failed(&self, _source: &Path, _error: &str) {}
    fn on_complete(&self, _copied_files: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
