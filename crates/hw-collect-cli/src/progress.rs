use colored::*;
use hw_collect_core::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// CLI progress reporter: one bar across the roster.
///
/// Overwrites and copy failures are already logged one by one, so the
/// reporter only tallies them for the closing line.
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
    overwrites: AtomicUsize,
    failures: AtomicUsize,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
            overwrites: AtomicUsize::new(0),
            failures: AtomicUsize::new(0),
        }
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock() {
            if let Some(pb) = guard.as_ref() {
                f(pb);
            }
        }
    }

    fn finish_bar(&self) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }
}

impl ProgressReporter for CliReporter {
    fn on_start(&self, total_students: usize) {
        let pb = ProgressBar::new(total_students as u64);
        let style = ProgressStyle::with_template(
            "  {spinner:.cyan} Collecting [{bar:30.cyan/dim}] {pos}/{len} {wide_msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━╸─")
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
        pb.set_style(style);

        if let Ok(mut guard) = self.bar.lock() {
            if let Some(old) = guard.replace(pb) {
                old.finish_and_clear();
            }
        }
    }

    fn on_student(&self, index: usize, folder_name: &str) {
        self.with_bar(|pb| {
            pb.set_position(index as u64);
            pb.set_message(folder_name.to_string());
        });
    }

    fn on_overwrite(&self, _destination: &Path) {
        self.overwrites.fetch_add(1, Ordering::Relaxed);
    }

    fn on_copy_failed(&self, _source: &Path, _error: &str) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    fn on_complete(&self, copied_files: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  {} Collected {} files in {:.2}s",
            "✓".green(),
            copied_files,
            duration_secs
        );

        let overwrites = self.overwrites.load(Ordering::Relaxed);
        if overwrites > 0 {
            eprintln!("  {} {} PDF files overwritten", "!".yellow(), overwrites);
        }
        let failures = self.failures.load(Ordering::Relaxed);
        if failures > 0 {
            eprintln!("  {} {} files could not be copied", "✗".red(), failures);
        }
    }
}
