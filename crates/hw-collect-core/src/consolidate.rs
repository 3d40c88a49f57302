use crate::error::Error;
use crate::fs::{LocalFs, SubmissionFs};
use crate::naming;
use crate::progress::ProgressReporter;
use crate::roster::RosterEntry;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// How a single student's folder was judged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// At least one PDF landed in the destination.
    Ok,
    /// No folder, an empty folder, or nothing usable inside it.
    Missing,
    /// Files were submitted but none was a PDF. Extensions sorted, deduplicated.
    WrongFormat(Vec<String>),
}

#[derive(Debug, Clone, Default)]
pub struct ConsolidationReport {
    /// Folder names with no submission, sorted.
    pub missing: Vec<String>,
    /// Folder name to the non-PDF extensions that were submitted.
    pub wrong_format: BTreeMap<String, Vec<String>>,
    /// Folder names with a PDF, in roster order.
    pub submitted: Vec<String>,
    pub copied_files: usize,
    pub duration: Duration,
}

impl ConsolidationReport {
    pub fn all_submitted(&self) -> bool {
        self.missing.is_empty() && self.wrong_format.is_empty()
    }

    pub fn total_students(&self) -> usize {
        self.missing.len() + self.wrong_format.len() + self.submitted.len()
    }
}

pub struct Consolidator<F: SubmissionFs = LocalFs> {
    fs: F,
}

impl Consolidator<LocalFs> {
    pub fn local() -> Self {
        Self { fs: LocalFs }
    }
}

impl<F: SubmissionFs> Consolidator<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Copy every roster student's submission from `source` into the flat
    /// `destination` folder and classify each student.
    ///
    /// Fails before copying anything when the source folder is absent or a
    /// roster entry lacks its id or name. Individual copy failures are
    /// reported and skipped.
    pub fn run(
        &self,
        source: &Path,
        destination: &Path,
        roster: &[RosterEntry],
        reporter: &dyn ProgressReporter,
    ) -> Result<ConsolidationReport, Error> {
        let start = Instant::now();

        self.fs.create_dir_all(destination)?;
        info!("Destination folder {} is ready", destination.display());

        let existing = self.student_folders(source)?;
        debug!(
            "Found {} candidate folders in {}",
            existing.len(),
            source.display()
        );

        let folder_names = roster
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                entry
                    .folder_name()
                    .ok_or(Error::MalformedRoster { entry: i + 1 })
            })
            .collect::<Result<Vec<_>, _>>()?;

        reporter.on_start(folder_names.len());

        let mut report = ConsolidationReport::default();

        for (index, folder_name) in folder_names.into_iter().enumerate() {
            reporter.on_student(index, &folder_name);

            let classification = if existing.contains(&folder_name) {
                self.collect_folder(
                    &source.join(&folder_name),
                    &folder_name,
                    destination,
                    &mut report.copied_files,
                    reporter,
                )
            } else {
                debug!("No folder for {}", folder_name);
                Classification::Missing
            };

            match classification {
                Classification::Ok => report.submitted.push(folder_name),
                Classification::Missing => report.missing.push(folder_name),
                Classification::WrongFormat(extensions) => {
                    report.wrong_format.insert(folder_name, extensions);
                }
            }
        }

        report.missing.sort();
        report.duration = start.elapsed();

        info!(
            "Copied {} files; {} missing, {} wrong format",
            report.copied_files,
            report.missing.len(),
            report.wrong_format.len()
        );
        reporter.on_complete(report.copied_files, report.duration.as_secs_f64());

        Ok(report)
    }

    /// Non-hidden directory names directly under `source`.
    fn student_folders(&self, source: &Path) -> Result<HashSet<String>, Error> {
        if !self.fs.is_dir(source) {
            return Err(Error::SourceNotFound(source.to_path_buf()));
        }

        let names = match self.fs.list_dir(source) {
            Ok(names) => names,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(Error::SourceNotFound(source.to_path_buf()));
            }
            Err(err) => return Err(err.into()),
        };

        Ok(names
            .into_iter()
            .filter(|name| !naming::is_hidden(name) && self.fs.is_dir(&source.join(name)))
            .collect())
    }

    fn collect_folder(
        &self,
        folder: &Path,
        folder_name: &str,
        destination: &Path,
        copied_files: &mut usize,
        reporter: &dyn ProgressReporter,
    ) -> Classification {
        let files: Vec<String> = match self.fs.list_dir(folder) {
            Ok(names) => names.into_iter().filter(|n| !naming::is_hidden(n)).collect(),
            Err(err) => {
                error!("Error reading folder {}: {}", folder.display(), err);
                return Classification::Missing;
            }
        };

        if files.is_empty() {
            debug!("{} is empty", folder_name);
            return Classification::Missing;
        }

        let mut has_pdf = false;
        let mut other_extensions: BTreeSet<String> = BTreeSet::new();

        for file_name in &files {
            if naming::is_html(file_name) {
                continue;
            }

            let source_path = folder.join(file_name);
            if !self.fs.is_file(&source_path) {
                debug!("Skipping non-file entry {}", source_path.display());
                continue;
            }

            let is_pdf = naming::is_pdf(file_name);
            let dest_path =
                destination.join(naming::destination_file_name(folder_name, file_name));

            if is_pdf && self.fs.exists(&dest_path) {
                warn!("{} already exists and will be overwritten", dest_path.display());
                reporter.on_overwrite(&dest_path);
            }

            if let Err(source) = self.fs.copy_file(&source_path, &dest_path) {
                let err = Error::FileCopyFailed {
                    from: source_path.clone(),
                    to: dest_path,
                    source,
                };
                error!("{}", err);
                reporter.on_copy_failed(&source_path, &err.to_string());
                continue;
            }

            *copied_files += 1;

            if is_pdf {
                has_pdf = true;
            } else if let Some(ext) = naming::extension(file_name) {
                other_extensions.insert(ext.to_string());
            }
        }

        if has_pdf {
            Classification::Ok
        } else if !other_extensions.is_empty() {
            Classification::WrongFormat(other_extensions.into_iter().collect())
        } else {
            // Covers folders that only hold nested directories or html wrappers.
            debug!("{} has no usable submission files", folder_name);
            Classification::Missing
        }
    }
}
