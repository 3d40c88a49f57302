use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Roster parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Spreadsheet {} has no rows", .0.display())]
    EmptySpreadsheet(PathBuf),

    #[error("Source folder not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("No usable source folder found in {}", .0.display())]
    NoSourceFolder(PathBuf),

    #[error("Roster file not found: {}", .0.display())]
    RosterNotFound(PathBuf),

    #[error("Roster {} has no '{column}' column", .path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("Roster entry {entry} is missing the student id or name")]
    MalformedRoster { entry: usize },

    #[error("Failed to copy {} to {}: {source}", .from.display(), .to.display())]
    FileCopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
