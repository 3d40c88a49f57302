use crate::error::Error;
use crate::fs::SubmissionFs;
use crate::naming;
use std::path::{Path, PathBuf};
use tracing::info;

/// Pick the submission folder inside `working_dir`: the first non-hidden
/// directory, by name, that is not the destination.
pub fn detect_source_folder<F: SubmissionFs>(
    fs: &F,
    working_dir: &Path,
    destination_name: &str,
) -> Result<PathBuf, Error> {
    let mut names = fs.list_dir(working_dir)?;
    names.sort();

    let found = names.into_iter().find(|name| {
        !naming::is_hidden(name)
            && name != destination_name
            && fs.is_dir(&working_dir.join(name))
    });

    match found {
        Some(name) => {
            info!("Detected submission folder '{}'", name);
            Ok(working_dir.join(name))
        }
        None => Err(Error::NoSourceFolder(working_dir.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::LocalFs;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_detect_skips_hidden_and_destination() {
        let tmp = tempdir().unwrap();
        fs::create_dir(tmp.path().join(".git")).unwrap();
        fs::create_dir(tmp.path().join("collected")).unwrap();
        fs::create_dir(tmp.path().join("homework-1")).unwrap();
        fs::write(tmp.path().join("roster.csv"), "ID,Name\n").unwrap();

        let found = detect_source_folder(&LocalFs, tmp.path(), "collected").unwrap();
        assert_eq!(found, tmp.path().join("homework-1"));
    }

    #[test]
    fn test_detect_without_candidates() {
        let tmp = tempdir().unwrap();
        fs::create_dir(tmp.path().join("collected")).unwrap();
        fs::write(tmp.path().join("roster.csv"), "ID,Name\n").unwrap();

        let err = detect_source_folder(&LocalFs, tmp.path(), "collected").unwrap_err();
        assert!(matches!(err, Error::NoSourceFolder(_)));
    }
}
