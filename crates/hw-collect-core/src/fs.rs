use filetime::FileTime;
use std::fs;
use std::io;
use std::path::Path;
use tracing::warn;
use walkdir::WalkDir;

/// Filesystem operations the consolidator needs.
///
/// `LocalFs` goes to disk; tests plug in an in-memory tree.
pub trait SubmissionFs {
    /// Names of the entries directly inside `dir`, in listing order.
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<String>>;
    fn is_dir(&self, path: &Path) -> bool;
    fn is_file(&self, path: &Path) -> bool;
    fn exists(&self, path: &Path) -> bool;
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
    /// Copy a regular file, overwriting `to`. Returns the bytes copied.
    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl SubmissionFs for LocalFs {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|err| {
                let kind = err
                    .io_error()
                    .map(|e| e.kind())
                    .unwrap_or(io::ErrorKind::Other);
                io::Error::new(
                    kind,
                    format!("Error reading directory {}: {}", dir.display(), err),
                )
            })?;
            match entry.file_name().to_str() {
                Some(name) => names.push(name.to_string()),
                None => warn!(
                    "Skipping entry with non UTF-8 name: {}",
                    entry.path().display()
                ),
            }
        }
        Ok(names)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64> {
        let metadata = fs::metadata(from)?;
        let bytes = fs::copy(from, to)?;

        // Timestamps are best effort; the copy itself already succeeded.
        if let Err(err) = copy_times(&metadata, to) {
            warn!("Could not preserve timestamps on {}: {}", to.display(), err);
        }

        Ok(bytes)
    }
}

// By path, so a destination that inherited read-only permissions still works.
fn copy_times(metadata: &fs::Metadata, to: &Path) -> io::Result<()> {
    filetime::set_file_times(
        to,
        FileTime::from_last_access_time(metadata),
        FileTime::from_last_modification_time(metadata),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::OpenOptions;
    use std::time::{Duration, SystemTime};
    use tempfile::tempdir;

    #[test]
    fn test_list_dir_is_flat() {
        let tmp = tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("a/nested")).unwrap();
        fs::write(tmp.path().join("b.txt"), "b").unwrap();
        fs::write(tmp.path().join("a/nested/deep.txt"), "deep").unwrap();

        let mut names = LocalFs.list_dir(tmp.path()).unwrap();
        names.sort();
        assert_eq!(names, vec!["a".to_string(), "b.txt".to_string()]);
    }

    #[test]
    fn test_list_dir_missing_is_not_found() {
        let tmp = tempdir().unwrap();
        let err = LocalFs.list_dir(&tmp.path().join("nope")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_copy_preserves_modified_time() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("src.pdf");
        let dst = tmp.path().join("dst.pdf");
        fs::write(&src, "pdf bytes").unwrap();

        let past = SystemTime::now() - Duration::from_secs(86_400 * 30);
        OpenOptions::new()
            .write(true)
            .open(&src)
            .unwrap()
            .set_modified(past)
            .unwrap();

        let bytes = LocalFs.copy_file(&src, &dst).unwrap();
        assert_eq!(bytes, 9);
        assert_eq!(fs::read_to_string(&dst).unwrap(), "pdf bytes");

        let copied = fs::metadata(&dst).unwrap().modified().unwrap();
        let delta = copied
            .duration_since(past)
            .unwrap_or_else(|e| e.duration());
        assert!(delta < Duration::from_secs(2), "mtime drifted by {:?}", delta);
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_read_only_source_keeps_times() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempdir().unwrap();
        let src = tmp.path().join("locked.pdf");
        let dst = tmp.path().join("copy.pdf");
        fs::write(&src, "pdf bytes").unwrap();

        let past = SystemTime::now() - Duration::from_secs(86_400 * 30);
        filetime::set_file_mtime(&src, FileTime::from_system_time(past)).unwrap();
        fs::set_permissions(&src, fs::Permissions::from_mode(0o444)).unwrap();

        LocalFs.copy_file(&src, &dst).unwrap();

        let metadata = fs::metadata(&dst).unwrap();
        assert!(metadata.permissions().readonly());
        let delta = metadata
            .modified()
            .unwrap()
            .duration_since(past)
            .unwrap_or_else(|e| e.duration());
        assert!(delta < Duration::from_secs(2), "mtime drifted by {:?}", delta);
    }
}
