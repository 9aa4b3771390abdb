//! # Local Filesystem Backend

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use super::backend::StorageBackend;
use super::errors::{StoreError, StoreResult};

/// Distinguishes temporary files of concurrent writes to the same name
static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Local filesystem storage backend rooted at a single directory
#[derive(Debug)]
pub struct LocalBackend {
    root: PathBuf,
}

impl LocalBackend {
    /// Create a new local backend
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Create the root directory if it does not exist yet
    pub fn ensure_root(&self) -> StoreResult<()> {
        fs::create_dir_all(&self.root).map_err(|e| {
            StoreError::IoError(format!(
                "Failed to create directory {}: {}",
                self.root.display(),
                e
            ))
        })
    }

    /// Root directory of this backend
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn full_path(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    fn map_io(file_name: &str, e: io::Error) -> StoreError {
        if e.kind() == io::ErrorKind::NotFound {
            StoreError::NotFound(file_name.to_string())
        } else {
            StoreError::IoError(format!("{}: {}", file_name, e))
        }
    }
}

/// Readers see either the old or the new file, never a torn one
fn write_and_rename(tmp_path: &Path, full_path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = File::create(tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    fs::rename(tmp_path, full_path)
}

impl StorageBackend for LocalBackend {
    fn write(&self, file_name: &str, data: &[u8]) -> StoreResult<()> {
        let full_path = self.full_path(file_name);
        let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
        let tmp_path = self.full_path(&format!(
            ".{}.{}.{}.tmp",
            file_name,
            std::process::id(),
            seq
        ));

        if let Err(e) = write_and_rename(&tmp_path, &full_path, data) {
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::IoError(format!("{}: {}", file_name, e)));
        }

        debug!(path = %full_path.display(), bytes = data.len(), "wrote file");
        Ok(())
    }

    fn read(&self, file_name: &str) -> StoreResult<Vec<u8>> {
        fs::read(self.full_path(file_name)).map_err(|e| Self::map_io(file_name, e))
    }

    fn delete(&self, file_name: &str) -> StoreResult<()> {
        fs::remove_file(self.full_path(file_name)).map_err(|e| Self::map_io(file_name, e))
    }

    fn list(&self, suffix: &str) -> StoreResult<Vec<String>> {
        let entries = fs::read_dir(&self.root).map_err(|e| {
            StoreError::IoError(format!("{}: {}", self.root.display(), e))
        })?;

        let mut results = Vec::new();
        for entry in entries.flatten() {
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if !is_file {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(suffix) {
                    results.push(name.to_string());
                }
            }
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_read() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path().to_path_buf());

        backend.write("test.yaml", b"hello").unwrap();
        let data = backend.read("test.yaml").unwrap();
        assert_eq!(data, b"hello");
    }

    #[test]
    fn test_overwrite_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path().to_path_buf());

        backend.write("a.yaml", b"one").unwrap();
        backend.write("a.yaml", b"two").unwrap();

        assert_eq!(backend.read("a.yaml").unwrap(), b"two");
        let names: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["a.yaml".to_string()]);
    }

    #[test]
    fn test_delete() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path().to_path_buf());

        backend.write("delete-me.yaml", b"bye").unwrap();
        assert!(temp.path().join("delete-me.yaml").is_file());

        backend.delete("delete-me.yaml").unwrap();
        assert!(!temp.path().join("delete-me.yaml").exists());
    }

    #[test]
    fn test_not_found() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path().to_path_buf());

        assert!(matches!(
            backend.read("nonexistent.yaml"),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            backend.delete("nonexistent.yaml"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_list_filters_suffix_and_directories() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path().to_path_buf());

        backend.write("git.yaml", b"{}").unwrap();
        backend.write("notes.txt", b"x").unwrap();
        fs::create_dir(temp.path().join("dir.yaml")).unwrap();

        let listed = backend.list(".yaml").unwrap();
        assert_eq!(listed, vec!["git.yaml".to_string()]);
    }

    #[test]
    fn test_ensure_root_creates_nested_directory() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("a/b/sheets");
        let backend = LocalBackend::new(root.clone());

        backend.ensure_root().unwrap();
        assert!(root.is_dir());
        // idempotent
        backend.ensure_root().unwrap();
    }
}
