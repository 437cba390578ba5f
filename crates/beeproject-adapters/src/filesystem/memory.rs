//! In-memory filesystem adapter for testing and dry runs.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use beeproject_core::{
    application::{ApplicationError, ports::Filesystem},
    error::BeeResult,
};

use super::fs_error;

/// In-memory filesystem.
///
/// Clones share the same storage, so a test can hand one clone to the
/// service and inspect the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    /// Writes below any of these paths fail.
    read_only: Vec<PathBuf>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a file and its parent directories.
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                add_ancestors(&mut inner.directories, parent);
            }
            inner.files.insert(path.to_path_buf(), content.into());
        }
        self
    }

    /// Make every write below `path` fail.
    pub fn read_only(self, path: impl Into<PathBuf>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.read_only.push(path.into());
        }
        self
    }

    /// Read a file's content.
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// All files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn read(&self) -> BeeResult<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned.into())
    }

    fn write(&self) -> BeeResult<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned.into())
    }
}

fn add_ancestors(directories: &mut BTreeSet<PathBuf>, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        directories.insert(current.clone());
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> BeeResult<()> {
        let mut inner = self.write()?;
        add_ancestors(&mut inner.directories, path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> BeeResult<()> {
        let mut inner = self.write()?;

        if inner.read_only.iter().any(|ro| path.starts_with(ro)) {
            return Err(fs_error(path, "write file", "read-only location"));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(fs_error(path, "write file", "parent directory does not exist"));
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_owned());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn remove_dir_all(&self, path: &Path) -> BeeResult<()> {
        let mut inner = self.write()?;
        if !inner.directories.contains(path) {
            return Err(fs_error(path, "remove directory", "no such directory"));
        }
        inner.directories.retain(|d| !d.starts_with(path));
        inner.files.retain(|f, _| !f.starts_with(path));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent_directory() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/a/b.txt"), "x").is_err());

        fs.create_dir_all(Path::new("/a")).unwrap();
        fs.write_file(Path::new("/a/b.txt"), "x").unwrap();
        assert_eq!(fs.read_file(Path::new("/a/b.txt")).as_deref(), Some("x"));
        assert!(fs.exists(Path::new("/")));
    }

    #[test]
    fn remove_dir_all_drops_descendants_only() {
        let fs = MemoryFilesystem::new()
            .with_file("/p/one/a.txt", "a")
            .with_file("/p/two/b.txt", "b")
            .with_file("/q/c.txt", "c");

        fs.remove_dir_all(Path::new("/p")).unwrap();

        assert!(!fs.exists(Path::new("/p")));
        assert!(!fs.exists(Path::new("/p/one")));
        assert_eq!(fs.list_files(), vec![PathBuf::from("/q/c.txt")]);
    }

    #[test]
    fn read_only_locations_reject_writes() {
        let fs = MemoryFilesystem::new().read_only("/locked");
        fs.create_dir_all(Path::new("/locked/dir")).unwrap();
        assert!(fs.write_file(Path::new("/locked/dir/f"), "x").is_err());
    }

    #[test]
    fn clones_share_storage() {
        let fs = MemoryFilesystem::new();
        let view = fs.clone();
        fs.create_dir_all(Path::new("/x")).unwrap();
        assert!(view.exists(Path::new("/x")));
    }
}
