//! Local filesystem adapter using std::fs.

use std::fs;
use std::path::Path;

use beeproject_core::{application::ports::Filesystem, error::BeeResult};
use tracing::trace;

use super::fs_error;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> BeeResult<()> {
        trace!(path = %path.display(), "create_dir_all");
        fs::create_dir_all(path).map_err(|e| fs_error(path, "create directory", e))
    }

    fn write_file(&self, path: &Path, content: &str) -> BeeResult<()> {
        trace!(path = %path.display(), bytes = content.len(), "write_file");
        fs::write(path, content).map_err(|e| fs_error(path, "write file", e))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_dir_all(&self, path: &Path) -> BeeResult<()> {
        trace!(path = %path.display(), "remove_dir_all");
        fs::remove_dir_all(path).map_err(|e| fs_error(path, "remove directory", e))
    }
}
