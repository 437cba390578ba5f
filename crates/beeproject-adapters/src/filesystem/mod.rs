//! Filesystem adapters.

mod local;
mod memory;

pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;

use std::path::Path;

use beeproject_core::{application::ApplicationError, error::BeeError};

fn fs_error(path: &Path, operation: &str, cause: impl std::fmt::Display) -> BeeError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {cause}"),
    }
    .into()
}
