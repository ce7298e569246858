use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::types::Result;

/// Every regular file below `root`, in no particular order. Directories are
/// descended into but never returned; a missing root is an error.
pub fn list_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
