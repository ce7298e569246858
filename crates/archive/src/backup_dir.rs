use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Local};

pub const BACKUP_PREFIX: &str = "Workbooks_";

/// Local directory holding one run's downloads and reports, and the logical
/// name its contents are archived under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupDirectory {
    pub name: String,
    pub path: PathBuf,
}

impl BackupDirectory {
    pub fn new(base: impl AsRef<Path>, name: impl Into<String>) -> Self {
        let name = name.into();
        let path = base.as_ref().join(&name);
        Self { name, path }
    }

    pub fn timestamp_name(at: DateTime<Local>) -> String {
        format!("{}{}", BACKUP_PREFIX, at.format("%Y-%m-%d_%H-%M-%S"))
    }

    /// Creates `Workbooks_<timestamp>` under `base`. If a run in the same
    /// second already took that name, `_2`, `_3`, ... is appended.
    pub fn create_unique(base: impl AsRef<Path>, at: DateTime<Local>) -> io::Result<Self> {
        let base = base.as_ref();
        fs::create_dir_all(base)?;
        let stem = Self::timestamp_name(at);
        let mut attempt = 1u32;
        loop {
            let name = if attempt == 1 {
                stem.clone()
            } else {
                format!("{stem}_{attempt}")
            };
            let dir = Self::new(base, name);
            match fs::create_dir(&dir.path) {
                Ok(()) => return Ok(dir),
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
                Err(err) => return Err(err),
            }
        }
    }

    /// Remote object name for a file under this directory: the local path
    /// prefix is replaced by the logical name and components are joined with
    /// `/`.
    pub fn object_name(&self, file: &Path) -> Option<String> {
        let relative = file.strip_prefix(&self.path).ok()?;
        let mut name = self.name.clone();
        for component in relative.components() {
            let Component::Normal(part) = component else {
                return None;
            };
            name.push('/');
            name.push_str(&part.to_string_lossy());
        }
        Some(name)
    }

    /// Prefix shared by every object archived from this directory.
    pub fn object_prefix(&self) -> String {
        format!("{}/", self.name)
    }
}
