use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::backup_dir::BackupDirectory;
use crate::store::ObjectStore;
use crate::types::{ArchiveError, Result, UploadStats, Verification};

pub const WORKBOOK_EXTENSION: &str = "twb";

/// Uploads every file that is not already present remotely. An existing
/// object is never overwritten, so re-running over the same directory only
/// uploads what is missing.
pub async fn upload_backup<S>(
    store: &S,
    dir: &BackupDirectory,
    files: &[PathBuf],
) -> Result<UploadStats>
where
    S: ObjectStore + ?Sized,
{
    let mut stats = UploadStats::default();
    for file in files {
        let name = dir
            .object_name(file)
            .ok_or_else(|| ArchiveError::OutsideBackup(file.clone()))?;
        if store.exists(&name).await? {
            debug!(object = %name, "object already archived");
            stats.skipped += 1;
            continue;
        }
        store.upload_file(&name, file).await?;
        stats.uploaded += 1;
    }
    info!(
        uploaded = stats.uploaded,
        skipped = stats.skipped,
        backup = %dir.name,
        "backup upload finished"
    );
    Ok(stats)
}

/// Number of archived workbook files under the directory's remote prefix.
pub async fn count_archived<S>(store: &S, dir: &BackupDirectory) -> Result<usize>
where
    S: ObjectStore + ?Sized,
{
    let prefix = dir.object_prefix();
    let suffix = format!(".{WORKBOOK_EXTENSION}");
    let names = store.list(&prefix).await?;
    Ok(names
        .iter()
        .filter(|name| name.starts_with(&prefix) && name.ends_with(&suffix))
        .count())
}

/// Recounts archived workbooks and logs whether the backup is complete.
pub async fn verify_archive<S>(
    store: &S,
    dir: &BackupDirectory,
    expected: usize,
) -> Result<Verification>
where
    S: ObjectStore + ?Sized,
{
    let found = count_archived(store, dir).await?;
    let verification = Verification { expected, found };
    if verification.is_complete() {
        info!(found, backup = %dir.name, "backup complete");
    } else {
        warn!(found, expected, backup = %dir.name, "backup incomplete");
    }
    Ok(verification)
}
