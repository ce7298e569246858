mod backup_dir;
mod files;
mod gcs;
mod store;
mod types;
mod upload;

pub use backup_dir::{BACKUP_PREFIX, BackupDirectory};
pub use files::list_files;
pub use gcs::{GcsBucket, GcsConfig};
pub use store::ObjectStore;
pub use types::{ArchiveError, Result, UploadStats, Verification};
pub use upload::{WORKBOOK_EXTENSION, count_archived, upload_backup, verify_archive};
