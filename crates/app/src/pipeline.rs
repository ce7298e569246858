use std::path::PathBuf;

use archive::{
    BackupDirectory, ObjectStore, UploadStats, Verification, list_files, upload_backup,
    verify_archive,
};
use chrono::Local;
use reclaim_core::{UnusedWorkbook, aggregate_usage, restrict_to_unused, select_unused};
use reclaim_db::PermissionSource;
use tableau_client::{Session, SiteApi, with_session};
use tracing::info;

use crate::error::Result;
use crate::reports::{
    PERMISSIONS_REPORT_FILE, UNUSED_REPORT_FILE, write_permissions_report, write_unused_report,
};
use crate::services::{DeletionReport, delete_workbooks, download_workbooks};

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory the timestamped backup directory is created in.
    pub output_dir: PathBuf,
    /// Stop after archiving and leave the server untouched.
    pub dry_run: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            dry_run: false,
        }
    }
}

/// Outcome of a completed run. Side effects of a failed run stay on disk
/// and in the bucket; there is no report for them.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub backup: BackupDirectory,
    pub views: usize,
    pub workbooks: usize,
    pub unused: Vec<UnusedWorkbook>,
    pub downloaded: usize,
    pub permissions: usize,
    pub upload: UploadStats,
    pub verification: Verification,
    /// `None` for a dry run.
    pub deletion: Option<DeletionReport>,
}

struct Listing {
    backup: BackupDirectory,
    views: usize,
    workbooks: usize,
    unused: Vec<UnusedWorkbook>,
    downloaded: usize,
}

/// Runs one reclamation pass: list usage, pick unused workbooks, download
/// them with their reports, archive the backup directory and delete the
/// workbooks from the server.
pub async fn run_reclamation<S, P, O>(
    site: &S,
    permissions: &P,
    store: &O,
    options: &RunOptions,
) -> Result<RunReport>
where
    S: SiteApi + ?Sized,
    P: PermissionSource + ?Sized,
    O: ObjectStore + ?Sized,
{
    let listing = with_session(site, async |session: &Session| -> Result<Listing> {
        let views = site.list_views(session).await?;
        let workbooks = site.list_workbooks(session).await?;
        info!(views = views.len(), workbooks = workbooks.len(), "fetched usage");

        let unused = select_unused(&aggregate_usage(&workbooks, &views));
        info!(unused = unused.len(), "selected unused workbooks");

        let backup = BackupDirectory::create_unique(&options.output_dir, Local::now())?;
        info!(backup = %backup.path.display(), "created backup directory");
        let downloaded = download_workbooks(site, session, &backup, &unused).await?;

        Ok(Listing {
            backup,
            views: views.len(),
            workbooks: workbooks.len(),
            unused,
            downloaded: downloaded.len(),
        })
    })
    .await?;
    let Listing {
        backup,
        views,
        workbooks,
        unused,
        downloaded,
    } = listing;

    write_unused_report(&backup.path.join(UNUSED_REPORT_FILE), &unused)?;

    let grants = restrict_to_unused(permissions.workbook_permissions().await?, &unused);
    write_permissions_report(&backup.path.join(PERMISSIONS_REPORT_FILE), &grants)?;
    info!(grants = grants.len(), "wrote reports");

    let files = list_files(&backup.path)?;
    let upload = upload_backup(store, &backup, &files).await?;
    let verification = verify_archive(store, &backup, unused.len()).await?;

    let deletion = if options.dry_run {
        info!(workbooks = unused.len(), "dry run, leaving workbooks on the server");
        None
    } else {
        let unused = &unused;
        let report = with_session(site, async |session: &Session| -> Result<DeletionReport> {
            delete_workbooks(site, session, unused).await
        })
        .await?;
        Some(report)
    };

    Ok(RunReport {
        backup,
        views,
        workbooks,
        unused,
        downloaded,
        permissions: grants.len(),
        upload,
        verification,
        deletion,
    })
}

