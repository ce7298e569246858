use std::path::{Component, Path, PathBuf};

use archive::{BackupDirectory, WORKBOOK_EXTENSION};
use reclaim_core::UnusedWorkbook;
use tableau_client::{Session, SiteApi};
use tracing::{debug, info};

use crate::error::{AppError, Result};

/// `<backup>/<project>/<workbook>.twb`. Fails when either name would leave
/// that layout, e.g. `..` or an absolute path.
pub fn workbook_path(dir: &BackupDirectory, workbook: &UnusedWorkbook) -> Result<PathBuf> {
    let file_name = format!("{}.{}", workbook.workbook_name, WORKBOOK_EXTENSION);
    for name in [workbook.project_name.as_str(), file_name.as_str()] {
        if !is_single_component(name) {
            return Err(AppError::UnsafeName(name.to_string()));
        }
    }
    Ok(dir.path.join(&workbook.project_name).join(file_name))
}

fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

pub async fn download_workbooks<S>(
    site: &S,
    session: &Session,
    dir: &BackupDirectory,
    unused: &[UnusedWorkbook],
) -> Result<Vec<PathBuf>>
where
    S: SiteApi + ?Sized,
{
    let mut downloaded = Vec::with_capacity(unused.len());
    for workbook in unused {
        let dest = workbook_path(dir, workbook)?;
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let written = site
            .download_workbook(session, &workbook.workbook_id, &dest)
            .await?;
        debug!(workbook = %workbook.workbook_name, path = %written.display(), "downloaded");
        downloaded.push(written);
    }
    info!(count = downloaded.len(), backup = %dir.name, "workbooks downloaded");
    Ok(downloaded)
}
