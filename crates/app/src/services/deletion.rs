use reclaim_core::UnusedWorkbook;
use serde::Serialize;
use tableau_client::{Session, SiteApi};
use tracing::{info, warn};

use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeletionReport {
    pub deleted: usize,
    /// Names of workbooks the server no longer had.
    pub not_found: Vec<String>,
}

/// Deletes every workbook in order. A workbook that is already gone is
/// logged and skipped; any other failure stops the remaining deletions.
pub async fn delete_workbooks<S>(
    site: &S,
    session: &Session,
    unused: &[UnusedWorkbook],
) -> Result<DeletionReport>
where
    S: SiteApi + ?Sized,
{
    let mut report = DeletionReport::default();
    for workbook in unused {
        match site.delete_workbook(session, &workbook.workbook_id).await {
            Ok(()) => report.deleted += 1,
            Err(err) if err.is_not_found() => {
                warn!(
                    workbook = %workbook.workbook_name,
                    workbook_id = %workbook.workbook_id,
                    "workbook not found, skipping delete"
                );
                report.not_found.push(workbook.workbook_name.clone());
            }
            Err(err) => return Err(err.into()),
        }
    }
    info!(
        deleted = report.deleted,
        not_found = report.not_found.len(),
        "workbook deletion finished"
    );
    Ok(report)
}
