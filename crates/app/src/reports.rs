use std::path::Path;

use csv::WriterBuilder;
use reclaim_core::{PERMISSION_COLUMNS, PermissionGrant, UnusedWorkbook, title_case};

use crate::error::Result;

pub const UNUSED_REPORT_FILE: &str = "Tableau_Unused_Workbooks.csv";
pub const PERMISSIONS_REPORT_FILE: &str = "Tableau_Unused_Workbooks_Permissions.csv";

const UNUSED_COLUMNS: [&str; 4] = ["project_id", "project_name", "workbook_id", "workbook_name"];

pub fn write_unused_report(path: &Path, unused: &[UnusedWorkbook]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(UNUSED_COLUMNS.iter().map(|column| title_case(column)))?;
    for workbook in unused {
        writer.serialize(workbook)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_permissions_report(path: &Path, grants: &[PermissionGrant]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(PERMISSION_COLUMNS.iter().map(|column| title_case(column)))?;
    for grant in grants {
        writer.write_record(grant.record())?;
    }
    writer.flush()?;
    Ok(())
}
