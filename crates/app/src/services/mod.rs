mod deletion;
mod download;

pub use deletion::{DeletionReport, delete_workbooks};
pub use download::{download_workbooks, workbook_path};
