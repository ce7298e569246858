pub mod app;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod reports;
pub mod services;

pub use app::AppState;
pub use config::{AppConfig, DEFAULT_CONFIG_FILE};
pub use error::{AppError, Result};
pub use pipeline::{RunOptions, RunReport, run_reclamation};
pub use reports::{PERMISSIONS_REPORT_FILE, UNUSED_REPORT_FILE};
pub use services::{DeletionReport, delete_workbooks, download_workbooks, workbook_path};
