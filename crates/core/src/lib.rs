use serde::{Deserialize, Serialize};

mod permissions;
mod usage;

pub use permissions::{
    PERMISSION_COLUMNS, capability_label, capability_rank, restrict_to_unused, sort_grants,
    title_case,
};
pub use usage::{aggregate_usage, select_unused};

/// A single view as listed by the server, with its usage statistics.
///
/// `total_views` is `None` when the server returned no usage block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewRecord {
    pub name: String,
    pub workbook_id: String,
    pub total_views: Option<u64>,
}

/// A workbook as listed by the server, with its owning project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkbookRecord {
    pub project_id: String,
    pub project_name: String,
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedUsage {
    pub project_id: String,
    pub project_name: String,
    pub workbook_id: String,
    pub workbook_name: String,
    pub view_name: String,
    pub view_total_views: Option<u64>,
    /// Sum over the workbook's views with a known count; `None` when no view
    /// of the workbook has one.
    pub workbook_total_views: Option<u64>,
}

/// A workbook selected for reclamation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnusedWorkbook {
    pub project_id: String,
    pub project_name: String,
    pub workbook_id: String,
    pub workbook_name: String,
}

impl UnusedWorkbook {
    pub fn key(&self) -> (&str, &str) {
        (&self.project_id, &self.workbook_id)
    }
}

/// Permission row as read from the repository database, before ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawGrant {
    pub project_id: String,
    pub project_name: String,
    pub workbook_id: String,
    pub workbook_name: String,
    pub capability: String,
    pub user_name: Option<String>,
    pub group_name: Option<String>,
    pub permission_reason: String,
}

/// A capability granted on a workbook to a user or a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGrant {
    pub project_id: String,
    pub project_name: String,
    pub workbook_id: String,
    pub workbook_name: String,
    pub web_order: u8,
    pub web_name: String,
    pub user_name: Option<String>,
    pub group_name: Option<String>,
    pub permission_reason: String,
}

impl PermissionGrant {
    pub fn from_raw(raw: RawGrant) -> Self {
        Self {
            web_order: capability_rank(&raw.capability),
            web_name: capability_label(&raw.capability).to_string(),
            project_id: raw.project_id,
            project_name: sanitize_name(&raw.project_name),
            workbook_id: raw.workbook_id,
            workbook_name: sanitize_name(&raw.workbook_name),
            user_name: raw.user_name,
            group_name: raw.group_name,
            permission_reason: raw.permission_reason,
        }
    }

    /// Field values in `PERMISSION_COLUMNS` order.
    pub fn record(&self) -> [String; 9] {
        [
            self.project_id.clone(),
            self.project_name.clone(),
            self.workbook_id.clone(),
            self.workbook_name.clone(),
            self.web_order.to_string(),
            self.web_name.clone(),
            self.user_name.clone().unwrap_or_default(),
            self.group_name.clone().unwrap_or_default(),
            self.permission_reason.clone(),
        ]
    }
}

/// Replaces `/` with `_` and strips newlines so a server-side name can be
/// used as a single path component. Empty and dot-only names (`.`, `..`)
/// have every dot replaced with `_`.
pub fn sanitize_name(name: &str) -> String {
    let cleaned = name.replace('/', "_").replace('\n', "");
    if cleaned.chars().all(|c| c == '.') {
        return "_".repeat(cleaned.len().max(1));
    }
    cleaned
}
