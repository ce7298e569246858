use std::cmp::Ordering;
use std::collections::HashSet;

use crate::{PermissionGrant, UnusedWorkbook};

/// Column names of the permission report, before title casing.
pub const PERMISSION_COLUMNS: [&str; 9] = [
    "project_id",
    "project_name",
    "workbook_id",
    "workbook_name",
    "web_order",
    "web_name",
    "user_name",
    "group_name",
    "permission_reasons",
];

const CAPABILITY_ORDER: [&str; 14] = [
    "View",
    "Export Image",
    "Export Data",
    "View Comments",
    "Add Comment",
    "Filter",
    "View Underlying Data",
    "Share Customized",
    "Web Authoring",
    "Write",
    "Download File",
    "Move",
    "Delete",
    "Set Permissions",
];

/// Display rank of a capability as the server's web UI lists it. Unknown
/// capabilities sort after every known one.
pub fn capability_rank(display_name: &str) -> u8 {
    CAPABILITY_ORDER
        .iter()
        .position(|name| *name == display_name)
        .map(|index| index as u8 + 1)
        .unwrap_or(CAPABILITY_ORDER.len() as u8 + 1)
}

pub fn capability_label(display_name: &str) -> &str {
    match display_name {
        "Export Image" => "Download Image/PDF",
        "Export Data" => "Download Summary Data",
        "View Underlying Data" => "Download Full Data",
        "Web Authoring" => "Web Edit",
        "Write" => "Save",
        "Download File" => "Download Workbook/Save as",
        other => other,
    }
}

/// Orders grants by workbook name, capability rank, user name, then group
/// name. Names compare case-insensitively first, like the repository's
/// locale collation, and missing names sort last.
pub fn sort_grants(grants: &mut [PermissionGrant]) {
    grants.sort_by(|a, b| {
        collate(&a.workbook_name, &b.workbook_name)
            .then(a.web_order.cmp(&b.web_order))
            .then_with(|| nulls_last(&a.user_name, &b.user_name))
            .then_with(|| nulls_last(&a.group_name, &b.group_name))
    });
}

fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

fn nulls_last(a: &Option<String>, b: &Option<String>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => collate(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Keeps the grants whose (project id, workbook id) belongs to the unused set.
pub fn restrict_to_unused(
    grants: Vec<PermissionGrant>,
    unused: &[UnusedWorkbook],
) -> Vec<PermissionGrant> {
    let keys: HashSet<(&str, &str)> = unused.iter().map(UnusedWorkbook::key).collect();
    grants
        .into_iter()
        .filter(|grant| keys.contains(&(grant.project_id.as_str(), grant.workbook_id.as_str())))
        .collect()
}

/// Uppercases the first letter of every alphabetic run and lowercases the
/// rest, so `project_id` becomes `Project_Id`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grant(
        workbook: &str,
        capability: &str,
        user: Option<&str>,
        group: Option<&str>,
    ) -> PermissionGrant {
        PermissionGrant {
            project_id: "p1".to_string(),
            project_name: "Project".to_string(),
            workbook_id: format!("id-{workbook}"),
            workbook_name: workbook.to_string(),
            web_order: capability_rank(capability),
            web_name: capability_label(capability).to_string(),
            user_name: user.map(str::to_string),
            group_name: group.map(str::to_string),
            permission_reason: "Allowed".to_string(),
        }
    }

    #[test]
    fn ranks_follow_web_ui_order() {
        assert_eq!(capability_rank("View"), 1);
        assert_eq!(capability_rank("Write"), 10);
        assert_eq!(capability_rank("Set Permissions"), 14);
        assert_eq!(capability_rank("Something New"), 15);
    }

    #[test]
    fn labels_rename_known_capabilities_only() {
        assert_eq!(capability_label("Download File"), "Download Workbook/Save as");
        assert_eq!(capability_label("View Underlying Data"), "Download Full Data");
        assert_eq!(capability_label("Filter"), "Filter");
    }

    #[test]
    fn sort_orders_by_name_rank_user_then_group() {
        let mut grants = vec![
            grant("B", "View", Some("zoe"), None),
            grant("A", "Delete", Some("amy"), None),
            grant("A", "View", None, Some("analysts")),
            grant("A", "View", Some("bob"), None),
            grant("A", "Export Image", Some("amy"), None),
        ];
        sort_grants(&mut grants);
        let order: Vec<(&str, u8, Option<&str>)> = grants
            .iter()
            .map(|g| (g.workbook_name.as_str(), g.web_order, g.user_name.as_deref()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("A", 1, Some("bob")),
                ("A", 1, None),
                ("A", 2, Some("amy")),
                ("A", 13, Some("amy")),
                ("B", 1, Some("zoe")),
            ]
        );
    }

    #[test]
    fn sort_ignores_case_before_breaking_ties() {
        let mut grants = vec![
            grant("beta", "View", Some("Carl"), None),
            grant("Alpha", "View", Some("bob"), None),
            grant("alpha", "View", Some("amy"), None),
            grant("Alpha", "View", Some("Amy"), None),
            grant("Zeta", "View", Some("amy"), None),
        ];
        sort_grants(&mut grants);
        let order: Vec<(&str, Option<&str>)> = grants
            .iter()
            .map(|g| (g.workbook_name.as_str(), g.user_name.as_deref()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("alpha", Some("amy")),
                ("Alpha", Some("amy")),
                ("Alpha", Some("Amy")),
                ("Alpha", Some("bob")),
                ("beta", Some("Carl")),
                ("Zeta", Some("amy")),
            ]
        );
    }

    #[test]
    fn restrict_drops_grants_outside_unused_set() {
        let unused = vec![UnusedWorkbook {
            project_id: "p1".to_string(),
            project_name: "Project".to_string(),
            workbook_id: "id-A".to_string(),
            workbook_name: "A".to_string(),
        }];
        let mut other_project = grant("A", "View", Some("amy"), None);
        other_project.project_id = "p2".to_string();
        let grants = vec![
            grant("A", "View", Some("amy"), None),
            grant("B", "View", Some("amy"), None),
            other_project,
        ];

        let kept = restrict_to_unused(grants, &unused);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].workbook_id, "id-A");
        assert_eq!(kept[0].project_id, "p1");
    }

    #[test]
    fn title_case_capitalizes_each_word() {
        assert_eq!(title_case("project_id"), "Project_Id");
        assert_eq!(title_case("permission_reasons"), "Permission_Reasons");
        assert_eq!(title_case("WEB_NAME"), "Web_Name");
    }
}
