use std::collections::{HashMap, HashSet};

use crate::{AggregatedUsage, UnusedWorkbook, ViewRecord, WorkbookRecord, sanitize_name};

/// Inner-joins workbooks with their views on workbook id and attaches the
/// per-workbook sum of view counts to every joined row.
///
/// Workbooks without any view produce no rows, so they are never reported
/// as unused. Views without usage data are skipped by the sum; a workbook
/// whose views all lack it gets an unknown total.
pub fn aggregate_usage(
    workbooks: &[WorkbookRecord],
    views: &[ViewRecord],
) -> Vec<AggregatedUsage> {
    let mut views_by_workbook: HashMap<&str, Vec<&ViewRecord>> = HashMap::new();
    for view in views {
        views_by_workbook
            .entry(view.workbook_id.as_str())
            .or_default()
            .push(view);
    }

    let mut rows = Vec::new();
    let mut totals: HashMap<String, Option<u64>> = HashMap::new();
    for workbook in workbooks {
        let Some(matched) = views_by_workbook.get(workbook.id.as_str()) else {
            continue;
        };
        for view in matched {
            let total = totals.entry(workbook.id.clone()).or_insert(None);
            if let Some(count) = view.total_views {
                *total = Some(total.unwrap_or(0) + count);
            }
            rows.push(AggregatedUsage {
                project_id: workbook.project_id.clone(),
                project_name: sanitize_name(&workbook.project_name),
                workbook_id: workbook.id.clone(),
                workbook_name: sanitize_name(&workbook.name),
                view_name: view.name.clone(),
                view_total_views: view.total_views,
                workbook_total_views: None,
            });
        }
    }

    for row in &mut rows {
        row.workbook_total_views = totals.get(&row.workbook_id).copied().flatten();
    }
    rows
}

/// Distinct workbooks whose summed view count is known to be zero, in
/// first-seen order.
pub fn select_unused(rows: &[AggregatedUsage]) -> Vec<UnusedWorkbook> {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    rows.iter()
        .filter(|row| row.workbook_total_views == Some(0))
        .filter(|row| seen.insert((row.project_id.as_str(), row.workbook_id.as_str())))
        .map(|row| UnusedWorkbook {
            project_id: row.project_id.clone(),
            project_name: row.project_name.clone(),
            workbook_id: row.workbook_id.clone(),
            workbook_name: row.workbook_name.clone(),
        })
        .collect()
}
