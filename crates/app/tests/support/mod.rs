#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use archive::ObjectStore;
use async_trait::async_trait;
use reclaim_core::{PermissionGrant, UnusedWorkbook, ViewRecord, WorkbookRecord};
use reclaim_db::PermissionSource;
use tableau_client::{Session, SiteApi, TableauError};

#[derive(Default)]
pub struct FakeSite {
    pub views: Vec<ViewRecord>,
    pub workbooks: Vec<WorkbookRecord>,
    pub missing: HashSet<String>,
    pub broken: HashSet<String>,
    pub fail_listing: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeSite {
    fn record(&self, call: String) {
        self.calls.lock().expect("lock").push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("lock").clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|item| item.as_str() == call).count()
    }
}

#[async_trait]
impl SiteApi for FakeSite {
    async fn sign_in(&self) -> tableau_client::Result<Session> {
        self.record("sign_in".to_string());
        Ok(Session::new("token", "site", "user"))
    }

    async fn sign_out(&self, _session: &Session) -> tableau_client::Result<()> {
        self.record("sign_out".to_string());
        Ok(())
    }

    async fn list_views(&self, _session: &Session) -> tableau_client::Result<Vec<ViewRecord>> {
        self.record("list_views".to_string());
        if self.fail_listing {
            return Err(TableauError::Io(io::Error::other("listing failed")));
        }
        Ok(self.views.clone())
    }

    async fn list_workbooks(
        &self,
        _session: &Session,
    ) -> tableau_client::Result<Vec<WorkbookRecord>> {
        self.record("list_workbooks".to_string());
        Ok(self.workbooks.clone())
    }

    async fn download_workbook(
        &self,
        _session: &Session,
        workbook_id: &str,
        dest: &Path,
    ) -> tableau_client::Result<PathBuf> {
        self.record(format!("download:{workbook_id}"));
        fs::write(dest, format!("<workbook id='{workbook_id}'/>"))?;
        Ok(dest.to_path_buf())
    }

    async fn delete_workbook(
        &self,
        _session: &Session,
        workbook_id: &str,
    ) -> tableau_client::Result<()> {
        self.record(format!("delete:{workbook_id}"));
        if self.missing.contains(workbook_id) {
            return Err(TableauError::NotFound(format!("workbook {workbook_id}")));
        }
        if self.broken.contains(workbook_id) {
            return Err(TableauError::Io(io::Error::other("connection reset")));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakePermissions {
    pub grants: Vec<PermissionGrant>,
}

#[async_trait]
impl PermissionSource for FakePermissions {
    async fn workbook_permissions(&self) -> reclaim_db::Result<Vec<PermissionGrant>> {
        Ok(self.grants.clone())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub objects: Mutex<BTreeMap<String, Vec<u8>>>,
    /// Objects ending with this suffix are stored but left out of `list`.
    pub unlisted_suffix: Option<String>,
}

impl MemoryStore {
    pub fn names(&self) -> Vec<String> {
        self.objects.lock().expect("lock").keys().cloned().collect()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn exists(&self, name: &str) -> archive::Result<bool> {
        Ok(self.objects.lock().expect("lock").contains_key(name))
    }

    async fn upload_file(&self, name: &str, path: &Path) -> archive::Result<()> {
        let bytes = fs::read(path)?;
        self.objects
            .lock()
            .expect("lock")
            .insert(name.to_string(), bytes);
        Ok(())
    }

    async fn list(&self, prefix: &str) -> archive::Result<Vec<String>> {
        Ok(self
            .names()
            .into_iter()
            .filter(|name| name.starts_with(prefix))
            .filter(|name| {
                self.unlisted_suffix
                    .as_deref()
                    .is_none_or(|suffix| !name.ends_with(suffix))
            })
            .collect())
    }
}

pub fn workbook(project_id: &str, project_name: &str, id: &str, name: &str) -> WorkbookRecord {
    WorkbookRecord {
        project_id: project_id.to_string(),
        project_name: project_name.to_string(),
        id: id.to_string(),
        name: name.to_string(),
    }
}

pub fn view(name: &str, workbook_id: &str, total_views: u64) -> ViewRecord {
    ViewRecord {
        name: name.to_string(),
        workbook_id: workbook_id.to_string(),
        total_views: Some(total_views),
    }
}

pub fn view_without_usage(name: &str, workbook_id: &str) -> ViewRecord {
    ViewRecord {
        name: name.to_string(),
        workbook_id: workbook_id.to_string(),
        total_views: None,
    }
}

pub fn unused(project_id: &str, workbook_id: &str, name: &str) -> UnusedWorkbook {
    UnusedWorkbook {
        project_id: project_id.to_string(),
        project_name: "Project".to_string(),
        workbook_id: workbook_id.to_string(),
        workbook_name: name.to_string(),
    }
}

pub fn grant(
    project_id: &str,
    workbook_id: &str,
    workbook_name: &str,
    user: &str,
) -> PermissionGrant {
    PermissionGrant {
        project_id: project_id.to_string(),
        project_name: "Finance".to_string(),
        workbook_id: workbook_id.to_string(),
        workbook_name: workbook_name.to_string(),
        web_order: 1,
        web_name: "View".to_string(),
        user_name: Some(user.to_string()),
        group_name: None,
        permission_reason: "Allowed".to_string(),
    }
}
