use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reclaim_core::{ViewRecord, WorkbookRecord};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Result, TableauError};
use crate::session::Session;
use crate::wire::{
    Credentials, ErrorBody, Page, SignInRequest, SignInResponse, SiteRef, ViewsPage,
    WorkbooksPage,
};

const AUTH_HEADER: &str = "X-Tableau-Auth";
const DEFAULT_API_VERSION: &str = "3.19";
const DEFAULT_PAGE_SIZE: u32 = 100;

/// `[tableauServer]` section of the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub url: String,
    pub user: String,
    pub password: String,
    /// Content URL of the site; empty selects the default site.
    #[serde(default)]
    pub site: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

/// Operations the reclamation run needs from the analytics server.
#[async_trait]
pub trait SiteApi: Send + Sync {
    async fn sign_in(&self) -> Result<Session>;
    async fn sign_out(&self, session: &Session) -> Result<()>;
    /// Every view on the site, with its total view count.
    async fn list_views(&self, session: &Session) -> Result<Vec<ViewRecord>>;
    async fn list_workbooks(&self, session: &Session) -> Result<Vec<WorkbookRecord>>;
    async fn download_workbook(
        &self,
        session: &Session,
        workbook_id: &str,
        dest: &Path,
    ) -> Result<PathBuf>;
    /// Fails with [`TableauError::NotFound`] when the workbook no longer exists.
    async fn delete_workbook(&self, session: &Session, workbook_id: &str) -> Result<()>;
}

pub struct TableauClient {
    http: reqwest::Client,
    config: ServerConfig,
    page_size: u32,
}

impl TableauClient {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    fn api_url(&self, path: &str) -> String {
        format!(
            "{}/api/{}/{}",
            self.config.url.trim_end_matches('/'),
            self.config.api_version,
            path
        )
    }

    fn request(&self, method: Method, session: Option<&Session>, path: &str) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, self.api_url(path))
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(session) = session {
            builder = builder.header(AUTH_HEADER, &session.token);
        }
        builder
    }

    async fn fetch_all<P>(
        &self,
        session: &Session,
        path: &str,
        extra: &[(&str, &str)],
    ) -> Result<Vec<P::Item>>
    where
        P: Page + DeserializeOwned,
    {
        let mut items = Vec::new();
        let mut page_number = 1u32;
        loop {
            let response = self
                .request(Method::GET, Some(session), path)
                .query(extra)
                .query(&[("pageSize", self.page_size), ("pageNumber", page_number)])
                .send()
                .await?;
            let page: P = check(response).await?.json().await?;
            let total = page.total_available();
            let batch = page.into_items();
            let empty = batch.is_empty();
            items.extend(batch);
            debug!(path, page_number, fetched = items.len(), total, "fetched page");
            if empty || items.len() as u64 >= total {
                break;
            }
            page_number += 1;
        }
        Ok(items)
    }
}

#[async_trait]
impl SiteApi for TableauClient {
    async fn sign_in(&self) -> Result<Session> {
        let body = SignInRequest {
            credentials: Credentials {
                name: &self.config.user,
                password: &self.config.password,
                site: SiteRef {
                    content_url: &self.config.site,
                },
            },
        };
        let response = self
            .request(Method::POST, None, "auth/signin")
            .json(&body)
            .send()
            .await?;
        let signed_in: SignInResponse = check(response).await?.json().await?;
        Ok(Session::new(
            signed_in.credentials.token,
            signed_in.credentials.site.id,
            signed_in.credentials.user.id,
        ))
    }

    async fn sign_out(&self, session: &Session) -> Result<()> {
        let response = self
            .request(Method::POST, Some(session), "auth/signout")
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn list_views(&self, session: &Session) -> Result<Vec<ViewRecord>> {
        let path = format!("sites/{}/views", session.site_id);
        let views = self
            .fetch_all::<ViewsPage>(session, &path, &[("includeUsageStatistics", "true")])
            .await?;
        Ok(views
            .into_iter()
            .map(|view| ViewRecord {
                name: view.name,
                workbook_id: view.workbook.id,
                total_views: view.usage.map(|usage| usage.total_view_count),
            })
            .collect())
    }

    async fn list_workbooks(&self, session: &Session) -> Result<Vec<WorkbookRecord>> {
        let path = format!("sites/{}/workbooks", session.site_id);
        let workbooks = self.fetch_all::<WorkbooksPage>(session, &path, &[]).await?;
        Ok(workbooks
            .into_iter()
            .map(|workbook| WorkbookRecord {
                project_id: workbook.project.id,
                project_name: workbook.project.name,
                id: workbook.id,
                name: workbook.name,
            })
            .collect())
    }

    async fn download_workbook(
        &self,
        session: &Session,
        workbook_id: &str,
        dest: &Path,
    ) -> Result<PathBuf> {
        let path = format!("sites/{}/workbooks/{}/content", session.site_id, workbook_id);
        let response = self.request(Method::GET, Some(session), &path).send().await?;
        let bytes = check(response).await?.bytes().await?;
        tokio::fs::write(dest, &bytes).await?;
        debug!(workbook_id, path = %dest.display(), bytes = bytes.len(), "downloaded workbook");
        Ok(dest.to_path_buf())
    }

    async fn delete_workbook(&self, session: &Session, workbook_id: &str) -> Result<()> {
        let path = format!("sites/{}/workbooks/{}", session.site_id, workbook_id);
        let response = self
            .request(Method::DELETE, Some(session), &path)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) if parsed.error.detail.is_empty() => parsed.error.summary,
        Ok(parsed) => format!("{}: {}", parsed.error.summary, parsed.error.detail),
        Err(_) => body,
    };
    if status == StatusCode::NOT_FOUND {
        return Err(TableauError::NotFound(message));
    }
    Err(TableauError::Status { status, message })
}
