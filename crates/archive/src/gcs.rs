use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use google_cloud_auth::credentials::CredentialsFile;
use google_cloud_auth::token::DefaultTokenSourceProvider;
use google_cloud_token::{TokenSource, TokenSourceProvider};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::store::ObjectStore;
use crate::types::{ArchiveError, Result};

const GCS_ENDPOINT: &str = "https://storage.googleapis.com";
const STORAGE_SCOPE: &str = "https://www.googleapis.com/auth/devstorage.read_write";

/// `[googleCloud]` section of the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct GcsConfig {
    #[serde(rename = "BUCKET_NAME")]
    pub bucket_name: String,
    /// Path to a service-account JSON key.
    #[serde(rename = "GOOGLE_APPLICATION_CREDENTIALS")]
    pub credentials_path: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectList {
    #[serde(default)]
    items: Vec<ObjectMeta>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ObjectMeta {
    name: String,
}

/// Google Cloud Storage bucket accessed through the JSON API.
pub struct GcsBucket {
    http: reqwest::Client,
    endpoint: String,
    bucket: String,
    tokens: Arc<dyn TokenSource>,
}

impl GcsBucket {
    pub async fn from_service_account(config: &GcsConfig) -> Result<Self> {
        let key_json = tokio::fs::read_to_string(&config.credentials_path).await?;
        let credentials: CredentialsFile = serde_json::from_str(&key_json)?;
        let auth_config =
            google_cloud_auth::project::Config::default().with_scopes(&[STORAGE_SCOPE]);
        let provider =
            DefaultTokenSourceProvider::new_with_credentials(auth_config, Box::new(credentials))
                .await
                .map_err(|err| ArchiveError::Auth(err.to_string()))?;
        Ok(Self::new(
            GCS_ENDPOINT,
            &config.bucket_name,
            provider.token_source(),
        ))
    }

    pub fn new(endpoint: &str, bucket: &str, tokens: Arc<dyn TokenSource>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
            tokens,
        }
    }

    async fn bearer(&self) -> Result<String> {
        let token = self
            .tokens
            .token()
            .await
            .map_err(|err| ArchiveError::Auth(err.to_string()))?;
        if token.starts_with("Bearer ") {
            Ok(token)
        } else {
            Ok(format!("Bearer {token}"))
        }
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.endpoint)?;
        url.path_segments_mut()
            .map_err(|_| ArchiveError::Endpoint(self.endpoint.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl ObjectStore for GcsBucket {
    async fn exists(&self, name: &str) -> Result<bool> {
        let url = self.url(&["storage", "v1", "b", &self.bucket, "o", name])?;
        let response = self
            .http
            .get(url)
            .header(reqwest::header::AUTHORIZATION, self.bearer().await?)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        check(response).await?;
        Ok(true)
    }

    async fn upload_file(&self, name: &str, path: &Path) -> Result<()> {
        let url = self.url(&["upload", "storage", "v1", "b", &self.bucket, "o"])?;
        let body = tokio::fs::read(path).await?;
        let size = body.len();
        let response = self
            .http
            .post(url)
            .query(&[("uploadType", "media"), ("name", name)])
            .header(reqwest::header::AUTHORIZATION, self.bearer().await?)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(body)
            .send()
            .await?;
        check(response).await?;
        debug!(object = name, size, "uploaded object");
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let url = self.url(&["storage", "v1", "b", &self.bucket, "o"])?;
        let mut names = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut request = self
                .http
                .get(url.clone())
                .query(&[("prefix", prefix)])
                .header(reqwest::header::AUTHORIZATION, self.bearer().await?);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }
            let page: ObjectList = check(request.send().await?).await?.json().await?;
            names.extend(page.items.into_iter().map(|item| item.name));
            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }
        Ok(names)
    }
}

async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(ArchiveError::Storage { status, message })
}
