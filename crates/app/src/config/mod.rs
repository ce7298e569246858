use std::fs;
use std::path::Path;

use archive::GcsConfig;
use reclaim_db::RepositoryConfig;
use serde::Deserialize;
use tableau_client::ServerConfig;

use crate::error::{AppError, Result};

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Settings for one run, read once at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(rename = "tableauServer")]
    pub tableau_server: ServerConfig,
    #[serde(rename = "tableauDB")]
    pub tableau_db: RepositoryConfig,
    #[serde(rename = "googleCloud")]
    pub google_cloud: GcsConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("read {}: {}", path.display(), err)))?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let required = [
            ("tableauServer.url", self.tableau_server.url.as_str()),
            ("tableauServer.user", self.tableau_server.user.as_str()),
            ("tableauDB.host", self.tableau_db.host.as_str()),
            ("tableauDB.database", self.tableau_db.database.as_str()),
            ("googleCloud.BUCKET_NAME", self.google_cloud.bucket_name.as_str()),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::Config(format!("{key} must not be empty")));
            }
        }
        if self.google_cloud.credentials_path.as_os_str().is_empty() {
            return Err(AppError::Config(
                "googleCloud.GOOGLE_APPLICATION_CREDENTIALS must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
