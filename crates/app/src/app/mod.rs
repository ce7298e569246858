use archive::GcsBucket;
use reclaim_db::RepositoryDb;
use tableau_client::TableauClient;
use tracing::info;

use crate::config::AppConfig;
use crate::error::Result;
use crate::pipeline::{RunOptions, RunReport, run_reclamation};

/// Live collaborators built from the config file: the server's REST API,
/// its repository database and the backup bucket.
pub struct AppState {
    pub site: TableauClient,
    pub repository: RepositoryDb,
    pub bucket: GcsBucket,
}

impl AppState {
    pub async fn connect(config: &AppConfig) -> Result<Self> {
        let site = TableauClient::new(config.tableau_server.clone());
        let repository = RepositoryDb::connect(&config.tableau_db).await?;
        let bucket = GcsBucket::from_service_account(&config.google_cloud).await?;
        info!(
            server = %config.tableau_server.url,
            bucket = %config.google_cloud.bucket_name,
            "collaborators ready"
        );
        Ok(Self {
            site,
            repository,
            bucket,
        })
    }

    pub async fn run(&self, options: &RunOptions) -> Result<RunReport> {
        run_reclamation(&self.site, &self.repository, &self.bucket, options).await
    }
}
