use std::path::Path;

use reclaim_app::{AppConfig, Result};
use tracing::info;

pub fn load(path: &Path) -> Result<AppConfig> {
    let config = AppConfig::load(path)?;
    info!(path = %path.display(), server = %config.tableau_server.url, "loaded config");
    Ok(config)
}
