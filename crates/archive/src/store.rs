use std::path::Path;

use async_trait::async_trait;

use crate::types::Result;

/// Remote bucket the backup is archived into.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn exists(&self, name: &str) -> Result<bool>;
    async fn upload_file(&self, name: &str, path: &Path) -> Result<()>;
    /// Names of every object starting with `prefix`.
    async fn list(&self, prefix: &str) -> Result<Vec<String>>;
}
