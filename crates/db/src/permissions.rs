use async_trait::async_trait;
use reclaim_core::{PermissionGrant, RawGrant, sort_grants};
use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::{debug, info};

use crate::error::Result;

/// Grants on workbooks, one row per (workbook, capability, grantee).
/// Ranking, relabeling and ordering happen after the fetch.
pub const WORKBOOK_PERMISSIONS_SQL: &str = r#"
    SELECT pro.luid::text   AS project_id,
           pro.name         AS project_name,
           w.luid::text     AS workbook_id,
           w.name           AS workbook_name,
           c.display_name   AS capability,
           u.name           AS user_name,
           g.name           AS group_name,
           pr.reason        AS permission_reason
    FROM next_gen_permissions n
         INNER JOIN capabilities c ON c.id = n.capability_id
         INNER JOIN workbooks w ON n.authorizable_id = w.id
         INNER JOIN projects pro ON w.project_id = pro.id
         INNER JOIN permission_reasons pr ON n.permission = pr.precedence
         LEFT JOIN groups g ON n.grantee_id = g.id
         LEFT JOIN _users u ON n.grantee_id = u.id
    WHERE n.authorizable_type = 'Workbook'
"#;

/// Connection settings for the server's repository database
/// (`[tableauDB]` in the config file).
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database: String,
}

impl RepositoryConfig {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

#[async_trait]
pub trait PermissionSource: Send + Sync {
    /// Every workbook grant, ranked, relabeled and ordered for reporting.
    async fn workbook_permissions(&self) -> Result<Vec<PermissionGrant>>;
}

/// Read-only access to the repository database.
pub struct RepositoryDb {
    pool: PgPool,
}

impl RepositoryDb {
    pub async fn connect(config: &RepositoryConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(config.connect_options())
            .await?;
        debug!(host = %config.host, database = %config.database, "connected to repository");
        Ok(Self { pool })
    }
}

#[async_trait]
impl PermissionSource for RepositoryDb {
    async fn workbook_permissions(&self) -> Result<Vec<PermissionGrant>> {
        let rows = sqlx::query(WORKBOOK_PERMISSIONS_SQL)
            .fetch_all(&self.pool)
            .await?;
        let mut grants = rows
            .iter()
            .map(grant_from_row)
            .collect::<std::result::Result<Vec<_>, sqlx::Error>>()?;
        sort_grants(&mut grants);
        info!(grants = grants.len(), "fetched workbook permissions");
        Ok(grants)
    }
}

/// Maps one row of `WORKBOOK_PERMISSIONS_SQL` to a ranked, relabeled grant.
pub fn grant_from_row(row: &PgRow) -> std::result::Result<PermissionGrant, sqlx::Error> {
    Ok(PermissionGrant::from_raw(RawGrant {
        project_id: row.try_get("project_id")?,
        project_name: row.try_get("project_name")?,
        workbook_id: row.try_get("workbook_id")?,
        workbook_name: row.try_get("workbook_name")?,
        capability: row.try_get("capability")?,
        user_name: row.try_get("user_name")?,
        group_name: row.try_get("group_name")?,
        permission_reason: row.try_get("permission_reason")?,
    }))
}
