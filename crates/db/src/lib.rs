mod error;
mod permissions;

pub use error::{DbError, Result};
pub use permissions::{
    PermissionSource, RepositoryConfig, RepositoryDb, WORKBOOK_PERMISSIONS_SQL, grant_from_row,
};
