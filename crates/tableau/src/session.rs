use tracing::{debug, warn};

use crate::client::SiteApi;
use crate::error::TableauError;

/// Credentials token and site returned by a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub site_id: String,
    pub user_id: String,
}

impl Session {
    pub fn new(
        token: impl Into<String>,
        site_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            site_id: site_id.into(),
            user_id: user_id.into(),
        }
    }
}

/// Signs in, runs `work` with the session, then signs out whether or not the
/// work succeeded. A failed sign-out is logged and does not replace the
/// outcome of `work`.
pub async fn with_session<A, T, E, F>(api: &A, work: F) -> std::result::Result<T, E>
where
    A: SiteApi + ?Sized,
    E: From<TableauError>,
    F: AsyncFnOnce(&Session) -> std::result::Result<T, E>,
{
    let session = api.sign_in().await?;
    debug!(site_id = %session.site_id, "signed in");
    let outcome = work(&session).await;
    match api.sign_out(&session).await {
        Ok(()) => debug!(site_id = %session.site_id, "signed out"),
        Err(err) => warn!(error = %err, "sign-out failed"),
    }
    outcome
}
